use std::collections::HashMap;

use tracing::debug;

use crate::models::{
    ActivityLevel, CandidateActivity, Category, CategorySummary, Condition, FavorabilityBand,
    ScoredActivity, UserProfile, WeatherContext,
};

const BASE_SCORE: i32 = 50;
const WEIGHT_LOSS_GOALS: [&str; 2] = ["lose weight", "perder peso"];
pub const DEFAULT_REASON: &str = "recommended activity for today";

/// One row of a category's weather cascade. Rows are tried in order and the
/// first whose predicate holds is the only one applied.
struct WeatherRule {
    applies: fn(&WeatherContext) -> bool,
    delta: i32,
    reason: &'static str,
}

const OUTDOOR_RULES: &[WeatherRule] = &[
    WeatherRule {
        applies: is_rainy,
        delta: -40,
        reason: "unfavorable: rain",
    },
    WeatherRule {
        applies: is_sunny_and_mild,
        delta: 35,
        reason: "ideal outdoor conditions",
    },
    WeatherRule {
        applies: is_comfortable,
        delta: 20,
        reason: "good outdoor conditions",
    },
    WeatherRule {
        applies: is_extreme_outdoors,
        delta: -20,
        reason: "extreme temperature",
    },
];

const INDOOR_RULES: &[WeatherRule] = &[
    WeatherRule {
        applies: is_rainy,
        delta: 25,
        reason: "ideal for rainy days",
    },
    WeatherRule {
        applies: is_extreme_indoors,
        delta: 15,
        reason: "shelter from extreme temperature",
    },
];

fn is_rainy(weather: &WeatherContext) -> bool {
    weather.condition == Condition::Rainy
}

fn is_sunny_and_mild(weather: &WeatherContext) -> bool {
    weather.condition == Condition::Sunny && (18.0..=28.0).contains(&weather.temperature)
}

fn is_comfortable(weather: &WeatherContext) -> bool {
    (15.0..=30.0).contains(&weather.temperature)
}

fn is_extreme_outdoors(weather: &WeatherContext) -> bool {
    weather.temperature < 10.0 || weather.temperature > 35.0
}

fn is_extreme_indoors(weather: &WeatherContext) -> bool {
    weather.temperature < 15.0 || weather.temperature > 30.0
}

fn rules_for(category: Category) -> &'static [WeatherRule] {
    match category {
        Category::Outdoor => OUTDOOR_RULES,
        Category::Indoor => INDOOR_RULES,
        Category::Exercise | Category::Leisure => &[],
    }
}

fn profile_bonus(category: Category, profile: &UserProfile) -> i32 {
    let level_bonus = match (profile.activity_level, category) {
        (Some(ActivityLevel::VeryActive), Category::Exercise) => 15,
        (Some(ActivityLevel::Sedentary), Category::Leisure) => 10,
        _ => 0,
    };
    let wants_weight_loss = WEIGHT_LOSS_GOALS.iter().any(|goal| profile.has_goal(goal));
    let goal_bonus = if category == Category::Exercise && wants_weight_loss {
        20
    } else {
        0
    };

    level_bonus + goal_bonus
}

pub fn score_activity(
    activity: &CandidateActivity,
    weather: &WeatherContext,
    profile: Option<&UserProfile>,
) -> ScoredActivity {
    let mut score = BASE_SCORE;
    let mut reason = None;

    if let Some(rule) = rules_for(activity.category)
        .iter()
        .find(|rule| (rule.applies)(weather))
    {
        score += rule.delta;
        reason = Some(rule.reason);
    }

    if let Some(profile) = profile {
        score += profile_bonus(activity.category, profile);
    }

    let score = score.clamp(0, 100) as u8;
    debug!(activity = %activity.id, category = %activity.category, score, "scored activity");

    ScoredActivity {
        activity: activity.clone(),
        score,
        reason: reason.unwrap_or(DEFAULT_REASON).to_string(),
    }
}

/// Scores every catalog entry and ranks them by score, highest first. The
/// sort is stable so equal scores keep catalog order.
pub fn rank_activities(
    catalog: &[CandidateActivity],
    weather: &WeatherContext,
    profile: Option<&UserProfile>,
) -> Vec<ScoredActivity> {
    let mut ranked: Vec<ScoredActivity> = catalog
        .iter()
        .map(|activity| score_activity(activity, weather, profile))
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Quick verdict on the current conditions, independent of any activity.
pub fn weather_verdict(weather: &WeatherContext) -> (FavorabilityBand, &'static str) {
    let temp = weather.temperature;

    if weather.condition == Condition::Rainy {
        return (FavorabilityBand::Poor, "not recommended: rain");
    }
    if (20.0..=28.0).contains(&temp) && weather.humidity < 70 && weather.wind_speed < 20.0 {
        return (FavorabilityBand::Excellent, "ideal conditions");
    }
    if (15.0..=32.0).contains(&temp) && weather.humidity < 80 {
        return (FavorabilityBand::Good, "good conditions");
    }

    (FavorabilityBand::Fair, "average conditions")
}

pub fn summarize_by_category(scored: &[ScoredActivity]) -> Vec<CategorySummary> {
    let mut map: HashMap<Category, (usize, u32)> = HashMap::new();

    for entry in scored {
        let totals = map.entry(entry.activity.category).or_insert((0, 0));
        totals.0 += 1;
        totals.1 += u32::from(entry.score);
    }

    let mut summaries: Vec<CategorySummary> = map
        .into_iter()
        .map(|(category, (count, total_score))| CategorySummary {
            category,
            count,
            avg_score: if count == 0 {
                0.0
            } else {
                f64::from(total_score) / count as f64
            },
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.label().cmp(b.category.label()))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, category: Category) -> CandidateActivity {
        CandidateActivity {
            id: id.to_string(),
            title: format!("Activity {id}"),
            description: "sample".to_string(),
            best_time: "07:00 - 09:00".to_string(),
            duration: "45 min".to_string(),
            location: "Nearby".to_string(),
            category,
        }
    }

    fn weather(temperature: f64, condition: Condition) -> WeatherContext {
        WeatherContext {
            temperature,
            condition,
            humidity: 60,
            wind_speed: 10.0,
        }
    }

    fn scores(ranked: &[ScoredActivity]) -> Vec<(&str, u8)> {
        ranked
            .iter()
            .map(|entry| (entry.activity.id.as_str(), entry.score))
            .collect()
    }

    #[test]
    fn sunny_mild_day_puts_outdoor_first() {
        let catalog = vec![candidate("A", Category::Outdoor), candidate("B", Category::Indoor)];
        let ranked = rank_activities(&catalog, &weather(24.0, Condition::Sunny), None);

        assert_eq!(scores(&ranked), vec![("A", 85), ("B", 50)]);
        assert_eq!(ranked[0].reason, "ideal outdoor conditions");
        assert_eq!(ranked[1].reason, DEFAULT_REASON);
    }

    #[test]
    fn rainy_day_puts_indoor_first() {
        let catalog = vec![candidate("A", Category::Outdoor), candidate("B", Category::Indoor)];
        let ranked = rank_activities(&catalog, &weather(24.0, Condition::Rainy), None);

        assert_eq!(scores(&ranked), vec![("B", 75), ("A", 10)]);
        assert_eq!(ranked[0].reason, "ideal for rainy days");
        assert_eq!(ranked[1].reason, "unfavorable: rain");
    }

    #[test]
    fn only_first_matching_outdoor_rule_applies() {
        let sunny = score_activity(
            &candidate("A", Category::Outdoor),
            &weather(20.0, Condition::Sunny),
            None,
        );
        assert_eq!(sunny.score, 85);

        let cloudy = score_activity(
            &candidate("A", Category::Outdoor),
            &weather(20.0, Condition::Cloudy),
            None,
        );
        assert_eq!(cloudy.score, 70);
        assert_eq!(cloudy.reason, "good outdoor conditions");

        let hot_and_sunny = score_activity(
            &candidate("A", Category::Outdoor),
            &weather(29.0, Condition::Sunny),
            None,
        );
        assert_eq!(hot_and_sunny.score, 70);
    }

    #[test]
    fn extreme_temperatures_adjust_each_family() {
        let freezing = weather(5.0, Condition::Cloudy);
        assert_eq!(score_activity(&candidate("A", Category::Outdoor), &freezing, None).score, 30);
        assert_eq!(score_activity(&candidate("B", Category::Indoor), &freezing, None).score, 65);

        let scorching = weather(38.0, Condition::Sunny);
        let outdoor = score_activity(&candidate("A", Category::Outdoor), &scorching, None);
        assert_eq!(outdoor.score, 30);
        assert_eq!(outdoor.reason, "extreme temperature");
    }

    #[test]
    fn temperatures_between_rule_bands_keep_base_score() {
        let chilly = weather(12.0, Condition::Cloudy);
        let outdoor = score_activity(&candidate("A", Category::Outdoor), &chilly, None);
        assert_eq!(outdoor.score, 50);
        assert_eq!(outdoor.reason, DEFAULT_REASON);

        let nan = weather(f64::NAN, Condition::Other);
        assert_eq!(score_activity(&candidate("A", Category::Outdoor), &nan, None).score, 50);
        assert_eq!(score_activity(&candidate("B", Category::Indoor), &nan, None).score, 50);
    }

    #[test]
    fn profile_bonuses_stack_for_exercise() {
        let profile = UserProfile {
            activity_level: Some(ActivityLevel::VeryActive),
            goals: vec!["Lose weight".to_string()],
        };
        let scored = score_activity(
            &candidate("C", Category::Exercise),
            &weather(24.0, Condition::Sunny),
            Some(&profile),
        );
        assert_eq!(scored.score, 85);
        assert_eq!(scored.reason, DEFAULT_REASON);
    }

    #[test]
    fn spanish_goal_counts_as_weight_loss() {
        let profile = UserProfile {
            activity_level: ActivityLevel::parse("muy activo"),
            goals: vec!["Perder peso".to_string()],
        };
        let scored = score_activity(
            &candidate("C", Category::Exercise),
            &weather(24.0, Condition::Sunny),
            Some(&profile),
        );
        assert_eq!(scored.score, 85);
    }

    #[test]
    fn sedentary_profile_favors_leisure() {
        let profile = UserProfile {
            activity_level: Some(ActivityLevel::Sedentary),
            goals: Vec::new(),
        };
        let leisure = score_activity(
            &candidate("D", Category::Leisure),
            &weather(24.0, Condition::Sunny),
            Some(&profile),
        );
        let exercise = score_activity(
            &candidate("C", Category::Exercise),
            &weather(24.0, Condition::Sunny),
            Some(&profile),
        );
        assert_eq!(leisure.score, 60);
        assert_eq!(exercise.score, 50);
    }

    #[test]
    fn unmatched_profile_ranks_like_no_profile() {
        let catalog = vec![
            candidate("A", Category::Outdoor),
            candidate("B", Category::Indoor),
            candidate("C", Category::Exercise),
            candidate("D", Category::Leisure),
        ];
        let profile = UserProfile {
            activity_level: Some(ActivityLevel::Moderate),
            goals: vec!["sleep better".to_string()],
        };
        let conditions = weather(16.0, Condition::Cloudy);

        assert_eq!(
            rank_activities(&catalog, &conditions, Some(&profile)),
            rank_activities(&catalog, &conditions, None)
        );
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = vec![
            candidate("a", Category::Leisure),
            candidate("x", Category::Outdoor),
            candidate("b", Category::Leisure),
            candidate("y", Category::Indoor),
            candidate("c", Category::Leisure),
        ];
        let ranked = rank_activities(&catalog, &weather(24.0, Condition::Sunny), None);

        assert_eq!(
            scores(&ranked),
            vec![("x", 85), ("a", 50), ("b", 50), ("y", 50), ("c", 50)]
        );
    }

    #[test]
    fn ties_behind_a_promoted_entry_keep_catalog_order() {
        let catalog = vec![
            candidate("a", Category::Leisure),
            candidate("b", Category::Exercise),
            candidate("y", Category::Indoor),
            candidate("c", Category::Leisure),
            candidate("x", Category::Outdoor),
        ];
        let ranked = rank_activities(&catalog, &weather(24.0, Condition::Rainy), None);

        assert_eq!(
            scores(&ranked),
            vec![("y", 75), ("a", 50), ("b", 50), ("c", 50), ("x", 10)]
        );
    }

    #[test]
    fn scores_always_within_bounds() {
        let catalog = vec![
            candidate("A", Category::Outdoor),
            candidate("B", Category::Indoor),
            candidate("C", Category::Exercise),
            candidate("D", Category::Leisure),
        ];
        let profile = UserProfile {
            activity_level: Some(ActivityLevel::VeryActive),
            goals: vec!["lose weight".to_string()],
        };
        let conditions = [Condition::Sunny, Condition::Rainy, Condition::Cloudy, Condition::Other];

        for temperature in [-30.0, 0.0, 12.0, 18.0, 24.0, 31.0, 50.0] {
            for condition in conditions {
                for entry in rank_activities(&catalog, &weather(temperature, condition), Some(&profile))
                {
                    assert!(entry.score <= 100);
                }
            }
        }
    }

    #[test]
    fn empty_catalog_ranks_nothing() {
        assert!(rank_activities(&[], &weather(24.0, Condition::Sunny), None).is_empty());
    }

    #[test]
    fn verdict_follows_thresholds() {
        assert_eq!(weather_verdict(&weather(24.0, Condition::Rainy)).0, FavorabilityBand::Poor);
        assert_eq!(
            weather_verdict(&weather(24.0, Condition::PartlyCloudy)).0,
            FavorabilityBand::Excellent
        );
        assert_eq!(weather_verdict(&weather(31.0, Condition::Sunny)).0, FavorabilityBand::Good);
        assert_eq!(weather_verdict(&weather(5.0, Condition::Cloudy)).0, FavorabilityBand::Fair);
    }

    #[test]
    fn summaries_count_and_average_per_category() {
        let catalog = vec![
            candidate("A", Category::Outdoor),
            candidate("B", Category::Indoor),
            candidate("E", Category::Outdoor),
        ];
        let ranked = rank_activities(&catalog, &weather(24.0, Condition::Rainy), None);
        let summaries = summarize_by_category(&ranked);

        assert_eq!(summaries[0].category, Category::Outdoor);
        assert_eq!(summaries[0].count, 2);
        assert!((summaries[0].avg_score - 10.0).abs() < 0.001);
        assert_eq!(summaries[1].category, Category::Indoor);
        assert!((summaries[1].avg_score - 75.0).abs() < 0.001);
    }
}
