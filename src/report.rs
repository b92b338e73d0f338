use std::fmt::Write;

use chrono::NaiveDate;

use crate::forecast;
use crate::models::{CandidateActivity, DayFavorability, UserProfile, WeatherContext};
use crate::scoring;

pub struct ReportInput<'a> {
    pub owner: Option<&'a str>,
    pub reference: NaiveDate,
    pub activity_type: &'a str,
    pub weather: &'a WeatherContext,
    pub profile: Option<&'a UserProfile>,
    pub catalog: &'a [CandidateActivity],
    pub calendar: &'a [DayFavorability],
}

pub fn build_report(input: &ReportInput<'_>) -> String {
    let ranked = scoring::rank_activities(input.catalog, input.weather, input.profile);
    let summaries = scoring::summarize_by_category(&ranked);
    let (verdict, verdict_note) = scoring::weather_verdict(input.weather);

    let mut output = String::new();
    let owner_label = input.owner.unwrap_or("guest");

    let _ = writeln!(output, "# Daily Activity Report");
    let _ = writeln!(
        output,
        "Generated for {} on {}",
        owner_label, input.reference
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Current Weather");
    let _ = writeln!(
        output,
        "- {} at {:.0}°C, humidity {}%, wind {:.0} km/h",
        input.weather.condition,
        input.weather.temperature,
        input.weather.humidity,
        input.weather.wind_speed
    );
    let _ = writeln!(output, "- Verdict: {} ({})", verdict, verdict_note);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommended Activities");

    if ranked.is_empty() {
        let _ = writeln!(output, "No activities in the catalog.");
    } else {
        for (rank, entry) in ranked.iter().enumerate() {
            let _ = writeln!(
                output,
                "{}. {} ({}) score {}% at {}: {}",
                rank + 1,
                entry.activity.title,
                entry.activity.category,
                entry.score,
                entry.activity.best_time,
                entry.reason
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Category Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No activities scored.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} activities (avg score {:.1})",
                summary.category, summary.count, summary.avg_score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Best Days for {}", input.activity_type);

    let best_days = forecast::best_upcoming_days(input.calendar, input.reference, 3);
    if best_days.is_empty() {
        let _ = writeln!(output, "No upcoming days in the calendar.");
    } else {
        for day in best_days.iter() {
            let _ = writeln!(
                output,
                "- {}: {}% ({}), {}°C {}",
                day.date.format("%A %-d %b"),
                day.score,
                day.band,
                day.temperature,
                day.condition
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::band_for_score;
    use crate::mock;
    use crate::models::Condition;

    fn calendar(reference: NaiveDate, scores: &[u8]) -> Vec<DayFavorability> {
        scores
            .iter()
            .enumerate()
            .map(|(offset, &score)| DayFavorability {
                date: reference + chrono::Duration::days(offset as i64 - 1),
                temperature: 22,
                condition: Condition::Sunny,
                score,
                band: band_for_score(score),
            })
            .collect()
    }

    #[test]
    fn report_lists_ranking_and_best_days() {
        let reference = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
        let weather = WeatherContext {
            temperature: 24.0,
            condition: Condition::Rainy,
            humidity: 85,
            wind_speed: 16.0,
        };
        let catalog = mock::default_catalog();
        let days = calendar(reference, &[99, 10, 85, 40]);

        let report = build_report(&ReportInput {
            owner: Some("Avery Lee"),
            reference,
            activity_type: "running",
            weather: &weather,
            profile: None,
            catalog: &catalog,
            calendar: &days,
        });

        assert!(report.contains("Generated for Avery Lee on 2026-10-18"));
        assert!(report.contains("1. Gym workout (indoor) score 75%"));
        assert!(report.contains("Verdict: poor"));
        assert!(report.contains("## Best Days for running"));
        assert!(report.contains("- Monday 19 Oct: 85% (excellent)"));
        assert!(!report.contains("99%"));
    }

    #[test]
    fn empty_inputs_render_placeholders() {
        let reference = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
        let weather = mock::current_weather();

        let report = build_report(&ReportInput {
            owner: None,
            reference,
            activity_type: "walking",
            weather: &weather,
            profile: None,
            catalog: &[],
            calendar: &[],
        });

        assert!(report.contains("Generated for guest"));
        assert!(report.contains("No activities in the catalog."));
        assert!(report.contains("No upcoming days in the calendar."));
    }
}
