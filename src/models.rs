use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Other,
}

impl Condition {
    /// Reads a free-text condition label, English or Spanish. Matching is
    /// by substring, so any label containing "sun" or "sol" reads as sunny
    /// unless a rain or partly-cloudy keyword wins first. Anything
    /// unrecognized becomes `Other`, which no weather rule matches.
    pub fn parse(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|needle| label.contains(needle));

        if has(&["rain", "lluvia", "drizzle", "storm", "shower"]) {
            Condition::Rainy
        } else if has(&["partly", "parcial"]) {
            Condition::PartlyCloudy
        } else if has(&["sun", "sol", "clear", "despejado"]) {
            Condition::Sunny
        } else if has(&["cloud", "nublado", "overcast"]) {
            Condition::Cloudy
        } else {
            Condition::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::PartlyCloudy => "Partly cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::Rainy => "Rain",
            Condition::Other => "Unknown",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherContext {
    pub temperature: f64,
    pub condition: Condition,
    pub humidity: u8,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Accepts the questionnaire wording in English or Spanish. Unknown text
    /// yields `None` so the profile still scores, just without a level bonus.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "sedentary" | "sedentario" => Some(ActivityLevel::Sedentary),
            "moderate" | "moderado" => Some(ActivityLevel::Moderate),
            "active" | "activo" => Some(ActivityLevel::Active),
            "very active" | "very-active" | "muy activo" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very active",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub activity_level: Option<ActivityLevel>,
    pub goals: Vec<String>,
}

impl UserProfile {
    pub fn has_goal(&self, goal: &str) -> bool {
        self.goals
            .iter()
            .any(|candidate| candidate.trim().eq_ignore_ascii_case(goal))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Outdoor,
    Indoor,
    Exercise,
    Leisure,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Outdoor => "outdoor",
            Category::Indoor => "indoor",
            Category::Exercise => "exercise",
            Category::Leisure => "leisure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateActivity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub best_time: String,
    pub duration: String,
    pub location: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredActivity {
    pub activity: CandidateActivity,
    pub score: u8,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub category: Category,
    pub count: usize,
    pub avg_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavorabilityBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl FavorabilityBand {
    pub fn label(self) -> &'static str {
        match self {
            FavorabilityBand::Excellent => "excellent",
            FavorabilityBand::Good => "good",
            FavorabilityBand::Fair => "fair",
            FavorabilityBand::Poor => "poor",
        }
    }
}

impl fmt::Display for FavorabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayFavorability {
    pub date: NaiveDate,
    pub temperature: i32,
    pub condition: Condition,
    pub score: u8,
    pub band: FavorabilityBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub weekday: String,
    pub max_temp_c: i32,
    pub min_temp_c: i32,
    pub condition: String,
    pub rain_probability: u8,
    pub humidity: u8,
    pub wind_kmh: u8,
    pub uv: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlySlot {
    pub hour: u32,
    pub temperature: i32,
    pub condition: Condition,
    pub precipitation: u8,
    pub wind_speed: u8,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledActivity {
    pub id: Uuid,
    pub title: String,
    pub start: NaiveTime,
    pub location: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: u32,
}
