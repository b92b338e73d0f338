use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Condition, DayFavorability, FavorabilityBand, ForecastRow, HourlySlot};

pub const CALENDAR_DAYS: i64 = 14;
pub const CALENDAR_LEAD_DAYS: i64 = 3;

const CALENDAR_CONDITIONS: [Condition; 3] =
    [Condition::Sunny, Condition::PartlyCloudy, Condition::Cloudy];
const FORECAST_CONDITIONS: [Condition; 4] = [
    Condition::Sunny,
    Condition::PartlyCloudy,
    Condition::Cloudy,
    Condition::Rainy,
];

/// Source of per-day favorability for calendar cells. The shipped
/// implementation is simulated; a forecast-backed one slots in here.
pub trait WeatherForecastProvider {
    fn score_day(&mut self, date: NaiveDate, activity_category: &str) -> DayFavorability;
}

pub struct RandomForecastProvider<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomForecastProvider<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomForecastProvider<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WeatherForecastProvider for RandomForecastProvider<R> {
    fn score_day(&mut self, date: NaiveDate, activity_category: &str) -> DayFavorability {
        let base: f64 = self.rng.gen_range(30.0..70.0);
        let weekend_bonus: f64 = if is_weekend(date) { 15.0 } else { 0.0 };
        let activity_bonus: f64 = if is_outdoor_activity(activity_category) {
            self.rng.gen_range(0.0..20.0)
        } else {
            10.0
        };
        let score = (base + weekend_bonus + activity_bonus).round().min(100.0) as u8;
        let temperature = (18.0 + self.rng.gen_range(0.0..12.0_f64)).round() as i32;
        let condition = CALENDAR_CONDITIONS[self.rng.gen_range(0..CALENDAR_CONDITIONS.len())];

        DayFavorability {
            date,
            temperature,
            condition,
            score,
            band: band_for_score(score),
        }
    }
}

pub fn band_for_score(score: u8) -> FavorabilityBand {
    match score {
        80..=u8::MAX => FavorabilityBand::Excellent,
        60..=79 => FavorabilityBand::Good,
        40..=59 => FavorabilityBand::Fair,
        _ => FavorabilityBand::Poor,
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn is_outdoor_activity(activity_category: &str) -> bool {
    let text = activity_category.to_lowercase();
    text.contains("outdoor") || text.contains("exterior")
}

/// Fourteen consecutive days starting three days before `reference`. Bands
/// are re-derived from each score so a provider cannot hand back a mismatch.
pub fn build_calendar<P>(
    provider: &mut P,
    reference: NaiveDate,
    activity_category: &str,
) -> Vec<DayFavorability>
where
    P: WeatherForecastProvider + ?Sized,
{
    let start = reference - Duration::days(CALENDAR_LEAD_DAYS);

    (0..CALENDAR_DAYS)
        .map(|offset| {
            let mut day = provider.score_day(start + Duration::days(offset), activity_category);
            day.score = day.score.min(100);
            day.band = band_for_score(day.score);
            day
        })
        .collect()
}

pub fn best_upcoming_days(
    days: &[DayFavorability],
    reference: NaiveDate,
    count: usize,
) -> Vec<DayFavorability> {
    let mut upcoming: Vec<DayFavorability> = days
        .iter()
        .filter(|day| day.date > reference)
        .cloned()
        .collect();

    upcoming.sort_by(|a, b| b.score.cmp(&a.score));
    upcoming.truncate(count);
    upcoming
}

pub fn uv_label(index: u8) -> &'static str {
    match index {
        0..=2 => "Low",
        3..=5 => "Moderate",
        6..=7 => "High",
        8..=10 => "Very High",
        _ => "Extreme",
    }
}

/// Synthetic daily forecast rows for the export, one per day from `start`.
pub fn generate_forecast_rows<R: Rng>(rng: &mut R, start: NaiveDate, days: i64) -> Vec<ForecastRow> {
    (0..days.max(0))
        .map(|offset| {
            let date = start + Duration::days(offset);
            let condition = FORECAST_CONDITIONS[rng.gen_range(0..FORECAST_CONDITIONS.len())];
            let max_temp_c: i32 = rng.gen_range(16..=30);
            let min_temp_c = max_temp_c - rng.gen_range(4..=9);
            let (rain_probability, uv_index): (u8, u8) = match condition {
                Condition::Sunny => (rng.gen_range(0..=10), rng.gen_range(6..=11)),
                Condition::PartlyCloudy => (rng.gen_range(10..=30), rng.gen_range(3..=7)),
                Condition::Cloudy => (rng.gen_range(20..=50), rng.gen_range(1..=4)),
                Condition::Rainy | Condition::Other => (rng.gen_range(60..=95), rng.gen_range(0..=2)),
            };
            let humidity: u8 = if condition == Condition::Rainy {
                rng.gen_range(70..=95)
            } else {
                rng.gen_range(45..=80)
            };

            ForecastRow {
                date,
                weekday: date.format("%A").to_string(),
                max_temp_c,
                min_temp_c,
                condition: condition.label().to_string(),
                rain_probability,
                humidity,
                wind_kmh: rng.gen_range(5..=30),
                uv: uv_label(uv_index).to_string(),
            }
        })
        .collect()
}

pub fn precipitation_band(precipitation: u8) -> FavorabilityBand {
    match precipitation {
        0 => FavorabilityBand::Excellent,
        1..=15 => FavorabilityBand::Good,
        16..=30 => FavorabilityBand::Fair,
        _ => FavorabilityBand::Poor,
    }
}

/// The `count` driest hours, earliest first among equals, returned in clock order.
pub fn best_hours(slots: &[HourlySlot], count: usize) -> Vec<&HourlySlot> {
    let mut driest: Vec<&HourlySlot> = slots.iter().collect();
    driest.sort_by_key(|slot| (slot.precipitation, slot.hour));
    driest.truncate(count);
    driest.sort_by_key(|slot| slot.hour);
    driest
}
