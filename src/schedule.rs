use chrono::{Duration, NaiveDate, NaiveTime};
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::mock::ScheduleTemplate;
use crate::models::ScheduledActivity;

#[derive(Debug, Clone)]
pub struct DailySchedule {
    pub date: NaiveDate,
    activities: Vec<ScheduledActivity>,
}

impl DailySchedule {
    pub fn new(date: NaiveDate, activities: Vec<ScheduledActivity>) -> Self {
        Self { date, activities }
    }

    /// Activities in start-time order; equal start times keep insertion order.
    pub fn sorted(&self) -> Vec<&ScheduledActivity> {
        let mut sorted: Vec<&ScheduledActivity> = self.activities.iter().collect();
        sorted.sort_by_key(|activity| activity.start);
        sorted
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Appends a random template at a random half-hour between 06:00 and 23:30.
    pub fn add_random<R: Rng>(
        &mut self,
        rng: &mut R,
        templates: &[ScheduleTemplate],
    ) -> Option<&ScheduledActivity> {
        if templates.is_empty() {
            return None;
        }

        let template = templates[rng.gen_range(0..templates.len())];
        let hour = rng.gen_range(6..=23);
        let minute = if rng.gen_bool(0.5) { 0 } else { 30 };
        let start = NaiveTime::from_hms_opt(hour, minute, 0)?;

        debug!(title = template.title, %start, "adding random activity");
        self.activities.push(ScheduledActivity {
            id: Uuid::new_v4(),
            title: template.title.to_string(),
            start,
            location: Some(template.location.to_string()),
            description: Some(template.description.to_string()),
            duration_minutes: template.duration_minutes,
        });
        self.activities.last()
    }
}

/// Header label for a schedule day, relative to `today`.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "TODAY".to_string()
    } else if date == today + Duration::days(1) {
        "TOMORROW".to_string()
    } else {
        date.format("%A, %B %-d").to_string().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::mock::{seed_schedule, SCHEDULE_TEMPLATES};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn sorts_by_start_time() {
        let schedule = DailySchedule::new(date(2026, 10, 18), seed_schedule().expect("seed"));
        let titles: Vec<&str> = schedule
            .sorted()
            .iter()
            .map(|activity| activity.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["Work meeting", "Lunch with client", "Run in the park", "Family dinner"]
        );
    }

    #[test]
    fn random_additions_land_on_half_hours() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut schedule = DailySchedule::new(date(2026, 10, 18), Vec::new());

        for _ in 0..20 {
            let added = schedule
                .add_random(&mut rng, SCHEDULE_TEMPLATES)
                .expect("template available");
            let start = added.start;
            assert!(start >= NaiveTime::from_hms_opt(6, 0, 0).expect("time"));
            assert!(start <= NaiveTime::from_hms_opt(23, 30, 0).expect("time"));
            assert!(start.format("%M").to_string() == "00" || start.format("%M").to_string() == "30");
        }
        assert_eq!(schedule.len(), 20);
    }

    #[test]
    fn no_templates_adds_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut schedule = DailySchedule::new(date(2026, 10, 18), Vec::new());
        assert!(schedule.add_random(&mut rng, &[]).is_none());
        assert!(schedule.is_empty());
    }

    #[test]
    fn labels_relative_days() {
        let today = date(2026, 10, 18);
        assert_eq!(day_label(today, today), "TODAY");
        assert_eq!(day_label(date(2026, 10, 19), today), "TOMORROW");
        assert_eq!(day_label(date(2026, 10, 21), today), "WEDNESDAY, OCTOBER 21");
    }
}
