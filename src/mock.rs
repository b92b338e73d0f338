use std::io::Read;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveTime;
use uuid::Uuid;

use crate::models::{
    CandidateActivity, Category, Condition, HourlySlot, ScheduledActivity, WeatherContext,
};

pub fn current_weather() -> WeatherContext {
    WeatherContext {
        temperature: 24.0,
        condition: Condition::PartlyCloudy,
        humidity: 65,
        wind_speed: 12.0,
    }
}

pub fn default_catalog() -> Vec<CandidateActivity> {
    let entries = [
        (
            "1",
            "Walk in the park",
            "Enjoy the fresh air with a relaxing walk",
            "07:00 - 09:00",
            "45 min",
            "Nearby park",
            Category::Outdoor,
        ),
        (
            "2",
            "Morning yoga",
            "Yoga session to start the day with energy",
            "06:30 - 07:30",
            "60 min",
            "At home",
            Category::Exercise,
        ),
        (
            "3",
            "Outdoor reading",
            "Unwind with a good book",
            "16:00 - 18:00",
            "90 min",
            "Garden or balcony",
            Category::Leisure,
        ),
        (
            "4",
            "Gym workout",
            "Full strength and cardio routine",
            "18:00 - 19:30",
            "90 min",
            "Gym",
            Category::Indoor,
        ),
        (
            "5",
            "City cycling",
            "Bike ride through the city",
            "17:00 - 19:00",
            "120 min",
            "Bike lanes",
            Category::Outdoor,
        ),
    ];

    entries
        .into_iter()
        .map(
            |(id, title, description, best_time, duration, location, category)| CandidateActivity {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                best_time: best_time.to_string(),
                duration: duration.to_string(),
                location: location.to_string(),
                category,
            },
        )
        .collect()
}

/// Reads a catalog from CSV with the header
/// `id,title,description,best_time,duration,location,category`.
pub fn import_catalog(csv_path: &Path) -> anyhow::Result<Vec<CandidateActivity>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open catalog {}", csv_path.display()))?;
    read_catalog(file).with_context(|| format!("invalid catalog {}", csv_path.display()))
}

pub fn read_catalog<R: Read>(input: R) -> anyhow::Result<Vec<CandidateActivity>> {
    let mut reader = csv::Reader::from_reader(input);
    let mut catalog = Vec::new();

    for result in reader.deserialize::<CandidateActivity>() {
        catalog.push(result?);
    }

    Ok(catalog)
}

pub fn hourly_forecast() -> Vec<HourlySlot> {
    use Condition::{Cloudy, PartlyCloudy, Rainy, Sunny};

    let rows: [(u32, i32, Condition, u8, u8, u8); 19] = [
        (5, 14, Sunny, 0, 8, 60),
        (6, 15, Sunny, 0, 10, 58),
        (7, 16, PartlyCloudy, 5, 12, 62),
        (8, 17, PartlyCloudy, 10, 14, 65),
        (9, 18, Cloudy, 15, 16, 70),
        (10, 19, Cloudy, 20, 18, 72),
        (11, 20, Cloudy, 25, 20, 75),
        (12, 21, Rainy, 30, 22, 78),
        (13, 20, Rainy, 35, 20, 80),
        (14, 19, Rainy, 45, 18, 85),
        (15, 18, Rainy, 50, 16, 88),
        (16, 17, Cloudy, 30, 16, 82),
        (17, 17, Cloudy, 20, 16, 79),
        (18, 18, PartlyCloudy, 15, 14, 75),
        (19, 19, PartlyCloudy, 10, 12, 70),
        (20, 20, Sunny, 5, 10, 65),
        (21, 19, Sunny, 0, 8, 60),
        (22, 18, Sunny, 0, 6, 58),
        (23, 17, Sunny, 0, 4, 55),
    ];

    rows.into_iter()
        .map(
            |(hour, temperature, condition, precipitation, wind_speed, humidity)| HourlySlot {
                hour,
                temperature,
                condition,
                precipitation,
                wind_speed,
                humidity,
            },
        )
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleTemplate {
    pub title: &'static str,
    pub location: &'static str,
    pub description: &'static str,
    pub duration_minutes: u32,
}

pub const SCHEDULE_TEMPLATES: &[ScheduleTemplate] = &[
    ScheduleTemplate {
        title: "Morning yoga",
        location: "Zen Studio",
        description: "Yoga class to start the day with energy",
        duration_minutes: 60,
    },
    ScheduleTemplate {
        title: "Bike ride",
        location: "Waterfront",
        description: "Coastal bike tour",
        duration_minutes: 45,
    },
    ScheduleTemplate {
        title: "Reading session",
        location: "Municipal Library",
        description: "Time dedicated to reading and learning",
        duration_minutes: 90,
    },
    ScheduleTemplate {
        title: "Swimming classes",
        location: "Sports Club",
        description: "Swimming training",
        duration_minutes: 60,
    },
    ScheduleTemplate {
        title: "Coffee with friends",
        location: "Downtown Café",
        description: "Casual meeting with friends",
        duration_minutes: 60,
    },
    ScheduleTemplate {
        title: "Market shopping",
        location: "Central Market",
        description: "Shopping for fresh and healthy food",
        duration_minutes: 45,
    },
    ScheduleTemplate {
        title: "Photography session",
        location: "Historic Park",
        description: "Outdoor photography practice",
        duration_minutes: 120,
    },
    ScheduleTemplate {
        title: "Cooking class",
        location: "Culinary School",
        description: "Learn new recipes and culinary techniques",
        duration_minutes: 90,
    },
];

pub fn seed_schedule() -> anyhow::Result<Vec<ScheduledActivity>> {
    let entries = [
        ("Work meeting", 9, "Central Office", "Q4 project review with development team", 60),
        ("Run in the park", 17, "Central Park", "5km running routine", 30),
        (
            "Lunch with client",
            13,
            "La Plaza Restaurant",
            "Discuss collaboration proposal for next year",
            90,
        ),
        ("Family dinner", 20, "Home", "Dinner with family", 120),
    ];

    let mut activities = Vec::with_capacity(entries.len());
    for (title, hour, location, description, duration_minutes) in entries {
        activities.push(ScheduledActivity {
            id: Uuid::new_v4(),
            title: title.to_string(),
            start: NaiveTime::from_hms_opt(hour, 0, 0).context("invalid time")?,
            location: Some(location.to_string()),
            description: Some(description.to_string()),
            duration_minutes,
        });
    }

    Ok(activities)
}
