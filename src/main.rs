use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod forecast;
mod mock;
mod models;
mod profile;
mod report;
mod schedule;
mod scoring;

use crate::config::AppConfig;
use crate::forecast::{RandomForecastProvider, WeatherForecastProvider};
use crate::models::{Condition, WeatherContext};
use crate::profile::{KeyValueStore, OnboardingProfile};

#[derive(Parser)]
#[command(name = "rainup-planner")]
#[command(about = "Weather-aware activity planner and recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a demo onboarding profile
    Seed,
    /// Record onboarding answers
    Onboard {
        #[arg(long)]
        name: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        activity_level: Option<String>,
        #[arg(long = "goal")]
        goals: Vec<String>,
        #[arg(long = "health-condition")]
        health_conditions: Vec<String>,
        #[arg(long = "outdoor-activity")]
        outdoor_activities: Vec<String>,
        #[arg(long)]
        favorite_climate: Option<String>,
    },
    /// Show the stored profile
    Profile,
    /// Rank activities for the current weather
    Recommend {
        #[command(flatten)]
        weather: WeatherArgs,
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long, default_value_t = 3)]
        limit: usize,
        #[arg(long)]
        all: bool,
        #[arg(long)]
        no_profile: bool,
    },
    /// Favorability calendar for the next two weeks
    Calendar {
        #[arg(long, default_value = "outdoor walk")]
        activity: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Hourly precipitation outlook and the best hours today
    Hourly {
        #[arg(long, default_value_t = 2)]
        best: usize,
    },
    /// Show the daily schedule
    Schedule {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value_t = 0)]
        add: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Export a synthetic 14-day forecast as CSV
    Export {
        #[arg(long, default_value = "forecast.csv")]
        out: PathBuf,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        weather: WeatherArgs,
        #[arg(long, default_value = "outdoor walk")]
        activity: String,
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[derive(clap::Args)]
struct WeatherArgs {
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f64>,
    #[arg(long)]
    condition: Option<String>,
    #[arg(long)]
    humidity: Option<u8>,
    #[arg(long)]
    wind: Option<f64>,
}

impl WeatherArgs {
    fn resolve(&self) -> WeatherContext {
        let mut weather = mock::current_weather();
        if let Some(temperature) = self.temperature {
            weather.temperature = temperature;
        }
        if let Some(condition) = self.condition.as_deref() {
            weather.condition = Condition::parse(condition);
        }
        if let Some(humidity) = self.humidity {
            weather.humidity = humidity;
        }
        if let Some(wind) = self.wind {
            weather.wind_speed = wind;
        }
        weather
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn make_provider(seed: Option<u64>) -> RandomForecastProvider<StdRng> {
    match seed {
        Some(seed) => RandomForecastProvider::seeded(seed),
        None => RandomForecastProvider::new(StdRng::from_entropy()),
    }
}

fn open_store(config: &AppConfig) -> anyhow::Result<KeyValueStore> {
    KeyValueStore::open(&config.store_path).context("failed to open the local profile store")
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Vec<models::CandidateActivity>> {
    match path {
        Some(path) => mock::import_catalog(path),
        None => Ok(mock::default_catalog()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Seed => {
            let mut store = open_store(&config)?;
            profile::save_profile(&mut store, &profile::demo_profile())?;
            info!(path = %config.store_path.display(), "demo profile stored");
            println!("Demo profile stored.");
        }
        Commands::Onboard {
            name,
            city,
            activity_level,
            goals,
            health_conditions,
            outdoor_activities,
            favorite_climate,
        } => {
            let answers = OnboardingProfile {
                name,
                city,
                activity_level,
                goals,
                health_conditions,
                outdoor_activities,
                favorite_climate: favorite_climate.unwrap_or_default(),
                ..OnboardingProfile::default()
            };
            let mut store = open_store(&config)?;
            profile::save_profile(&mut store, &answers)?;
            info!(name = %answers.name, "onboarding complete");
            println!("Welcome, {}! Your profile is saved.", answers.name);
        }
        Commands::Profile => match profile::read_profile(&config.store_path) {
            Some(stored) => {
                let scoring_profile = stored.scoring_profile();
                println!("{} ({})", stored.name, stored.city);
                println!(
                    "- activity level: {}",
                    scoring_profile
                        .activity_level
                        .map(|level| level.label())
                        .unwrap_or("not set")
                );
                println!("- goals: {}", join_or_none(&scoring_profile.goals));
                println!("- health conditions: {}", join_or_none(&stored.health_conditions));
                println!("- outdoor activities: {}", join_or_none(&stored.outdoor_activities));
                if !stored.favorite_climate.is_empty() {
                    println!("- favorite climate: {}", stored.favorite_climate);
                }
            }
            None => println!("Onboarding not completed yet. Run `onboard` or `seed`."),
        },
        Commands::Recommend {
            weather,
            catalog,
            limit,
            all,
            no_profile,
        } => {
            let weather = weather.resolve();
            let catalog = load_catalog(catalog.as_deref())?;
            let user_profile = if no_profile {
                None
            } else {
                profile::read_profile(&config.store_path).map(|stored| stored.scoring_profile())
            };
            info!(
                candidates = catalog.len(),
                with_profile = user_profile.is_some(),
                "ranking activities"
            );

            let ranked = scoring::rank_activities(&catalog, &weather, user_profile.as_ref());
            if ranked.is_empty() {
                println!("No activities to recommend.");
                return Ok(());
            }

            let (verdict, note) = scoring::weather_verdict(&weather);
            println!(
                "{} at {:.0}°C: {} ({})",
                weather.condition, weather.temperature, verdict, note
            );
            let shown = if all { ranked.len() } else { limit };
            println!("Recommended activities for today:");
            for (rank, entry) in ranked.iter().take(shown).enumerate() {
                println!(
                    "#{} {} [{}] {}% | {} | {} | {}",
                    rank + 1,
                    entry.activity.title,
                    entry.activity.category,
                    entry.score,
                    entry.activity.best_time,
                    entry.activity.location,
                    entry.reason
                );
            }
            if ranked.len() > shown {
                println!("... {} more (use --all)", ranked.len() - shown);
            }
        }
        Commands::Calendar {
            activity,
            date,
            seed,
        } => {
            let reference = date.unwrap_or(today);
            let mut provider = make_provider(seed);
            let days = forecast::build_calendar(&mut provider, reference, &activity);

            println!("Best days for {activity}:");
            for week in days.chunks(7) {
                let cells: Vec<String> = week
                    .iter()
                    .map(|day| {
                        let marker = if day.date == reference { "*" } else { " " };
                        format!("{}{:>2} {:>3}% {:<9}", marker, day.date.format("%d"), day.score, day.band)
                    })
                    .collect();
                println!("{}", cells.join(" "));
            }
            println!("Upcoming highlights:");
            for day in forecast::best_upcoming_days(&days, reference, 3) {
                println!(
                    "- {}: {}% {}°C {}",
                    day.date.format("%A %-d %b"),
                    day.score,
                    day.temperature,
                    day.condition
                );
            }
        }
        Commands::Hourly { best } => {
            let slots = mock::hourly_forecast();
            for slot in &slots {
                println!(
                    "{:02}:00 {:>3}°C {:<13} rain {:>2}% wind {:>2} km/h humidity {:>2}% [{}]",
                    slot.hour,
                    slot.temperature,
                    slot.condition,
                    slot.precipitation,
                    slot.wind_speed,
                    slot.humidity,
                    forecast::precipitation_band(slot.precipitation)
                );
            }
            let best_slots = forecast::best_hours(&slots, best);
            let hours: Vec<String> = best_slots
                .iter()
                .map(|slot| format!("{:02}:00 ({}% rain)", slot.hour, slot.precipitation))
                .collect();
            println!("Best hours today: {}", hours.join(", "));
        }
        Commands::Schedule { date, add, seed } => {
            let day = date.unwrap_or(today);
            let mut daily = schedule::DailySchedule::new(day, mock::seed_schedule()?);
            let mut rng = make_rng(seed);
            for _ in 0..add {
                daily.add_random(&mut rng, mock::SCHEDULE_TEMPLATES);
            }

            println!(
                "{} ({} activities)",
                schedule::day_label(daily.date, today),
                daily.len()
            );
            if daily.is_empty() {
                println!("Nothing scheduled.");
            }
            for activity in daily.sorted() {
                println!(
                    "{} {} ({} min){}",
                    activity.start.format("%H:%M"),
                    activity.title,
                    activity.duration_minutes,
                    activity
                        .location
                        .as_deref()
                        .map(|location| format!(" @ {location}"))
                        .unwrap_or_default()
                );
            }
        }
        Commands::Export { out, date, seed } => {
            let start = date.unwrap_or(today);
            let rows =
                forecast::generate_forecast_rows(&mut make_rng(seed), start, forecast::CALENDAR_DAYS);
            export::export_forecast(&out, &rows)?;
            info!(rows = rows.len(), path = %out.display(), "forecast exported");
            println!("Forecast written to {}.", out.display());
        }
        Commands::Report {
            weather,
            activity,
            catalog,
            date,
            seed,
            out,
        } => {
            let reference = date.unwrap_or(today);
            let weather = weather.resolve();
            let catalog = load_catalog(catalog.as_deref())?;
            let stored = profile::read_profile(&config.store_path);
            let user_profile = stored.as_ref().map(OnboardingProfile::scoring_profile);

            let mut provider = make_provider(seed);
            let calendar = forecast::build_calendar(
                &mut provider as &mut dyn WeatherForecastProvider,
                reference,
                &activity,
            );

            let report = report::build_report(&report::ReportInput {
                owner: stored.as_ref().map(|profile| profile.name.as_str()),
                reference,
                activity_type: &activity,
                weather: &weather,
                profile: user_profile.as_ref(),
                catalog: &catalog,
                calendar: &calendar,
            });
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}
