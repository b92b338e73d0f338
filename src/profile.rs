use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{ActivityLevel, UserProfile};

pub const PROFILE_KEY: &str = "userProfile";
pub const ONBOARDING_KEY: &str = "onboardingComplete";

/// Answers collected by the onboarding questionnaire. Every field is
/// optional on read so older or partial records still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub name: String,
    pub city: String,
    pub health_conditions: Vec<String>,
    pub medications: String,
    pub climate_affects: String,
    pub outdoor_activities: Vec<String>,
    pub climate_influence: String,
    pub alert_types: Vec<String>,
    pub notification_frequency: String,
    pub favorite_climate: String,
    pub activity_level: Option<String>,
    pub goals: Vec<String>,
}

impl OnboardingProfile {
    pub fn scoring_profile(&self) -> UserProfile {
        UserProfile {
            activity_level: self
                .activity_level
                .as_deref()
                .and_then(ActivityLevel::parse),
            goals: self
                .goals
                .iter()
                .map(|goal| goal.trim().to_string())
                .filter(|goal| !goal.is_empty())
                .collect(),
        }
    }
}

pub fn demo_profile() -> OnboardingProfile {
    OnboardingProfile {
        name: "Avery Lee".to_string(),
        city: "Lima".to_string(),
        health_conditions: vec!["Allergies (pollen, dust, mold)".to_string()],
        medications: "No".to_string(),
        climate_affects: "High humidity or rain".to_string(),
        outdoor_activities: vec![
            "Physical exercise or sports".to_string(),
            "Walks or hiking".to_string(),
        ],
        climate_influence: "Sometimes, depending on the type of activity".to_string(),
        alert_types: vec!["Rain alerts".to_string()],
        notification_frequency: "Daily".to_string(),
        favorite_climate: "Sunny and mild".to_string(),
        activity_level: Some("very active".to_string()),
        goals: vec!["lose weight".to_string()],
    }
}

/// String-keyed store persisted as one JSON object on disk.
#[derive(Debug)]
pub struct KeyValueStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl KeyValueStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let entries: BTreeMap<String, String> = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read store {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("store {} is not a JSON object", path.display()))?
        } else {
            debug!(path = %path.display(), "store not found, starting empty");
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write store {}", self.path.display()))?;
        Ok(())
    }
}

/// The stored profile, if onboarding finished and the record parses.
pub fn load_profile(store: &KeyValueStore) -> Option<OnboardingProfile> {
    if store.get(ONBOARDING_KEY) != Some("true") {
        return None;
    }

    let raw = store.get(PROFILE_KEY)?;
    match serde_json::from_str(raw) {
        Ok(profile) => Some(profile),
        Err(err) => {
            warn!(error = %err, "stored profile is unreadable, scoring without it");
            None
        }
    }
}

/// Read-only lookup for commands that only score. An unreadable store is
/// logged and treated as "no profile" so scoring falls back to the baseline.
pub fn read_profile(path: &Path) -> Option<OnboardingProfile> {
    match KeyValueStore::open(path) {
        Ok(store) => load_profile(&store),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "profile store is unreadable, scoring without it");
            None
        }
    }
}

pub fn save_profile(store: &mut KeyValueStore, profile: &OnboardingProfile) -> anyhow::Result<()> {
    store.set(PROFILE_KEY, serde_json::to_string(profile)?);
    store.set(ONBOARDING_KEY, "true");
    store.save()
}
