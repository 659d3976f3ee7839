//! Player preferences
//!
//! Difficulty and sound choices, persisted as two independent entries in a
//! key/value store (LocalStorage on the web, a map everywhere else).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use crate::sim::DifficultyLevel;

/// Global sound mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SoundMode {
    #[default]
    On,
    Off,
    /// Per-category toggles decide
    Custom,
}

impl SoundMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundMode::On => "On",
            SoundMode::Off => "Off",
            SoundMode::Custom => "Custom",
        }
    }
}

/// Sound categories that can be toggled individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCategory {
    Jump,
    Landing,
    Ui,
    Music,
}

/// Per-category toggles used in custom mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomSounds {
    pub jump: bool,
    pub landing: bool,
    pub ui: bool,
    pub music: bool,
}

impl Default for CustomSounds {
    fn default() -> Self {
        Self {
            jump: true,
            landing: true,
            ui: true,
            music: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SoundSettings {
    pub mode: SoundMode,
    pub custom: CustomSounds,
}

impl SoundSettings {
    pub fn is_category_enabled(&self, category: SoundCategory) -> bool {
        match self.mode {
            SoundMode::Off => false,
            SoundMode::On => true,
            SoundMode::Custom => match category {
                SoundCategory::Jump => self.custom.jump,
                SoundCategory::Landing => self.custom.landing,
                SoundCategory::Ui => self.custom.ui,
                SoundCategory::Music => self.custom.music,
            },
        }
    }
}

/// String key/value persistence
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage; reads and writes silently no-op when unavailable
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl SettingsStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to write {key} to LocalStorage");
            }
        }
    }
}

/// Everything the player can choose outside of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub difficulty: DifficultyLevel,
    pub sound: SoundSettings,
}

impl Settings {
    pub const DIFFICULTY_KEY: &'static str = "chromask_difficulty";
    pub const SOUND_KEY: &'static str = "chromask_sound_settings";

    /// Load both entries; anything missing or unreadable falls back to its default
    pub fn load(store: &impl SettingsStore) -> Self {
        let difficulty = match store.get(Self::DIFFICULTY_KEY) {
            Some(raw) => DifficultyLevel::from_str(&raw).unwrap_or_else(|| {
                log::warn!("Unknown difficulty {raw:?}, using Medium");
                DifficultyLevel::Medium
            }),
            None => DifficultyLevel::default(),
        };

        let sound = match store.get(Self::SOUND_KEY) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Failed to parse sound settings ({e}), using defaults");
                SoundSettings::default()
            }),
            None => SoundSettings::default(),
        };

        log::info!(
            "Loaded settings: difficulty={}, sound={}",
            difficulty.label(),
            sound.mode.as_str()
        );
        Self { difficulty, sound }
    }

    pub fn save(&self, store: &mut impl SettingsStore) {
        store.set(Self::DIFFICULTY_KEY, self.difficulty.as_str());
        match serde_json::to_string(&self.sound) {
            Ok(json) => store.set(Self::SOUND_KEY, &json),
            Err(e) => log::warn!("Failed to serialize sound settings: {e}"),
        }
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_gives_defaults() {
        let settings = Settings::load(&MemoryStore::default());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.difficulty, DifficultyLevel::Medium);
        assert_eq!(settings.sound.mode, SoundMode::On);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::default();
        let settings = Settings {
            difficulty: DifficultyLevel::VeryHard,
            sound: SoundSettings {
                mode: SoundMode::Custom,
                custom: CustomSounds {
                    music: false,
                    ..Default::default()
                },
            },
        };
        settings.save(&mut store);

        assert_eq!(store.get(Settings::DIFFICULTY_KEY).as_deref(), Some("very_hard"));
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_unknown_difficulty_falls_back_to_medium() {
        let mut store = MemoryStore::default();
        store.set(Settings::DIFFICULTY_KEY, "nightmare");
        assert_eq!(Settings::load(&store).difficulty, DifficultyLevel::Medium);
    }

    #[test]
    fn test_garbage_sound_json_falls_back() {
        let mut store = MemoryStore::default();
        store.set(Settings::DIFFICULTY_KEY, "hard");
        store.set(Settings::SOUND_KEY, "{not json");
        let settings = Settings::load(&store);
        assert_eq!(settings.difficulty, DifficultyLevel::Hard);
        assert_eq!(settings.sound, SoundSettings::default());
    }

    #[test]
    fn test_partial_sound_json_merges_onto_defaults() {
        let mut store = MemoryStore::default();
        store.set(Settings::SOUND_KEY, r#"{"mode":"custom","custom":{"jump":false}}"#);
        let sound = Settings::load(&store).sound;
        assert_eq!(sound.mode, SoundMode::Custom);
        assert!(!sound.custom.jump);
        assert!(sound.custom.landing && sound.custom.ui && sound.custom.music);
    }

    #[test]
    fn test_category_gating() {
        let mut sound = SoundSettings::default();
        assert!(sound.is_category_enabled(SoundCategory::Music));

        sound.mode = SoundMode::Off;
        assert!(!sound.is_category_enabled(SoundCategory::Jump));

        sound.mode = SoundMode::Custom;
        sound.custom.landing = false;
        assert!(sound.is_category_enabled(SoundCategory::Jump));
        assert!(!sound.is_category_enabled(SoundCategory::Landing));
    }
}
