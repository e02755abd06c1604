// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Viewer settings.
//!
//! Settings are a flat, ordered map of typed values. Each key carries a type
//! tag fixed by the built-in defaults, and assignments that do not match the
//! tag are rejected. The map is stored with `confy` as one `[value, "tag"]`
//! pair per key.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, de::IgnoredAny};
use thiserror::Error;

pub(crate) const CONFIG_NAME: &str = "antcode-viewer";
const SETTINGS_NAME: &str = "settings";

pub(crate) const PAUSE_ON_STEP: &str = "pauseOnStep";
pub(crate) const STEPS_PER_SECOND: &str = "stepsPerSecond";
pub(crate) const CELL_SIZE: &str = "cellSize";
pub(crate) const AUTO_SAVE: &str = "autoSave";
pub(crate) const STOP_ON_LAST_STEP: &str = "stopOnLastStep";
pub(crate) const FANCY_GRAPHICS: &str = "fancyGraphics";
pub(crate) const SHOW_TOP_BAR: &str = "showTopBar";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SettingType {
    Bool,
    Int,
    Float,
    Str,
}

impl SettingType {
    /// Human-readable name used in prompts and error messages.
    pub(crate) fn name(self) -> &'static str {
        match self {
            SettingType::Bool => "boolean",
            SettingType::Int => "integer",
            SettingType::Float => "float",
            SettingType::Str => "string",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl SettingValue {
    pub(crate) fn setting_type(&self) -> SettingType {
        match self {
            SettingValue::Bool(_) => SettingType::Bool,
            SettingValue::Int(_) => SettingType::Int,
            SettingValue::Float(_) => SettingType::Float,
            SettingValue::Str(_) => SettingType::Str,
        }
    }

    /// Interprets console text as a setting value.
    ///
    /// Text containing a `.` is tried as a float, anything else as an
    /// integer; failing that `true` and `false` (any case) become booleans
    /// and everything else stays a string.
    pub(crate) fn parse_input(text: &str) -> Self {
        let number = if text.contains('.') {
            text.parse().ok().map(SettingValue::Float)
        } else {
            text.parse().ok().map(SettingValue::Int)
        };

        number.unwrap_or_else(|| match text.to_ascii_lowercase().as_str() {
            "true" => SettingValue::Bool(true),
            "false" => SettingValue::Bool(false),
            _ => SettingValue::Str(text.to_string()),
        })
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(v) => write!(f, "{v}"),
            SettingValue::Int(v) => write!(f, "{v}"),
            SettingValue::Float(v) => write!(f, "{v}"),
            SettingValue::Str(v) => write!(f, "{v}"),
        }
    }
}

struct SettingSpec {
    key: &'static str,
    default: SettingValue,
    description: &'static str,
}

static DEFAULT_SETTINGS: [SettingSpec; 7] = [
    SettingSpec {
        key: PAUSE_ON_STEP,
        default: SettingValue::Bool(true),
        description: "Pause the simulation instantly if the user manually steps forward or backward.",
    },
    SettingSpec {
        key: STEPS_PER_SECOND,
        default: SettingValue::Int(5),
        description: "How many times the simulation's map will advance to the next step per second.",
    },
    SettingSpec {
        key: CELL_SIZE,
        default: SettingValue::Int(30),
        description: "How wide each map cell is drawn; every 15 units adds one terminal column.",
    },
    SettingSpec {
        key: AUTO_SAVE,
        default: SettingValue::Bool(true),
        description: "Auto-save the simulation configuration when modifying settings.",
    },
    SettingSpec {
        key: STOP_ON_LAST_STEP,
        default: SettingValue::Bool(true),
        description: "Instantly pause the simulation when the last step is reached.",
    },
    SettingSpec {
        key: FANCY_GRAPHICS,
        default: SettingValue::Bool(false),
        description: "Whether plain colors or detailed glyphs are used to render map cells.",
    },
    SettingSpec {
        key: SHOW_TOP_BAR,
        default: SettingValue::Bool(true),
        description: "Show or hide the panel containing key game details such as step number and team scores.",
    },
];

fn default_spec(key: &str) -> Option<&'static SettingSpec> {
    DEFAULT_SETTINGS.iter().find(|spec| spec.key == key)
}

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error("No setting named '{0}'.")]
    Key(String),

    #[error("Expected value of type '{}' for key '{key}', got '{}' instead.", expected.name(), actual.name())]
    Type {
        key: String,
        expected: SettingType,
        actual: SettingType,
    },

    #[error("Failed to save settings: {0}")]
    Storage(#[from] confy::ConfyError),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Setting {
    pub(crate) value: SettingValue,
    pub(crate) tag: SettingType,
}

// Persisted entries are read leniently so a single damaged key falls back to
// its default instead of discarding the whole file.
#[derive(Default, Serialize, Deserialize)]
#[serde(transparent)]
struct StoredSettings(IndexMap<String, StoredEntry>);

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Typed(SettingValue, SettingType),
    #[serde(skip_serializing)]
    Malformed(IgnoredAny),
}

/// The typed settings store.
pub(crate) struct Settings {
    path: PathBuf,
    entries: IndexMap<String, Setting>,
}

impl Settings {
    /// Default location of the settings file.
    pub(crate) fn default_path() -> PathBuf {
        confy::get_configuration_file_path(CONFIG_NAME, SETTINGS_NAME)
            .unwrap_or_else(|_| PathBuf::from("settings.toml"))
    }

    /// Creates a store holding the built-in defaults, backed by `path`.
    pub(crate) fn with_defaults(path: impl Into<PathBuf>) -> Self {
        let entries = DEFAULT_SETTINGS
            .iter()
            .map(|spec| {
                let setting = Setting {
                    value: spec.default.clone(),
                    tag: spec.default.setting_type(),
                };
                (spec.key.to_string(), setting)
            })
            .collect();

        Self {
            path: path.into(),
            entries,
        }
    }

    /// Loads the settings stored at `path`.
    ///
    /// Every built-in key takes its persisted value when that value matches
    /// the key's type, and its default otherwise. Unknown keys are dropped.
    /// If the file cannot be read at all the defaults are used. The result is
    /// written straight back so the file always reflects the current schema.
    pub(crate) fn load(path: impl Into<PathBuf>) -> Self {
        let mut settings = Self::with_defaults(path);

        match confy::load_path::<StoredSettings>(&settings.path) {
            Ok(StoredSettings(stored)) => {
                for (key, setting) in settings.entries.iter_mut() {
                    match stored.get(key) {
                        Some(StoredEntry::Typed(value, tag))
                            if *tag == setting.tag && value.setting_type() == *tag =>
                        {
                            setting.value = value.clone();
                        }
                        Some(_) => tracing::warn!(key = %key, "ignoring invalid stored setting"),
                        None => {}
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %settings.path.display(), error = %e, "failed to read settings, using defaults");
            }
        }

        if let Err(e) = settings.persist() {
            tracing::warn!(error = %e, "failed to write settings after load");
        }

        settings
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn get(&self, key: &str) -> Result<&SettingValue, SettingsError> {
        self.entries
            .get(key)
            .map(|setting| &setting.value)
            .ok_or_else(|| SettingsError::Key(key.to_string()))
    }

    /// Value of a boolean setting; missing or non-boolean keys read as off.
    pub(crate) fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Ok(SettingValue::Bool(true)))
    }

    pub(crate) fn integer(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Ok(SettingValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Assigns `value` to `key`.
    ///
    /// An existing key keeps its type tag and rejects values of any other
    /// type without changing anything. A new key takes the type of its first
    /// value.
    pub(crate) fn set(&mut self, key: &str, value: SettingValue) -> Result<(), SettingsError> {
        let actual = value.setting_type();

        match self.entries.get_mut(key) {
            Some(setting) if setting.tag != actual => {
                return Err(SettingsError::Type {
                    key: key.to_string(),
                    expected: setting.tag,
                    actual,
                });
            }
            Some(setting) => setting.value = value,
            None => {
                self.entries.insert(key.to_string(), Setting { value, tag: actual });
            }
        }

        self.auto_save()
    }

    #[cfg(test)]
    pub(crate) fn delete(&mut self, key: &str) -> Result<(), SettingsError> {
        if self.entries.shift_remove(key).is_none() {
            return Err(SettingsError::Key(key.to_string()));
        }

        self.auto_save()
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn describe(&self, key: &str) -> Option<&'static str> {
        default_spec(key).map(|spec| spec.description)
    }

    /// Type name of `key`, or `"none"` when the key is unknown.
    pub(crate) fn type_name(&self, key: &str) -> &'static str {
        self.entries
            .get(key)
            .map(|setting| setting.tag.name())
            .unwrap_or("none")
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &Setting)> {
        self.entries.iter().map(|(key, setting)| (key.as_str(), setting))
    }

    /// Writes every setting to the backing file.
    pub(crate) fn persist(&self) -> Result<(), SettingsError> {
        let stored: IndexMap<&str, (&SettingValue, SettingType)> = self
            .entries
            .iter()
            .map(|(key, setting)| (key.as_str(), (&setting.value, setting.tag)))
            .collect();

        confy::store_path(&self.path, stored)?;
        tracing::debug!(path = %self.path.display(), "settings saved");

        Ok(())
    }

    fn auto_save(&self) -> Result<(), SettingsError> {
        if self.flag(AUTO_SAVE) {
            self.persist()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn settings_path(dir: &TempDir) -> PathBuf {
        dir.path().join("settings.toml")
    }

    fn default_values() -> Vec<(String, SettingValue)> {
        Settings::with_defaults("unused")
            .iter()
            .map(|(key, setting)| (key.to_string(), setting.value.clone()))
            .collect()
    }

    fn values(settings: &Settings) -> Vec<(String, SettingValue)> {
        settings
            .iter()
            .map(|(key, setting)| (key.to_string(), setting.value.clone()))
            .collect()
    }

    #[test]
    fn missing_file_loads_defaults_and_writes_them() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);

        let settings = Settings::load(&path);

        assert_eq!(values(&settings), default_values());
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        fs::write(&path, "pauseOnStep = [true, \"bool\"\n{{{").unwrap();

        let settings = Settings::load(&path);

        assert_eq!(values(&settings), default_values());
    }

    #[test]
    fn load_keeps_valid_entries_and_prunes_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        fs::write(
            &path,
            "stepsPerSecond = [12, \"int\"]\ncellSize = [\"big\", \"int\"]\nshowTopBar = [false, \"bool\"]\nlegacyKey = [1, \"int\"]\n",
        )
        .unwrap();

        let settings = Settings::load(&path);

        assert_eq!(settings.get(STEPS_PER_SECOND).unwrap(), &SettingValue::Int(12));
        assert_eq!(settings.get(CELL_SIZE).unwrap(), &SettingValue::Int(30));
        assert!(!settings.flag(SHOW_TOP_BAR));
        assert!(!settings.contains("legacyKey"));

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("legacyKey"));
        assert!(written.contains("stepsPerSecond"));
    }

    #[test]
    fn rejects_persisted_value_with_changed_type_tag() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        fs::write(&path, "cellSize = [\"big\", \"str\"]\n").unwrap();

        let settings = Settings::load(&path);

        assert_eq!(settings.get(CELL_SIZE).unwrap(), &SettingValue::Int(30));
        assert_eq!(settings.type_name(CELL_SIZE), "integer");
    }

    #[test]
    fn set_with_wrong_type_leaves_value_untouched() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::load(settings_path(&dir));

        let err = settings
            .set(CELL_SIZE, SettingValue::Str("huge".to_string()))
            .unwrap_err();

        assert!(matches!(
            err,
            SettingsError::Type { expected: SettingType::Int, actual: SettingType::Str, .. }
        ));
        assert_eq!(
            err.to_string(),
            "Expected value of type 'integer' for key 'cellSize', got 'string' instead."
        );
        assert_eq!(settings.get(CELL_SIZE).unwrap(), &SettingValue::Int(30));
    }

    #[test]
    fn integer_setting_rejects_float() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::load(settings_path(&dir));

        assert!(settings.set(STEPS_PER_SECOND, SettingValue::Float(2.5)).is_err());
        assert_eq!(settings.integer(STEPS_PER_SECOND), Some(5));
    }

    #[test]
    fn set_persists_when_auto_save_is_on() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        let mut settings = Settings::load(&path);

        settings.set(STEPS_PER_SECOND, SettingValue::Int(9)).unwrap();

        let reloaded = Settings::load(&path);
        assert_eq!(reloaded.integer(STEPS_PER_SECOND), Some(9));
    }

    #[test]
    fn set_does_not_persist_when_auto_save_is_off() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        let mut settings = Settings::load(&path);

        settings.set(AUTO_SAVE, SettingValue::Bool(false)).unwrap();
        settings.set(CELL_SIZE, SettingValue::Int(45)).unwrap();

        let reloaded = Settings::load(&path);
        assert_eq!(reloaded.integer(CELL_SIZE), Some(30));
        assert!(reloaded.flag(AUTO_SAVE));

        settings.persist().unwrap();
        let reloaded = Settings::load(&path);
        assert_eq!(reloaded.integer(CELL_SIZE), Some(45));
    }

    #[test]
    fn new_key_adopts_type_of_first_value() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::load(settings_path(&dir));

        settings.set("theme", SettingValue::Str("dark".to_string())).unwrap();

        assert_eq!(settings.type_name("theme"), "string");
        assert!(settings.set("theme", SettingValue::Int(1)).is_err());
    }

    #[test]
    fn delete_removes_value_and_type() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::load(settings_path(&dir));

        settings.delete(FANCY_GRAPHICS).unwrap();

        assert!(!settings.contains(FANCY_GRAPHICS));
        assert_eq!(settings.type_name(FANCY_GRAPHICS), "none");
        assert!(matches!(settings.get(FANCY_GRAPHICS), Err(SettingsError::Key(_))));
        assert!(matches!(settings.delete(FANCY_GRAPHICS), Err(SettingsError::Key(_))));
    }

    #[test]
    fn describes_known_keys() {
        let settings = Settings::with_defaults("unused");

        assert!(settings.describe(STOP_ON_LAST_STEP).unwrap().contains("last step"));
        assert_eq!(settings.describe("nope"), None);
        assert_eq!(settings.type_name(AUTO_SAVE), "boolean");
    }

    #[test]
    fn parses_console_values() {
        assert_eq!(SettingValue::parse_input("12"), SettingValue::Int(12));
        assert_eq!(SettingValue::parse_input("-3"), SettingValue::Int(-3));
        assert_eq!(SettingValue::parse_input("0.5"), SettingValue::Float(0.5));
        assert_eq!(SettingValue::parse_input("TRUE"), SettingValue::Bool(true));
        assert_eq!(SettingValue::parse_input("false"), SettingValue::Bool(false));
        assert_eq!(SettingValue::parse_input("1.2.3"), SettingValue::Str("1.2.3".to_string()));
        assert_eq!(SettingValue::parse_input("north"), SettingValue::Str("north".to_string()));
    }

    #[test]
    fn none_is_an_ordinary_string() {
        let mut settings = Settings::with_defaults("unused");
        settings.set(AUTO_SAVE, SettingValue::Bool(false)).unwrap();

        let value = SettingValue::parse_input("None");
        assert_eq!(value, SettingValue::Str("None".to_string()));

        let err = settings.set(CELL_SIZE, value).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected value of type 'integer' for key 'cellSize', got 'string' instead."
        );
        assert_eq!(settings.get(CELL_SIZE).unwrap(), &SettingValue::Int(30));
    }
}
