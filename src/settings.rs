//! Settings lifecycle
//!
//! Every exercise instance owns a [`Settings`] value: a generic map from
//! option key to JSON value, seeded from the exercise's typed default
//! settings. Updates go through a single merge entry point and observers are
//! notified after each commit, with replay-of-latest semantics for late
//! subscribers.
//!
//! ## Merge rules
//! - Every key present in the defaults stays present after any update.
//! - A key is overwritten only when the incoming value is non-null.
//! - Unknown incoming keys are ignored, never an error, so forward-compatible
//!   settings objects merge cleanly.
//!
//! ## Notification semantics
//! The [`SettingsStore`] delivers the *full resulting* settings (not the
//! delta) to observers in registration order, after the merge commits. A new
//! subscriber immediately receives the most recent value before any future
//! updates. Dropping the store terminates the stream.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ExerciseError;

/// A generic settings value: option key to JSON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings(Map<String, Value>);

impl Settings {
    /// Build settings from a typed settings struct.
    ///
    /// # Errors
    /// Fails with [`ExerciseError::InvalidSettings`] if the value does not
    /// serialize to a JSON object.
    pub fn from_typed<T: Serialize>(value: &T) -> Result<Settings, ExerciseError> {
        match serde_json::to_value(value)
            .map_err(|e| ExerciseError::InvalidSettings(e.to_string()))?
        {
            Value::Object(map) => Ok(Settings(map)),
            other => Err(ExerciseError::InvalidSettings(format!(
                "expected an object, got {}",
                other
            ))),
        }
    }

    /// Read the settings back as a typed settings struct.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ExerciseError> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| ExerciseError::InvalidSettings(e.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merge a partial update into these settings.
    ///
    /// Only keys already present are considered; an incoming null leaves the
    /// current value in place. Total: never fails.
    pub fn merge(&mut self, partial: &Settings) {
        let keys: Vec<String> = self.0.keys().cloned().collect();
        for key in keys {
            if let Some(value) = partial.0.get(&key) {
                if !value.is_null() {
                    self.0.insert(key, value.clone());
                }
            }
        }
    }
}

/// Identifies one observer registration on a [`SettingsStore`].
pub type SubscriptionId = u64;

type Observer = Box<dyn FnMut(&Settings)>;

/// Holds the current settings of one exercise instance and its observers.
///
/// Single-threaded by design: commits and notification delivery run
/// synchronously within one logical thread of control.
pub struct SettingsStore {
    current: Settings,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: SubscriptionId,
}

impl SettingsStore {
    pub fn new(default: Settings) -> SettingsStore {
        SettingsStore {
            current: default,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// Replace the current settings and notify observers in registration
    /// order. The caller has already merged and validated `settings`.
    pub fn commit(&mut self, settings: Settings) {
        self.current = settings;
        for (_, observer) in &mut self.observers {
            observer(&self.current);
        }
    }

    /// Register an observer. The most recent settings value is replayed to it
    /// immediately, then every later commit is delivered in registration
    /// order until [`unsubscribe`](Self::unsubscribe) or drop.
    pub fn subscribe(&mut self, mut observer: Observer) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        observer(&self.current);
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer; already-delivered notifications are unaffected.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|(observer_id, _)| *observer_id != id);
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Declarative metadata for one configurable option.
///
/// Consumed by a settings-editing surface; opaque to generation logic. The
/// engine guarantees every declared key exists in the current settings at all
/// times.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDescriptor {
    pub key: String,
    pub default_value: Value,
    pub control: ControlDescriptor,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlDescriptor {
    pub label: String,
    #[serde(flatten)]
    pub control_type: ControlType,
}

/// The kind of control a settings-editing surface should render.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "controlType", rename_all = "kebab-case")]
pub enum ControlType {
    /// Multi-select over the exercise's answer universe.
    #[serde(rename_all = "camelCase")]
    IncludedAnswers { answer_list: Vec<String> },
    /// Numeric range control.
    Slider { min: u32, max: u32, step: u32 },
}

/// Descriptor for the shared `number_of_segments` setting.
///
/// `unit` names what is being counted, e.g. "chords".
pub fn number_of_segments_descriptor(unit: &str) -> SettingsDescriptor {
    SettingsDescriptor {
        key: "number_of_segments".to_string(),
        default_value: Value::from(1),
        control: ControlDescriptor {
            label: format!("Number of {}", unit),
            control_type: ControlType::Slider {
                min: 1,
                max: 8,
                step: 1,
            },
        },
    }
}
