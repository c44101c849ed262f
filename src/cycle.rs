use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    DEFAULT_LABELS_2, DEFAULT_LABELS_3, DEFAULT_LABELS_5, DEFAULT_LABELS_7, SUPPORTED_PERIODS,
};

/// Smallest period a cycle may have.
pub const MIN_PERIOD: usize = 2;

/// One repeating cycle: a period and the label shown for each position in it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CycleDefinition {
    period: usize,
    labels: Vec<String>,
}

/// Error type for editing a cycle configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Period is below [`MIN_PERIOD`].
    #[error("Invalid cycle period {0} (must be at least {MIN_PERIOD})")]
    InvalidPeriod(usize),

    /// The configuration has no cycle with this period.
    #[error("No cycle with period {0}")]
    UnknownPeriod(usize),

    /// Label position is outside the cycle.
    #[error("Label index {index} is out of range for period {period}")]
    IndexOutOfRange { period: usize, index: usize },
}

/// Error type for reading an imported label payload.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The payload is not well-formed JSON.
    #[error("Malformed label file: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload parsed, but is not a mapping of period to labels.
    #[error("Label file must contain an object mapping period to labels, found {0}")]
    NotAnObject(&'static str),
}

impl CycleDefinition {
    /// Creates a definition as given, without normalizing its labels.
    ///
    /// The label list may be shorter than the period or contain blanks;
    /// [`CycleConfig::normalize`] is the place that repairs those.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidPeriod` if `period < MIN_PERIOD`.
    pub fn new<I, S>(period: usize, labels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if period < MIN_PERIOD {
            return Err(ConfigError::InvalidPeriod(period));
        }
        Ok(Self {
            period,
            labels: labels.into_iter().map(Into::into).collect(),
        })
    }

    pub const fn period(&self) -> usize {
        self.period
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label at `index`, if present.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

/// The full set of cycles, keyed by period and iterated in ascending period order.
///
/// A configuration is a snapshot: edits go through [`CycleConfig::with_label`],
/// which returns a new value and leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleConfig {
    cycles: BTreeMap<usize, CycleDefinition>,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl CycleConfig {
    /// The built-in labels for every supported period.
    pub fn defaults() -> Self {
        let tables: [&[&str]; 4] = [
            &DEFAULT_LABELS_2,
            &DEFAULT_LABELS_3,
            &DEFAULT_LABELS_5,
            &DEFAULT_LABELS_7,
        ];
        let cycles = SUPPORTED_PERIODS
            .iter()
            .zip(tables)
            .map(|(&period, labels)| {
                let def = CycleDefinition {
                    period,
                    labels: labels.iter().map(|l| (*l).to_owned()).collect(),
                };
                (period, def)
            })
            .collect();
        Self { cycles }
    }

    /// Builds a configuration from definitions as given, without normalizing.
    /// A later definition with the same period replaces an earlier one.
    pub fn from_definitions<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = CycleDefinition>,
    {
        Self {
            cycles: definitions.into_iter().map(|d| (d.period, d)).collect(),
        }
    }

    /// Repairs arbitrary input into a complete configuration.
    ///
    /// For every period of `defaults` and every position in it, the raw label
    /// `raw["<period>"][index]` is used when it is a string that is not blank
    /// after trimming; anything else (missing key, wrong type, short array,
    /// blank text) takes the default label, or the 1-based position when
    /// `defaults` has no usable label either. This never fails.
    pub fn normalize(raw: &Value, defaults: &Self) -> Self {
        let mut gaps = 0_usize;
        let cycles = defaults
            .cycles
            .values()
            .map(|def| {
                let raw_labels = raw.get(def.period.to_string()).and_then(Value::as_array);
                let labels = (0..def.period)
                    .map(|index| {
                        let candidate = raw_labels
                            .and_then(|labels| labels.get(index))
                            .and_then(Value::as_str)
                            .map(str::trim)
                            .filter(|text| !text.is_empty());
                        candidate.map_or_else(
                            || {
                                gaps += 1;
                                def.label(index)
                                    .map(str::trim)
                                    .filter(|text| !text.is_empty())
                                    .map_or_else(|| (index + 1).to_string(), str::to_owned)
                            },
                            str::to_owned,
                        )
                    })
                    .collect();
                (def.period, CycleDefinition {
                    period: def.period,
                    labels,
                })
            })
            .collect();

        if gaps > 0 {
            debug!(gaps, "filled missing cycle labels from defaults");
        }
        Self { cycles }
    }

    /// Parses an imported payload into a raw value ready for [`CycleConfig::normalize`].
    ///
    /// # Errors
    /// Returns `ImportError::Malformed` for invalid JSON and
    /// `ImportError::NotAnObject` when the top level is not an object.
    pub fn parse(text: &str) -> Result<Value, ImportError> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Object(_) => Ok(value),
            Value::Null => Err(ImportError::NotAnObject("null")),
            Value::Bool(_) => Err(ImportError::NotAnObject("a boolean")),
            Value::Number(_) => Err(ImportError::NotAnObject("a number")),
            Value::String(_) => Err(ImportError::NotAnObject("a string")),
            Value::Array(_) => Err(ImportError::NotAnObject("an array")),
        }
    }

    /// Parses and normalizes an imported payload in one step.
    ///
    /// # Errors
    /// Returns `ImportError` if the payload cannot be parsed; nothing else is affected.
    pub fn import(text: &str, defaults: &Self) -> Result<Self, ImportError> {
        Self::parse(text).map(|raw| Self::normalize(&raw, defaults))
    }

    /// Pretty JSON mapping period to its label array.
    pub fn to_json(&self) -> String {
        format!("{:#}", self.to_value())
    }

    /// The configuration as a JSON object (`{"2": [...], ...}`).
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.cycles
                .values()
                .map(|def| {
                    let labels = def.labels.iter().cloned().map(Value::String).collect();
                    (def.period.to_string(), Value::Array(labels))
                })
                .collect(),
        )
    }

    /// Returns a new configuration with one label replaced.
    ///
    /// Blank text restores the built-in default for that position, if there is one.
    ///
    /// # Errors
    /// Returns `ConfigError` if the period is unknown or `index` is outside it.
    pub fn with_label(&self, period: usize, index: usize, text: &str) -> Result<Self, ConfigError> {
        let def = self
            .cycles
            .get(&period)
            .ok_or(ConfigError::UnknownPeriod(period))?;
        if index >= def.period {
            return Err(ConfigError::IndexOutOfRange { period, index });
        }

        let trimmed = text.trim();
        let replacement = if trimmed.is_empty() {
            Self::defaults()
                .get(period)
                .and_then(|d| d.label(index))
                .map_or_else(|| (index + 1).to_string(), str::to_owned)
        } else {
            trimmed.to_owned()
        };

        let mut next = self.clone();
        if let Some(def) = next.cycles.get_mut(&period) {
            if def.labels.len() < def.period {
                def.labels.resize(def.period, String::new());
            }
            def.labels[index] = replacement;
        }
        Ok(next)
    }

    pub fn get(&self, period: usize) -> Option<&CycleDefinition> {
        self.cycles.get(&period)
    }

    /// Periods in ascending order.
    pub fn periods(&self) -> impl Iterator<Item = usize> + '_ {
        self.cycles.keys().copied()
    }

    /// Definitions in ascending period order.
    pub fn iter(&self) -> impl Iterator<Item = &CycleDefinition> {
        self.cycles.values()
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

impl Serialize for CycleConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let map: BTreeMap<String, &[String]> = self
            .cycles
            .values()
            .map(|def| (def.period.to_string(), def.labels.as_slice()))
            .collect();
        map.serialize(serializer)
    }
}

/// Deserializing always succeeds for any structurally valid document and
/// yields a normalized configuration.
impl<'de> Deserialize<'de> for CycleConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::normalize(&raw, &Self::defaults()))
    }
}
