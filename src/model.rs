//! Experiment data model shared by the browser client and the CLI.
//!
//! DESIGN
//! ======
//! Wire structs mirror the remote API's camelCase JSON. Read-side structs are
//! lenient about missing or loosely typed fields because stored records were
//! written by form code that kept numbers as strings. Write-side structs
//! (`NewExperiment`, `AdvanceRequest`) are strict and only built from
//! validated input.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder name for stored experiments that were saved without one.
pub const UNNAMED_EXPERIMENT: &str = "Unnamed Experiment";

/// Optimization direction for an experiment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    #[default]
    Minimize,
    Maximize,
}

impl Goal {
    /// Wire value (`"minimize"` / `"maximize"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
        }
    }

    /// Capitalized label for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Minimize => "Minimize",
            Self::Maximize => "Maximize",
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a goal string is neither `minimize` nor `maximize`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown goal `{0}` (expected `minimize` or `maximize`)")]
pub struct UnknownGoal(pub String);

impl std::str::FromStr for Goal {
    type Err = UnknownGoal;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "minimize" | "min" => Ok(Self::Minimize),
            "maximize" | "max" => Ok(Self::Maximize),
            _ => Err(UnknownGoal(raw.to_owned())),
        }
    }
}

/// Domain type of a decision variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    Continuous,
    Discrete,
}

impl VariableKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Discrete => "discrete",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Continuous => "Continuous",
            Self::Discrete => "Discrete",
        }
    }
}

/// A decision variable as stored by the remote API.
///
/// Bounds and interval size travel as strings. For discrete variables
/// `custom_values` is the authoritative domain and the bounds are advisory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub min: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub max: String,
    #[serde(rename = "type", default)]
    pub kind: VariableKind,
    #[serde(default, deserialize_with = "deserialize_text_list")]
    pub custom_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_optional_text")]
    pub interval_size: Option<String>,
}

/// A validated decision variable, parsed at the form boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum VariableSpec {
    Continuous {
        name: String,
        min: f64,
        max: f64,
        interval: Option<f64>,
    },
    Discrete {
        name: String,
        values: Vec<String>,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl VariableSpec {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Continuous { name, .. } | Self::Discrete { name, .. } => name,
        }
    }

    /// Render back into the string-typed wire representation.
    #[must_use]
    pub fn to_wire(&self) -> Variable {
        match self {
            Self::Continuous {
                name,
                min,
                max,
                interval,
            } => Variable {
                name: name.clone(),
                min: min.to_string(),
                max: max.to_string(),
                kind: VariableKind::Continuous,
                custom_values: Vec::new(),
                interval_size: interval.map(|step| step.to_string()),
            },
            Self::Discrete { name, values, min, max } => Variable {
                name: name.clone(),
                min: min.map(|v| v.to_string()).unwrap_or_default(),
                max: max.map(|v| v.to_string()).unwrap_or_default(),
                kind: VariableKind::Discrete,
                custom_values: values.clone(),
                interval_size: None,
            },
        }
    }
}

/// Population matrix: one row per member, one column per variable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Population(Vec<Vec<f64>>);

/// Returned when a population matrix violates its shape invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("population row {row} has {found} values, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("population has {found} columns but the experiment defines {expected} variables")]
    ColumnMismatch { expected: usize, found: usize },
}

impl Population {
    #[must_use]
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self(rows)
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column count of the first row, or `None` for an empty population.
    #[must_use]
    pub fn columns(&self) -> Option<usize> {
        self.0.first().map(Vec::len)
    }

    /// Check that every row has the same width and, when `expected_columns`
    /// is given, that the width matches it. An empty population always passes.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Ragged`] for rows of differing width and
    /// [`ShapeError::ColumnMismatch`] when the width disagrees with the
    /// variable count.
    pub fn check_shape(&self, expected_columns: Option<usize>) -> Result<(), ShapeError> {
        let Some(width) = self.columns() else {
            return Ok(());
        };
        if let Some((row, found)) = self
            .0
            .iter()
            .enumerate()
            .find_map(|(row, values)| (values.len() != width).then_some((row, values.len())))
        {
            return Err(ShapeError::Ragged { row, expected: width, found });
        }
        match expected_columns {
            Some(expected) if expected != width => Err(ShapeError::ColumnMismatch { expected, found: width }),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.0
    }
}

impl From<Vec<Vec<f64>>> for Population {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self(rows)
    }
}

/// A stored experiment as returned by the list and detail endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub experiment_id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub user_id: String,
    #[serde(default = "unnamed_experiment", deserialize_with = "deserialize_name")]
    pub experiment_name: String,
    #[serde(default, deserialize_with = "deserialize_goal")]
    pub goal: Option<Goal>,
    #[serde(default, deserialize_with = "deserialize_population_size")]
    pub population_size: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variables: Vec<Variable>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub population: Population,
}

impl Experiment {
    /// Goal label for display, with a fallback for records saved without one.
    #[must_use]
    pub fn goal_label(&self) -> &'static str {
        self.goal.map_or("No goal specified", Goal::label)
    }

    /// Header labels for the population table. Unnamed variables, and
    /// columns beyond the declared variables, fall back to `Variable N`.
    #[must_use]
    pub fn column_labels(&self) -> Vec<String> {
        let width = self.variables.len().max(self.population.columns().unwrap_or(0));
        (0..width)
            .map(|index| match self.variables.get(index) {
                Some(variable) if !variable.name.trim().is_empty() => variable.name.clone(),
                _ => format!("Variable {}", index + 1),
            })
            .collect()
    }

    /// Whether the population holds more rows than the configured size.
    #[must_use]
    pub fn exceeds_population_size(&self) -> bool {
        self.population.len() > self.population_size as usize
    }
}

/// Request body for `POST /experiments`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperiment {
    pub user_id: String,
    pub experiment_name: String,
    pub variables: Vec<Variable>,
    pub goal: Goal,
    pub population_size: u32,
    pub population: Population,
}

/// Request body for `POST /experiments/ongoing`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceRequest {
    pub population: Population,
    pub fitness_scores: Vec<f64>,
}

/// Canonical advance response: the flat `{ population, fitnessScores? }`
/// document. A missing `population` fails decoding. Score entries may be
/// `null` for members the server has not scored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceResponse {
    pub population: Population,
    #[serde(default)]
    pub fitness_scores: Option<Vec<Option<f64>>>,
}

impl AdvanceResponse {
    /// Scores usable as a prefill: exactly one non-null entry per row.
    #[must_use]
    pub fn complete_scores(&self) -> Option<Vec<f64>> {
        let scores = self.fitness_scores.as_ref()?;
        if scores.len() != self.population.len() {
            return None;
        }
        scores.iter().copied().collect()
    }
}

fn unnamed_experiment() -> String {
    UNNAMED_EXPERIMENT.to_owned()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn value_to_text<E: serde::de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        other => Err(E::custom(format!("expected string or number, got {other}"))),
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text::<D::Error>(Value::deserialize(deserializer)?)?.unwrap_or_default())
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    value_to_text(Value::deserialize(deserializer)?)
}

fn deserialize_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = deserialize_text(deserializer)?;
    if name.trim().is_empty() {
        return Ok(unnamed_experiment());
    }
    Ok(name)
}

fn deserialize_goal<'de, D>(deserializer: D) -> Result<Option<Goal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = value_to_text::<D::Error>(Value::deserialize(deserializer)?)?;
    Ok(raw.and_then(|text| text.parse::<Goal>().ok()))
}

fn deserialize_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| value_to_text(item).map(Option::unwrap_or_default))
            .collect(),
        // Some stored records kept the raw comma-separated input.
        Value::String(text) => Ok(text.split(',').map(|v| v.trim().to_owned()).collect()),
        other => Err(D::Error::custom(format!("expected list of values, got {other}"))),
    }
}

fn deserialize_population_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(0),
        Value::Number(number) => number.as_u64(),
        Value::String(text) if text.trim().is_empty() => return Ok(0),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    let Some(size) = parsed else {
        return Err(D::Error::custom(format!("expected non-negative integer population size, got {value}")));
    };
    u32::try_from(size).map_err(|_| D::Error::custom(format!("population size {size} out of range")))
}
