//! Form-boundary validation errors and numeric parsing.

/// Which bound of a variable failed to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Min => "minimum",
            Self::Max => "maximum",
        })
    }
}

/// Client-side validation failures. `position` is 1-based, as shown to users.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Experiment name is required.")]
    MissingName,
    #[error("Population size must be a positive whole number.")]
    InvalidPopulationSize,
    #[error("Add at least one variable.")]
    NoVariables,
    #[error("Variable {position} needs a name.")]
    UnnamedVariable { position: usize },
    #[error("Variable {position}: {bound} must be a number.")]
    InvalidBound { position: usize, bound: Bound },
    #[error("Variable {position}: minimum must not be greater than maximum.")]
    InvertedBounds { position: usize },
    #[error("Variable {position}: interval size must be a positive number.")]
    InvalidInterval { position: usize },
    #[error("Variable {position}: discrete variables need at least one value.")]
    NoDiscreteValues { position: usize },
}

/// Parse user input as a finite number. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse an optional numeric field: blank means absent.
pub(crate) fn parse_optional(text: &str) -> Result<Option<f64>, ()> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_finite(text).map(Some).ok_or(())
}

/// Parse the population size field.
///
/// # Errors
///
/// Returns [`FormError::InvalidPopulationSize`] unless the text is a whole
/// number greater than zero.
pub fn parse_population_size(text: &str) -> Result<u32, FormError> {
    match text.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(FormError::InvalidPopulationSize),
    }
}
