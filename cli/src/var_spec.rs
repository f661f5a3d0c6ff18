//! `--var` argument syntax.
//!
//! `name:continuous:min:max[:interval]` or `name:discrete:v1|v2|v3`. Only the
//! structure is checked here; numbers stay as text and are validated by the
//! experiment form like anything typed into the browser editor.

#[cfg(test)]
#[path = "var_spec_test.rs"]
mod var_spec_test;

use cloudlab::VariableKind;
use cloudlab::workflow::VariableDraft;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VarSpecError {
    #[error("`{0}`: expected name:continuous:min:max[:interval] or name:discrete:v1|v2")]
    Shape(String),
    #[error("`{0}`: unknown variable type (expected `continuous` or `discrete`)")]
    UnknownKind(String),
}

/// Parse one `--var` value into an editor draft.
///
/// # Errors
///
/// Returns [`VarSpecError`] when the field count does not fit the type or the
/// type is unknown.
pub fn parse_var_spec(raw: &str) -> Result<VariableDraft, VarSpecError> {
    let fields: Vec<&str> = raw.split(':').collect();
    let [name, kind, rest @ ..] = fields.as_slice() else {
        return Err(VarSpecError::Shape(raw.to_owned()));
    };
    let draft = VariableDraft { name: (*name).to_owned(), ..VariableDraft::default() };
    match kind.trim().to_ascii_lowercase().as_str() {
        "continuous" => match rest {
            [min, max] => Ok(VariableDraft { min: (*min).to_owned(), max: (*max).to_owned(), ..draft }),
            [min, max, interval] => Ok(VariableDraft {
                min: (*min).to_owned(),
                max: (*max).to_owned(),
                interval_size: (*interval).to_owned(),
                ..draft
            }),
            _ => Err(VarSpecError::Shape(raw.to_owned())),
        },
        "discrete" => match rest {
            [values] => Ok(VariableDraft {
                kind: VariableKind::Discrete,
                custom_values: values.split('|').map(|value| value.trim().to_owned()).collect(),
                ..draft
            }),
            _ => Err(VarSpecError::Shape(raw.to_owned())),
        },
        _ => Err(VarSpecError::UnknownKind(raw.to_owned())),
    }
}
