//! Variable editor and variable collection state.
//!
//! DESIGN
//! ======
//! A [`VariableDraft`] keeps exactly what the user typed. Edits are immutable
//! updates that touch one field; switching the type keeps the fields of the
//! other type so switching back restores them. Nothing is validated until the
//! form parses the drafts into [`VariableSpec`]s.
//!
//! Variables have no identity beyond their position in the collection.

#[cfg(test)]
#[path = "variables_test.rs"]
mod variables_test;

use super::validation::{Bound, FormError, parse_finite, parse_optional};
use crate::model::{Variable, VariableKind, VariableSpec};

/// One variable as typed into the editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableDraft {
    pub name: String,
    pub min: String,
    pub max: String,
    pub kind: VariableKind,
    pub custom_values: Vec<String>,
    pub interval_size: String,
}

/// A single-field edit emitted by the variable editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VariableEdit {
    Name(String),
    Min(String),
    Max(String),
    Kind(VariableKind),
    /// Raw comma-separated text from the custom values field.
    CustomValues(String),
    IntervalSize(String),
}

/// Split the comma-separated custom values field, trimming every entry.
#[must_use]
pub fn split_custom_values(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(|value| value.trim().to_owned()).collect()
}

impl VariableDraft {
    /// Return a copy with `edit` applied and every other field unchanged.
    #[must_use]
    pub fn apply(&self, edit: VariableEdit) -> Self {
        let mut next = self.clone();
        match edit {
            VariableEdit::Name(name) => next.name = name,
            VariableEdit::Min(min) => next.min = min,
            VariableEdit::Max(max) => next.max = max,
            VariableEdit::Kind(kind) => next.kind = kind,
            VariableEdit::CustomValues(text) => next.custom_values = split_custom_values(&text),
            VariableEdit::IntervalSize(step) => next.interval_size = step,
        }
        next
    }

    /// Custom values joined back for display in the text field.
    #[must_use]
    pub fn custom_values_text(&self) -> String {
        self.custom_values.join(", ")
    }

    /// Draft prefilled from a stored variable.
    #[must_use]
    pub fn from_wire(variable: &Variable) -> Self {
        Self {
            name: variable.name.clone(),
            min: variable.min.clone(),
            max: variable.max.clone(),
            kind: variable.kind,
            custom_values: variable.custom_values.clone(),
            interval_size: variable.interval_size.clone().unwrap_or_default(),
        }
    }

    /// Parse into a typed variable. `index` is the zero-based position used
    /// in error messages.
    ///
    /// # Errors
    ///
    /// Returns every [`FormError`] found in this draft.
    pub fn parse(&self, index: usize) -> Result<VariableSpec, Vec<FormError>> {
        let position = index + 1;
        let mut errors = Vec::new();
        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FormError::UnnamedVariable { position });
        }

        let spec = match self.kind {
            VariableKind::Continuous => {
                let min = parse_finite(&self.min);
                let max = parse_finite(&self.max);
                if min.is_none() {
                    errors.push(FormError::InvalidBound { position, bound: Bound::Min });
                }
                if max.is_none() {
                    errors.push(FormError::InvalidBound { position, bound: Bound::Max });
                }
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        errors.push(FormError::InvertedBounds { position });
                    }
                }
                let interval = match parse_optional(&self.interval_size) {
                    Ok(Some(step)) if step > 0.0 => Some(step),
                    Ok(None) => None,
                    _ => {
                        errors.push(FormError::InvalidInterval { position });
                        None
                    }
                };
                VariableSpec::Continuous {
                    name: name.to_owned(),
                    min: min.unwrap_or_default(),
                    max: max.unwrap_or_default(),
                    interval,
                }
            }
            VariableKind::Discrete => {
                let values: Vec<String> = self
                    .custom_values
                    .iter()
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty())
                    .map(str::to_owned)
                    .collect();
                if values.is_empty() {
                    errors.push(FormError::NoDiscreteValues { position });
                }
                let min = parse_optional(&self.min).unwrap_or_else(|()| {
                    errors.push(FormError::InvalidBound { position, bound: Bound::Min });
                    None
                });
                let max = parse_optional(&self.max).unwrap_or_else(|()| {
                    errors.push(FormError::InvalidBound { position, bound: Bound::Max });
                    None
                });
                VariableSpec::Discrete { name: name.to_owned(), values, min, max }
            }
        };

        if errors.is_empty() { Ok(spec) } else { Err(errors) }
    }
}

/// Ordered list of variable drafts behind the collection editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableCollection {
    drafts: Vec<VariableDraft>,
}

impl VariableCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty continuous draft.
    pub fn add(&mut self) {
        self.drafts.push(VariableDraft::default());
    }

    /// Remove the draft at `index`, keeping the order of the rest.
    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<VariableDraft> {
        (index < self.drafts.len()).then(|| self.drafts.remove(index))
    }

    /// Apply `edit` to the draft at `index`. Returns `false` when the index
    /// is out of range.
    pub fn update(&mut self, index: usize, edit: VariableEdit) -> bool {
        match self.drafts.get_mut(index) {
            Some(draft) => {
                *draft = draft.apply(edit);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, index: usize, draft: VariableDraft) -> bool {
        match self.drafts.get_mut(index) {
            Some(slot) => {
                *slot = draft;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&VariableDraft> {
        self.drafts.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableDraft> {
        self.drafts.iter()
    }

    /// Parse every draft in order.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NoVariables`] for an empty collection, otherwise
    /// the errors of every draft that failed.
    pub fn parse_all(&self) -> Result<Vec<VariableSpec>, Vec<FormError>> {
        if self.drafts.is_empty() {
            return Err(vec![FormError::NoVariables]);
        }
        let mut specs = Vec::with_capacity(self.drafts.len());
        let mut errors = Vec::new();
        for (index, draft) in self.drafts.iter().enumerate() {
            match draft.parse(index) {
                Ok(spec) => specs.push(spec),
                Err(found) => errors.extend(found),
            }
        }
        if errors.is_empty() { Ok(specs) } else { Err(errors) }
    }
}

impl FromIterator<VariableDraft> for VariableCollection {
    fn from_iter<I: IntoIterator<Item = VariableDraft>>(iter: I) -> Self {
        Self { drafts: iter.into_iter().collect() }
    }
}
