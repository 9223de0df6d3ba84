//! Form fields, submitted values and client-side validation.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use registrar_api::ApiError;
use thiserror::Error;

/// Input rejected before any request was issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are blank.
    #[error("{0}")]
    Missing(&'static str),

    #[error("{label} must be a whole number")]
    NotANumber { label: &'static str },

    #[error("{label} must be between {min} and {max}")]
    OutOfRange {
        label: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{label} must be a date (YYYY-MM-DD)")]
    BadDate { label: &'static str },
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

/// Values submitted from a dialog form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Trimmed value of `name`; empty when absent.
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", |v| v.trim())
    }

    pub fn text(&self, name: &str) -> String {
        self.get(name).to_string()
    }

    /// `None` for blank values, so optional fields travel as `null`.
    pub fn optional(&self, name: &str) -> Option<String> {
        Some(self.get(name))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Fail with `message` unless every named field is non-blank.
    pub fn require(&self, names: &[&str], message: &'static str) -> Result<(), ValidationError> {
        if names.iter().any(|name| self.get(name).is_empty()) {
            return Err(ValidationError::Missing(message));
        }
        Ok(())
    }

    /// Parse a whole number and check it lies in `range`.
    pub fn number(
        &self,
        name: &str,
        label: &'static str,
        range: RangeInclusive<u32>,
    ) -> Result<u32, ValidationError> {
        let value: u32 = self
            .get(name)
            .parse()
            .map_err(|_| ValidationError::NotANumber { label })?;
        if !range.contains(&value) {
            return Err(ValidationError::OutOfRange {
                label,
                min: *range.start(),
                max: *range.end(),
            });
        }
        Ok(value)
    }

    /// Parse a record id (select values).
    pub fn id(&self, name: &str, label: &'static str) -> Result<i64, ValidationError> {
        self.get(name)
            .parse()
            .map_err(|_| ValidationError::NotANumber { label })
    }

    /// Parse an optional ISO date.
    pub fn date(&self, name: &str, label: &'static str) -> Result<Option<NaiveDate>, ValidationError> {
        match self.get(name) {
            "" => Ok(None),
            raw => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| ValidationError::BadDate { label }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Input widget kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Date,
    Number,
    TextArea,
    Select(Vec<SelectOption>),
}

/// A form field with its pre-filled value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    pub value: String,
}

impl FormField {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            required: false,
            kind,
            value: String::new(),
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn select(name: &'static str, label: &'static str, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, FieldKind::Select(options))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Pre-fill from an optional value.
    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_optional<T: ToString>(self, value: Option<T>) -> Self {
        match value {
            Some(v) => self.with_value(v),
            None => self,
        }
    }

    /// Options of a select field; empty for free-text kinds.
    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::Select(options) => options,
            _ => &[],
        }
    }
}
