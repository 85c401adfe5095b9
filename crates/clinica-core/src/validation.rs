//! Field-level validation shared by every form.
//!
//! Validators are synchronous and pure. They either return a normalised value
//! or a [`FieldErrors`] map from field path to a user-facing message.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Field path (e.g. `vital_signs.temperature`) to error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. The first message for a path wins.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(path.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.errors.remove(path)
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// `Ok(value)` when no errors were recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{path}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Trim a required text field, recording `message` when it is empty.
pub fn required(errors: &mut FieldErrors, path: &str, value: &str, message: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(path, message);
    }
    trimmed.to_string()
}

/// Trim an optional text field; empty becomes `None`.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a required `YYYY-MM-DD` field.
pub fn required_date(
    errors: &mut FieldErrors,
    path: &str,
    value: &str,
    message: &str,
) -> Option<jiff::civil::Date> {
    let trimmed = required(errors, path, value, message);
    if trimmed.is_empty() {
        return None;
    }
    parse_date(errors, path, &trimmed)
}

/// Parse an optional `YYYY-MM-DD` field; empty becomes `None`.
pub fn optional_date(
    errors: &mut FieldErrors,
    path: &str,
    value: Option<&str>,
) -> Option<jiff::civil::Date> {
    let trimmed = optional(value)?;
    parse_date(errors, path, &trimmed)
}

fn parse_date(errors: &mut FieldErrors, path: &str, value: &str) -> Option<jiff::civil::Date> {
    match value.parse::<jiff::civil::Date>() {
        Ok(date) => Some(date),
        Err(_) => {
            errors.insert(path, "Data inválida");
            None
        }
    }
}

/// Loose e-mail shape check: `local@domain.tld`, no whitespace.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Validate a required e-mail field.
pub fn email(errors: &mut FieldErrors, path: &str, value: &str) -> String {
    let trimmed = value.trim();
    if !is_email(trimmed) {
        errors.insert(path, "Email inválido");
    }
    trimmed.to_string()
}

/// Validate a password's minimum length.
pub fn password(errors: &mut FieldErrors, path: &str, value: &str) -> String {
    if value.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(path, "A senha deve ter no mínimo 6 caracteres");
    }
    value.to_string()
}

pub const MIN_PASSWORD_LEN: usize = 6;
