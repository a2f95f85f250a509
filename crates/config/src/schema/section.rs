//! Field-by-field reader over one YAML mapping.
//!
//! A `Section` consumes keys from its input mapping, checks and coerces each
//! value, and writes the normalized value to its output mapping. Errors are
//! pushed to a shared list so a single pass reports every problem. Whatever
//! is left in the input once the section is finished is an unknown key.

use serde_yaml::{Mapping, Number, Value};

use super::Mode;
use super::coerce;
use super::error::FieldError;

/// Path used for errors about the document itself.
pub(crate) const ROOT_PATH: &str = "<root>";

/// What to do when a field is absent. Ignored in partial mode, where every
/// field is optional and nothing is defaulted.
#[derive(Debug, Clone)]
pub(crate) enum Presence {
    Required,
    Optional,
    Default(Value),
}

impl Presence {
    pub(crate) fn default_str(value: &str) -> Self {
        Presence::Default(Value::String(value.to_string()))
    }

    pub(crate) fn default_bool(value: bool) -> Self {
        Presence::Default(Value::Bool(value))
    }

    pub(crate) fn default_u64(value: u64) -> Self {
        Presence::Default(Value::Number(Number::from(value)))
    }

    /// A sub-section that is validated as empty when absent, so its own
    /// field defaults apply.
    pub(crate) fn default_section() -> Self {
        Presence::Default(Value::Mapping(Mapping::new()))
    }
}

/// Policy for keys a section does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnknownKeys {
    Reject,
    Drop,
}

pub(crate) struct Section<'e> {
    path: String,
    mode: Mode,
    input: Mapping,
    output: Mapping,
    errors: &'e mut Vec<FieldError>,
}

impl<'e> Section<'e> {
    /// Open a section over `value`. Reports an error and returns `None` when
    /// the value is not a mapping.
    pub(crate) fn open(
        path: String,
        value: Value,
        mode: Mode,
        errors: &'e mut Vec<FieldError>,
    ) -> Option<Self> {
        match value {
            Value::Mapping(input) => Some(Self {
                path,
                mode,
                input,
                output: Mapping::new(),
                errors,
            }),
            other => {
                let shown: &str = if path.is_empty() { ROOT_PATH } else { &path };
                errors.push(FieldError::new(
                    shown,
                    format!("must be a mapping, got {}", coerce::describe(&other)),
                ));
                None
            }
        }
    }

    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn error(&mut self, key: &str, message: impl Into<String>) {
        let path = self.field_path(key);
        self.errors.push(FieldError::new(path, message));
    }

    /// Remove `key` from the input. `null` counts as absent.
    pub(crate) fn take(&mut self, key: &str) -> Option<Value> {
        match self.input.remove(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn put(&mut self, key: &str, value: Value) {
        self.output.insert(Value::String(key.to_string()), value);
    }

    fn absent(&mut self, key: &str, presence: Presence) {
        if self.mode == Mode::Partial {
            return;
        }
        match presence {
            Presence::Required => self.error(key, "is required"),
            Presence::Optional => {}
            Presence::Default(value) => self.put(key, value),
        }
    }

    /// Generic field: convert the raw value or record why it was rejected.
    fn field(
        &mut self,
        key: &str,
        presence: Presence,
        convert: impl FnOnce(&Value) -> Result<Value, String>,
    ) {
        match self.take(key) {
            Some(raw) => match convert(&raw) {
                Ok(value) => self.put(key, value),
                Err(message) => self.error(key, message),
            },
            None => self.absent(key, presence),
        }
    }

    pub(crate) fn string(&mut self, key: &str, presence: Presence) {
        self.field(key, presence, |raw| coerce::string(raw).map(Value::String));
    }

    /// A string field with an extra check or normalization step.
    pub(crate) fn string_with(
        &mut self,
        key: &str,
        presence: Presence,
        check: impl FnOnce(String) -> Result<String, String>,
    ) {
        self.field(key, presence, |raw| {
            coerce::string(raw).and_then(check).map(Value::String)
        });
    }

    /// A string-or-boolean field.
    pub(crate) fn boolean(&mut self, key: &str, presence: Presence) {
        self.field(key, presence, |raw| coerce::boolean(raw).map(Value::Bool));
    }

    /// A string-or-integer field bounded by `max`.
    pub(crate) fn integer(&mut self, key: &str, presence: Presence, max: u64) {
        self.field(key, presence, |raw| {
            coerce::integer(raw, max).map(|n| Value::Number(Number::from(n)))
        });
    }

    /// A nested mapping validated by `build`.
    pub(crate) fn section(
        &mut self,
        key: &str,
        presence: Presence,
        unknown: UnknownKeys,
        build: impl FnOnce(&mut Section<'_>),
    ) {
        let raw = match self.take(key) {
            Some(raw) => raw,
            None => match (self.mode, presence) {
                (Mode::Full, Presence::Required) => {
                    self.error(key, "is required");
                    return;
                }
                (Mode::Full, Presence::Default(value)) => value,
                _ => return,
            },
        };

        let path = self.field_path(key);
        let mode = self.mode;
        let Some(mut child) = Section::open(path, raw, mode, &mut *self.errors) else {
            return;
        };
        build(&mut child);
        let normalized = child.finish(unknown);
        self.put(key, Value::Mapping(normalized));
    }

    /// Apply the unknown-key policy and return the normalized mapping.
    pub(crate) fn finish(self, unknown: UnknownKeys) -> Mapping {
        for key in self.input.keys() {
            let name = match key {
                Value::String(s) => s.clone(),
                other => format!("{other:?}"),
            };
            let path = if self.path.is_empty() {
                name
            } else {
                format!("{}.{}", self.path, name)
            };
            match unknown {
                UnknownKeys::Reject => {
                    self.errors.push(FieldError::new(path, "unknown key"));
                }
                UnknownKeys::Drop => {
                    tracing::debug!(key = %path, "Dropping unknown configuration key");
                }
            }
        }
        self.output
    }
}
