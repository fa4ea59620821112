//! Patient form coercion.
//!
//! A form submits every field as text. The numeric columns are coerced to
//! floats before the request is built; everything else is passed through.

use super::types::PredictionRequest;
use thiserror::Error;

/// Form fields coerced to `f64` before submission.
pub const NUMERIC_FIELDS: [&str; 5] = [
    "age",
    "avg_glucose_level",
    "bmi",
    "hypertension",
    "heart_disease",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("missing form field: {0}")]
    MissingField(&'static str),
}

/// Ordered `(name, value)` pairs as submitted by a patient form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientForm {
    fields: Vec<(String, String)>,
}

impl PatientForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn text(&self, name: &'static str) -> Result<String, FormError> {
        self.get(name)
            .map(str::to_string)
            .ok_or(FormError::MissingField(name))
    }

    fn number(&self, name: &'static str) -> Result<f64, FormError> {
        self.get(name)
            .map(coerce_number)
            .ok_or(FormError::MissingField(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PatientForm {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PatientForm::new(), |form, (k, v)| form.field(k, v))
    }
}

/// Coerce a form value to a float the way a browser's `parseFloat` does.
///
/// Leading whitespace is skipped and the longest numeric prefix is read, so
/// `"28.1kg"` gives `28.1`. Input with no numeric prefix becomes NaN, which
/// serializes as JSON `null` and is left for the backend to reject.
pub fn coerce_number(value: &str) -> f64 {
    let value = value.trim_start();
    let unsigned = value.trim_start_matches(['+', '-']);
    // At most one sign.
    if value.len() - unsigned.len() <= 1 && unsigned.starts_with("Infinity") {
        return if value.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    numeric_prefix(value).parse().unwrap_or(f64::NAN)
}

/// Longest prefix of the form `[+-]digits[.digits][(e|E)[+-]digits]`, with
/// at least one mantissa digit. Empty when there is none.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let is_digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while is_digit(frac_end) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while is_digit(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    &s[..end]
}

impl PredictionRequest {
    /// Build a prediction request from submitted form fields.
    pub fn from_form(form: &PatientForm) -> Result<Self, FormError> {
        Ok(Self {
            gender: form.text("gender")?,
            age: form.number("age")?,
            hypertension: form.number("hypertension")?,
            heart_disease: form.number("heart_disease")?,
            ever_married: form.text("ever_married")?,
            work_type: form.text("work_type")?,
            residence_type: form.text("Residence_type")?,
            avg_glucose_level: form.number("avg_glucose_level")?,
            bmi: form.number("bmi")?,
            smoking_status: form.text("smoking_status")?,
        })
    }
}
