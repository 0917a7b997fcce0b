//! Numeric PDF objects.

use crate::error::{Error, Result};
use crate::object::Object;
use std::fmt;
use std::str::FromStr;

/// A PDF number: integer or real, stored as `f64`.
///
/// The textual form is fixed at construction (or on [`increment`]) the way
/// it will appear in the file.
///
/// [`increment`]: PdfNumber::increment
#[derive(Debug, Clone, PartialEq)]
pub struct PdfNumber {
    value: f64,
    content: String,
}

impl PdfNumber {
    /// Number from a real value.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            content: format_real(value),
        }
    }

    /// Number from an integer; the text has no decimal point.
    pub fn from_int(value: i32) -> Self {
        Self {
            value: value as f64,
            content: value.to_string(),
        }
    }

    /// Parse a number, keeping the original text.
    ///
    /// Surrounding whitespace is ignored. Fails with
    /// [`Error::InvalidArgument`] when the text is not a finite number.
    pub fn parse(content: &str) -> Result<Self> {
        let value = content
            .trim()
            .parse::<f64>()
            .map_err(|e| Error::InvalidArgument(format!("{content} is not a valid number - {e}")))?;
        if !value.is_finite() {
            return Err(Error::InvalidArgument(format!("{content} is not a finite number")));
        }
        Ok(Self {
            value,
            content: content.to_string(),
        })
    }

    /// Value as `f64`.
    pub fn double_value(&self) -> f64 {
        self.value
    }

    /// Value as `f32`.
    pub fn float_value(&self) -> f32 {
        self.value as f32
    }

    /// Value truncated toward zero.
    pub fn int_value(&self) -> i32 {
        self.value as i32
    }

    /// Add one and refresh the text form.
    pub fn increment(&mut self) {
        self.value += 1.0;
        self.content = format_real(self.value);
    }

    /// Text form written into the file.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Convert to an [`Object`], integral values becoming `Integer`.
    pub fn to_object(&self) -> Object {
        if self.value.fract() == 0.0 && self.value.abs() < i64::MAX as f64 {
            Object::Integer(self.value as i64)
        } else {
            Object::Real(self.value)
        }
    }
}

impl FromStr for PdfNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PdfNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl From<PdfNumber> for Object {
    fn from(n: PdfNumber) -> Self {
        n.to_object()
    }
}

const MAX_REAL: f64 = f32::MAX as f64;

/// Format a real the way it is written into content and object streams:
/// integral values without a decimal point, others with at most five
/// decimals and no trailing zeros. NaN is written as 0 and infinities
/// are clamped to the largest real a reader must accept.
pub fn format_real(value: f64) -> String {
    let value = if value.is_nan() {
        0.0
    } else {
        value.clamp(-MAX_REAL, MAX_REAL)
    };
    if value == 0.0 {
        "0".to_string()
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let formatted = format!("{:.5}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}
