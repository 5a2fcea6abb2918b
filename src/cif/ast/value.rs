//! Value literals
//!
//! A value keeps the exact text of its literal plus how it was quoted. Quoting
//! matters: a bare `?` means "unknown" and a bare `.` means "inapplicable",
//! while `'?'` is just a one-character string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Numeric literal with an optional standard uncertainty, e.g. `1.234(5)`
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?(?:\d+\.?\d*|\.\d+))(?:[eE]([+-]?\d+))?(?:\((\d+)\))?$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quoting {
    Bare,
    SingleQuoted,
    DoubleQuoted,
}

/// A single value literal from a loop row or tag-value pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Value {
    pub text: String,
    pub quoting: Quoting,
}

/// A numeric reading of a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: f64,
    /// Standard uncertainty, scaled to the units of `value`
    pub su: Option<f64>,
}

impl Value {
    pub fn new(text: impl Into<String>, quoting: Quoting) -> Self {
        Self {
            text: text.into(),
            quoting,
        }
    }

    pub fn bare(text: impl Into<String>) -> Self {
        Self::new(text, Quoting::Bare)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_quoted(&self) -> bool {
        self.quoting != Quoting::Bare
    }

    /// Bare `?`: the value exists but is not known
    pub fn is_unknown(&self) -> bool {
        !self.is_quoted() && self.text == "?"
    }

    /// Bare `.`: no value applies
    pub fn is_inapplicable(&self) -> bool {
        !self.is_quoted() && self.text == "."
    }

    /// Interpret a bare literal as a number
    ///
    /// The uncertainty digits apply to the last decimal place of the mantissa,
    /// so `1.234(5)` reads as 1.234 with su 0.005 and `15e2(3)` as 1500 with su 300.
    pub fn as_number(&self) -> Option<Number> {
        if self.is_quoted() {
            return None;
        }
        let caps = NUMBER_REGEX.captures(&self.text)?;
        let mantissa = caps.get(1)?.as_str();
        let exponent: i32 = match caps.get(2) {
            Some(exp) => exp.as_str().parse().ok()?,
            None => 0,
        };

        let value = format!("{}e{}", mantissa, exponent).parse::<f64>().ok()?;
        let su = match caps.get(3) {
            Some(digits) => {
                let decimals = match mantissa.split_once('.') {
                    Some((_, frac)) => i32::try_from(frac.len()).ok()?,
                    None => 0,
                };
                let scale = exponent.checked_sub(decimals)?;
                let digits: f64 = digits.as_str().parse().ok()?;
                Some(digits * 10f64.powi(scale))
            }
            None => None,
        };

        Some(Number { value, su })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quoting {
            Quoting::Bare => write!(f, "{}", self.text),
            Quoting::SingleQuoted => write!(f, "'{}'", self.text),
            Quoting::DoubleQuoted => write!(f, "\"{}\"", self.text),
        }
    }
}
