#![forbid(unsafe_code)]

//! Panel names and selection values.
//!
//! A [`PanelName`] identifies a panel and doubles as the selection value the
//! owner of a panel view hands to the engine. Names compare strictly: the
//! variant must match and so must the value, with no coercion between text,
//! numbers, and booleans.
//!
//! A selection is an `Option<PanelName>`; `None` is the "nothing selected"
//! value. See [`is_valid_name`](crate::selection::is_valid_name) for which
//! values can address a panel at all.

use std::fmt;

/// Identity of a panel.
///
/// # Equality
///
/// `Text("1") != Number(1.0)`. Numbers compare with IEEE `==`, so `NaN` never
/// equals itself and `0.0 == -0.0`.
#[derive(Debug, Clone)]
pub enum PanelName {
    /// A textual name.
    Text(String),
    /// A numeric name.
    Number(f64),
    /// A boolean name. `false` is a perfectly valid name.
    Bool(bool),
}

impl PanelName {
    /// Create a textual name.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::Text(name.into())
    }

    /// Whether this is the empty text name.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Stable rendering key for this name.
    ///
    /// Only used to key rendered or retained content, never for lookup.
    #[must_use]
    pub fn content_key(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for PanelName {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for PanelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write_number(f, *n),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Render numbers the way markup attributes spell them: `1` rather than
/// `1.0`, `-0` as `0`, `Infinity` for infinities, and exponent form
/// (`1e+21`, `1e-7`) outside `[1e-6, 1e21)`.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n != 0.0 && (n.abs() < 1e-6 || n.abs() >= 1e21) {
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{mantissa}e+{power}")
            }
            _ => f.write_str(&exp),
        }
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl From<&str> for PanelName {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PanelName {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PanelName {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PanelName {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for PanelName {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<usize> for PanelName {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for PanelName {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_equality_across_variants() {
        assert_ne!(PanelName::from("1"), PanelName::from(1));
        assert_ne!(PanelName::from("true"), PanelName::from(true));
        assert_ne!(PanelName::from(0), PanelName::from(false));
        assert_eq!(PanelName::from("a"), PanelName::text("a"));
        assert_eq!(PanelName::from(3), PanelName::from(3.0));
    }

    #[test]
    fn nan_never_equals_itself() {
        let nan = PanelName::from(f64::NAN);
        assert_ne!(nan, nan.clone());
    }

    #[test]
    fn signed_zero_is_equal() {
        assert_eq!(PanelName::from(0.0), PanelName::from(-0.0));
    }

    #[test]
    fn content_key_renders_numbers_without_fraction() {
        assert_eq!(PanelName::from(2).content_key(), "2");
        assert_eq!(PanelName::from(-0.0).content_key(), "0");
        assert_eq!(PanelName::from(1.5).content_key(), "1.5");
        assert_eq!(PanelName::from(f64::INFINITY).content_key(), "Infinity");
        assert_eq!(PanelName::from(f64::NEG_INFINITY).content_key(), "-Infinity");
        assert_eq!(PanelName::from(f64::NAN).content_key(), "NaN");
    }

    #[test]
    fn content_key_uses_exponent_outside_plain_range() {
        assert_eq!(PanelName::from(1e21).content_key(), "1e+21");
        assert_eq!(PanelName::from(-2.5e22).content_key(), "-2.5e+22");
        assert_eq!(PanelName::from(1e-7).content_key(), "1e-7");
        assert_eq!(PanelName::from(1.5e-9).content_key(), "1.5e-9");
        assert_eq!(PanelName::from(1e20).content_key(), "100000000000000000000");
        assert_eq!(PanelName::from(1e-6).content_key(), "0.000001");
    }

    #[test]
    fn content_key_for_text_and_bool() {
        assert_eq!(PanelName::from("settings").content_key(), "settings");
        assert_eq!(PanelName::from(false).content_key(), "false");
    }

    #[test]
    fn empty_text_detection() {
        assert!(PanelName::from("").is_empty_text());
        assert!(!PanelName::from(" ").is_empty_text());
        assert!(!PanelName::from(0).is_empty_text());
    }
}
