#![forbid(unsafe_code)]

//! Panel view configuration.
//!
//! [`PanelsConfig`] collects every caller-tunable knob of a panel view. It is
//! immutable for the lifetime of a navigation session; build a new engine to
//! change it.
//!
//! # Loading
//!
//! With the `policy-config` feature the config can be loaded from TOML or
//! JSON:
//!
//! ```toml
//! # panels.toml
//! animated = true
//! infinite = true
//! transition_next = "fade"
//!
//! [retention]
//! enabled = true
//! max = 4
//! exclude = { names = ["scratch"] }
//! ```
//!
//! ```rust,ignore
//! let config = PanelsConfig::from_toml_file("panels.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! Everything off: no animation, no wraparound, no swipe, horizontal, no
//! retention.

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};

use crate::direction::TransitionPolicy;
use crate::retention::{RetentionCache, RetentionFilter};

/// Configuration of a panel view.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct PanelsConfig {
    /// Play named transitions between panels.
    pub animated: bool,
    /// Wrap around past the first/last enabled panel.
    pub infinite: bool,
    /// React to swipe gestures.
    pub swipeable: bool,
    /// Vertical orientation (swipe axis and default transition axis).
    pub vertical: bool,
    /// Transition override for backward moves.
    pub transition_prev: Option<String>,
    /// Transition override for forward moves.
    pub transition_next: Option<String>,
    /// Off-screen retention of visited panels.
    pub retention: RetentionConfig,
}

/// Retention settings.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct RetentionConfig {
    /// Keep visited panels mounted.
    pub enabled: bool,
    /// Only retain panels whose key matches.
    pub include: Option<RetentionFilter>,
    /// Never retain panels whose key matches.
    pub exclude: Option<RetentionFilter>,
    /// Upper bound on retained panels; unset means unbounded.
    pub max: Option<usize>,
}

impl PanelsConfig {
    /// Enable or disable transitions.
    #[must_use]
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Enable or disable wraparound.
    #[must_use]
    pub fn infinite(mut self, infinite: bool) -> Self {
        self.infinite = infinite;
        self
    }

    /// Enable or disable swipe navigation.
    #[must_use]
    pub fn swipeable(mut self, swipeable: bool) -> Self {
        self.swipeable = swipeable;
        self
    }

    /// Set vertical orientation.
    #[must_use]
    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// Override the backward and forward transition names.
    #[must_use]
    pub fn transitions(mut self, prev: Option<String>, next: Option<String>) -> Self {
        self.transition_prev = prev;
        self.transition_next = next;
        self
    }

    /// Replace retention settings.
    #[must_use]
    pub fn retention(mut self, retention: RetentionConfig) -> Self {
        self.retention = retention;
        self
    }

    /// Transition naming view of this config.
    #[must_use]
    pub fn transition_policy(&self) -> TransitionPolicy<'_> {
        TransitionPolicy {
            animated: self.animated,
            vertical: self.vertical,
            prev: self.transition_prev.as_deref(),
            next: self.transition_next.as_deref(),
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PanelsConfigError> {
        toml::from_str(s).map_err(PanelsConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PanelsConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PanelsConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, PanelsConfigError> {
        serde_json::from_str(s).map_err(PanelsConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PanelsConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PanelsConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn to_toml_string(&self) -> Result<String, PanelsConfigError> {
        toml::to_string_pretty(self).map_err(PanelsConfigError::TomlSer)
    }

    /// Check for settings that are accepted but almost certainly unintended.
    ///
    /// Returns a list of problems. An empty list means the config is clean.
    /// The engine accepts any config regardless.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("transition_prev", &self.transition_prev),
            ("transition_next", &self.transition_next),
        ] {
            if let Some(name) = value
                && name.chars().any(char::is_whitespace)
            {
                errors.push(format!("{field} must not contain whitespace, got {name:?}"));
            }
        }

        let retention = &self.retention;
        if retention.max == Some(0) {
            errors.push("retention.max must be > 0 (omit it for no bound)".into());
        }
        if !retention.enabled
            && (retention.include.is_some()
                || retention.exclude.is_some()
                || retention.max.is_some())
        {
            errors.push("retention filters or max are set but retention.enabled is false".into());
        }

        errors
    }

    /// Return `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, PanelsConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PanelsConfigError::Validation(errors))
        }
    }
}

impl RetentionConfig {
    /// Retention on, unbounded, no filters.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Set the bound.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the include filter.
    #[must_use]
    pub fn include(mut self, filter: RetentionFilter) -> Self {
        self.include = Some(filter);
        self
    }

    /// Set the exclude filter.
    #[must_use]
    pub fn exclude(mut self, filter: RetentionFilter) -> Self {
        self.exclude = Some(filter);
        self
    }

    /// Build the keep-set, or `None` when retention is off.
    #[must_use]
    pub fn build_cache(&self) -> Option<RetentionCache> {
        if !self.enabled {
            return None;
        }
        let mut cache = RetentionCache::new();
        cache.set_filters(self.include.clone(), self.exclude.clone());
        cache.set_max(self.max);
        Some(cache)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`PanelsConfig`].
#[derive(Debug)]
pub enum PanelsConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "policy-config")]
    TomlSer(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "policy-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PanelsConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::TomlSer(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PanelsConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::TomlSer(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
