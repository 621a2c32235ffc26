//! Configuration types for pattern compilation.
//!
//! Every section implements [`serde::Deserialize`] and falls back to its
//! defaults, so hosts may load any subset from an external source.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`FlagsConfig`] - Flags applied to every pattern.
//! - [`EmitterConfig`] - Controls the shape of the emitted pattern.
//!
//! # Example
//!
//! ```
//! # use strling::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.flags().flags().is_empty());
//! assert!(config.emitter().inline_flags());
//! ```

use serde::Deserialize;

use strling_core::Flags;

/// Top-level configuration combining flag and emitter settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Flag configuration section.
    #[serde(default)]
    flags: FlagsConfig,

    /// Emitter configuration section.
    #[serde(default)]
    emitter: EmitterConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `flags` - Flags merged into every parsed pattern.
    /// * `emitter` - Emitter output options.
    pub fn new(flags: FlagsConfig, emitter: EmitterConfig) -> Self {
        Self { flags, emitter }
    }

    /// Returns the flag configuration.
    pub fn flags(&self) -> &FlagsConfig {
        &self.flags
    }

    /// Returns the emitter configuration.
    pub fn emitter(&self) -> &EmitterConfig {
        &self.emitter
    }
}

/// Flags applied to every pattern, on top of its own `%flags` directive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlagsConfig {
    /// Flag letters, e.g. `"im"`.
    #[serde(default)]
    default: Option<String>,
}

impl FlagsConfig {
    /// Creates a section from flag letters.
    pub fn new(letters: impl Into<String>) -> Self {
        Self {
            default: Some(letters.into()),
        }
    }

    /// The configured letters, if any.
    pub fn letters(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The configured letters as [`Flags`]. Unknown letters are ignored.
    pub fn flags(&self) -> Flags {
        self.default
            .as_deref()
            .map(Flags::from_letters)
            .unwrap_or_default()
    }
}

/// Emitter output options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Prefix the pattern with an inline `(?imsux)` group.
    inline_flags: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self { inline_flags: true }
    }
}

impl EmitterConfig {
    pub fn new(inline_flags: bool) -> Self {
        Self { inline_flags }
    }

    /// Returns whether flags are emitted inline.
    pub fn inline_flags(&self) -> bool {
        self.inline_flags
    }
}
