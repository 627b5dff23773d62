//! Configuration for the text and HTML renderers.
//!
//! `RenderConfig` gathers the presentation knobs so renderers take one value
//! instead of a growing list of flags.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How `Changed` cells are marked up in text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellMarkup {
    /// `[-old-]{+new+}` around the full values.
    #[default]
    Whole,
    /// Character-level diff, e.g. `m1,1` -> `m1,x` renders as `m1,[-1-]{+x+}`.
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub markup: CellMarkup,
    /// HTML document title; the report name is used when unset.
    pub title: Option<String>,
    /// Include the left and right tables as context in HTML reports.
    pub include_context: bool,
    /// Include the unfiltered diff grid in HTML reports.
    pub include_full_diff: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            markup: CellMarkup::Whole,
            title: None,
            include_context: true,
            include_full_diff: true,
        }
    }
}

impl RenderConfig {
    /// Differences only: no full diff or context in HTML reports.
    pub fn compact() -> Self {
        Self {
            include_context: false,
            include_full_diff: false,
            ..Default::default()
        }
    }

    /// Inline cell markup plus every HTML section.
    pub fn detailed() -> Self {
        Self {
            markup: CellMarkup::Inline,
            ..Default::default()
        }
    }

    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            inner: RenderConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ConfigError::BlankTitle);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("title must not be blank")]
    BlankTitle,
}

#[derive(Debug, Clone)]
pub struct RenderConfigBuilder {
    inner: RenderConfig,
}

impl Default for RenderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderConfigBuilder {
    pub fn new() -> Self {
        RenderConfig::builder()
    }

    pub fn markup(mut self, value: CellMarkup) -> Self {
        self.inner.markup = value;
        self
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.inner.title = Some(value.into());
        self
    }

    pub fn include_context(mut self, value: bool) -> Self {
        self.inner.include_context = value;
        self
    }

    pub fn include_full_diff(mut self, value: bool) -> Self {
        self.inner.include_full_diff = value;
        self
    }

    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
