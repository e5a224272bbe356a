use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::checkpoint::DEFAULT_CAPACITY;

/// Tunables for the checkpoint stack and the tree dumps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of open checkpoint frames
    pub stack_capacity: usize,

    /// Characters of a string attribute shown by the tree dump
    pub preview_len: usize,

    /// Extra indentation per tree level in the tree dump
    pub indent_width: usize,

    /// Attributes whose names start with this are internal and not dumped
    pub reserved_prefix: char,

    /// Whether printed dumps use terminal colors
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stack_capacity: DEFAULT_CAPACITY,
            preview_len: 40,
            indent_width: 6,
            reserved_prefix: '$',
            color: false,
        }
    }
}

impl Config {
    /// Load a TOML file on top of the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Parse TOML; fields that are not given keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let partial: PartialConfig = toml::from_str(contents).context("Failed to parse config")?;
        let mut config = Config::default();
        config.merge(partial);
        Ok(config)
    }

    /// Merge partial config into this one (partial takes precedence for specified fields)
    fn merge(&mut self, other: PartialConfig) {
        if let Some(val) = other.stack_capacity {
            self.stack_capacity = val;
        }
        if let Some(val) = other.preview_len {
            self.preview_len = val;
        }
        if let Some(val) = other.indent_width {
            self.indent_width = val;
        }
        if let Some(val) = other.reserved_prefix {
            self.reserved_prefix = val;
        }
        if let Some(val) = other.color {
            self.color = val;
        }
    }
}

/// Partial configuration for deserializing from TOML with optional fields
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    stack_capacity: Option<usize>,
    preview_len: Option<usize>,
    indent_width: Option<usize>,
    reserved_prefix: Option<char>,
    color: Option<bool>,
}
