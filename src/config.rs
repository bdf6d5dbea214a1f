//! Board configuration.
//!
//! Configuration is read from a YAML file and includes:
//! - The workflow columns, in display order
//! - The table-size labels offered by the add/edit forms
//! - The column that receives newly added orders
//! - Switches that restore legacy interaction quirks

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Workflow columns in display order
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,

    /// Table-size labels, in the order they appear in the select
    #[serde(default = "default_tables")]
    pub tables: Vec<String>,

    /// Column that new orders are appended to
    #[serde(default = "default_intake_column")]
    pub intake_column: String,

    /// Legacy interaction behavior
    #[serde(default, skip_serializing_if = "LegacyBehavior::is_default")]
    pub legacy: LegacyBehavior,
}

fn default_columns() -> Vec<String> {
    vec![
        "ordered".to_string(),
        "preparing".to_string(),
        "served".to_string(),
    ]
}

fn default_tables() -> Vec<String> {
    (1..=9).map(|n| n.to_string()).collect()
}

fn default_intake_column() -> String {
    "ordered".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            tables: default_tables(),
            intake_column: default_intake_column(),
            legacy: LegacyBehavior::default(),
        }
    }
}

/// Switches for the interaction quirks of the first board release.
///
/// All default to `false`, i.e. the corrected behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyBehavior {
    /// Drop appends the card to the raw event target instead of the column
    /// container resolved from it. A drop on another card still lands next
    /// to that card, never inside it.
    #[serde(default)]
    pub drop_into_event_target: bool,

    /// Opening the add overlay focuses the opener button instead of the
    /// title field
    #[serde(default)]
    pub focus_opener_on_add: bool,

    /// Drag end clears the highlight only on the section enclosing the event
    /// target instead of on every column
    #[serde(default)]
    pub drag_end_clears_closest_section: bool,
}

impl LegacyBehavior {
    /// Every legacy switch turned on
    pub fn all() -> Self {
        Self {
            drop_into_event_target: true,
            focus_opener_on_add: true,
            drag_end_clears_closest_section: true,
        }
    }

    /// Check if this config has default values (for serialization skip)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Config {
    /// Load configuration from a YAML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BoardError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text and validate it
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the column and table sets for consistency
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(BoardError::Config(
                "at least one column must be configured".to_string(),
            ));
        }

        for (i, column) in self.columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(BoardError::Config("column names cannot be blank".to_string()));
            }
            if self.columns[..i].contains(column) {
                return Err(BoardError::Config(format!("duplicate column '{column}'")));
            }
        }

        if self.tables.is_empty() {
            return Err(BoardError::Config(
                "at least one table size must be configured".to_string(),
            ));
        }

        if !self.has_column(&self.intake_column) {
            return Err(BoardError::Config(format!(
                "intake column '{}' is not one of the configured columns",
                self.intake_column
            )));
        }

        Ok(())
    }

    /// Check whether a column name is configured
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}
