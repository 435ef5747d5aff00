// Per-resource subcommands

use anyhow::{Context, Result};
use backoffice_core::{PageRequest, ResourceKind};
use clap::Subcommand;
use serde_json::Value;

use crate::app::Action;
use crate::routes::Route;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ResourceCommand {
    /// List one page, newest first
    List {
        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Items per page
        #[arg(long, default_value_t = PageRequest::DEFAULT_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
        size: u32,
    },

    /// Show one item
    Get {
        id: String,
    },

    /// Show the empty creation form
    New,

    /// Show the edit form for an item
    Edit {
        id: String,
    },

    /// Create from a YAML/JSON file
    Create {
        #[arg(short, long)]
        file: String,
    },

    /// Apply a partial update from a YAML/JSON file
    Update {
        id: String,

        #[arg(short, long)]
        file: String,
    },

    /// Delete an item
    Delete {
        id: String,
    },

    /// Flip the on/off field (approval for commentaries, enabled for users)
    Toggle {
        id: String,
    },
}

impl ResourceCommand {
    pub fn into_action(self, kind: ResourceKind) -> Result<Action> {
        Ok(match self {
            ResourceCommand::List { page, size } => Action::Open(Route::List { kind, page, size }),
            ResourceCommand::Get { id } => Action::Open(Route::Detail { kind, id }),
            ResourceCommand::New => Action::Open(Route::New { kind }),
            ResourceCommand::Edit { id } => Action::Open(Route::Edit { kind, id }),
            ResourceCommand::Create { file } => Action::Create {
                kind,
                payload: load_payload(&file)?,
            },
            ResourceCommand::Update { id, file } => Action::Update {
                kind,
                id,
                payload: load_payload(&file)?,
            },
            ResourceCommand::Delete { id } => Action::Delete { kind, id },
            ResourceCommand::Toggle { id } => Action::Toggle { kind, id },
        })
    }
}

/// Read a payload file; `-` reads stdin
pub fn load_payload(path: &str) -> Result<Value> {
    let content = if path == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?
    };
    parse_payload(path, &content)
}

fn parse_payload(path: &str, content: &str) -> Result<Value> {
    // Detect format by extension
    let value: Value = if path.ends_with(".json") {
        serde_json::from_str(content).with_context(|| format!("Failed to parse JSON: {}", path))?
    } else if path.ends_with(".yaml") || path.ends_with(".yml") {
        serde_yaml::from_str(content).with_context(|| format!("Failed to parse YAML: {}", path))?
    } else {
        // YAML is a superset of JSON
        serde_yaml::from_str(content)
            .with_context(|| format!("Failed to parse file (tried YAML and JSON): {}", path))?
    };

    if !value.is_object() {
        anyhow::bail!("{} must contain a mapping of field names to values", path);
    }
    Ok(value)
}
