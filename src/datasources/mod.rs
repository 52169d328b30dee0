pub mod context_file;
pub mod rules_file;

pub use context_file::{load_context, parse_context};
pub use rules_file::{check_rules, load_rules, parse_rules};

use crate::error::{Result, StandardsError};
use std::path::Path;

/// Serialization of a rule or context file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            _ => Err(StandardsError::InvalidData(format!(
                "unsupported file type {:?}, expected .json, .yaml or .yml",
                path
            ))),
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(StandardsError::NotFound(format!("{}", path.display())));
    }
    Ok(std::fs::read_to_string(path)?)
}
