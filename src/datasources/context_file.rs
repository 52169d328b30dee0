use std::path::Path;

use serde_json::Value;

use super::{read_file, FileFormat};
use crate::error::{Result, StandardsError};
use crate::models::Context;

/// Reads a design snapshot assembled by the room builder.
pub fn load_context(path: &Path) -> Result<Context> {
    let format = FileFormat::from_path(path)?;
    let content = read_file(path)?;
    let context = parse_context(&content, format)?;
    tracing::debug!(keys = context.len(), path = %path.display(), "loaded design context");
    Ok(context)
}

pub fn parse_context(content: &str, format: FileFormat) -> Result<Context> {
    let value: Value = match format {
        FileFormat::Json => serde_json::from_str(content)?,
        FileFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Context::from_value(value).ok_or_else(|| {
        StandardsError::InvalidData("design context must be a map of keys to values".into())
    })
}
