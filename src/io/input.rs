use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while loading the record file.
///
/// These are the only fatal input conditions: a file that cannot be read, or
/// a file that is not valid JSON. Missing or wrong-shaped fields inside valid
/// JSON are tolerated downstream by the normalizer.
#[derive(Debug, Error)]
pub enum InputError {
    /// The record file could not be read
    #[error("failed to read record file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The record file is not valid JSON
    #[error("record file {path} is not valid JSON")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the optional JSON record file into a raw value.
///
/// `None` means "empty record" and yields `Value::Null`, which the
/// normalizer coerces to an empty report.
pub fn load_record_file(path: Option<&Path>) -> Result<Value, InputError> {
    let Some(path) = path else {
        return Ok(Value::Null);
    };
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| InputError::Parse {
        path: path.display().to_string(),
        source,
    })
}
