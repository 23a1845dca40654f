use std::collections::BTreeMap;
use std::fs;
use std::iter::FromIterator;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ErrorInfo, StimError};

fn serde_error(code: &str, err: impl ToString) -> StimError {
    StimError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic key ordering.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, StimError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("stim.json_encode", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer_pretty(&mut bytes, &canonical)
        .map_err(|err| serde_error("stim.json_write", err))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, StimError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("stim.yaml_decode", err))
}

/// Reads and decodes a YAML configuration file.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, StimError> {
    let bytes = fs::read(path).map_err(|err| StimError::from_io("stim.config_read", path, err))?;
    from_yaml_slice(&bytes).map_err(|err| match err {
        StimError::Serde(info) => {
            StimError::Serde(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })
}
