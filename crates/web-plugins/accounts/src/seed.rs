use crate::{
    error::AccountError,
    model::Account,
    validation::{account_id_from_value, parse_account_id},
};
use filesystem::FileSystem;
use serde_json::Value;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Startup failures while loading the initial accounts. Any of them is fatal.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("seed file must hold a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("invalid seed entry {key}: {source}")]
    InvalidEntry {
        key: String,
        #[source]
        source: AccountError,
    },

    #[error("seed entry {key} holds account {orgno}")]
    KeyMismatch { key: String, orgno: u64 },

    #[error("duplicate seed entry for account {0}")]
    Duplicate(String),
}

/// Reads the initial account mapping from a JSON file.
///
/// The top-level value must be an object mapping account ids to account
/// records. Keys are canonicalized and must match the `orgno` of the record
/// they hold.
pub fn load_seed(fs: &dyn FileSystem, path: &Path) -> Result<HashMap<String, Account>, SeedError> {
    let content = fs.read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_owned(),
        source,
    })?;

    let entries = match serde_json::from_str::<Value>(&content)? {
        Value::Object(entries) => entries,
        other => return Err(SeedError::NotAnObject(json_kind(&other))),
    };

    let mut accounts = HashMap::with_capacity(entries.len());
    for (key, value) in entries {
        let invalid = |source: AccountError| SeedError::InvalidEntry {
            key: key.clone(),
            source,
        };

        let id = parse_account_id(Some(&key)).map_err(invalid)?;
        let record = value.as_object().ok_or_else(|| {
            invalid(AccountError::InvalidPayload("expected a JSON object".to_owned()))
        })?;
        let orgno = account_id_from_value(record.get("orgno")).map_err(invalid)?;
        if orgno != id {
            return Err(SeedError::KeyMismatch {
                key: key.clone(),
                orgno: orgno.value(),
            });
        }

        let account = Account::from_payload(id, record).map_err(invalid)?;
        if accounts.insert(id.key(), account).is_some() {
            return Err(SeedError::Duplicate(id.key()));
        }
    }

    tracing::debug!("loaded {} accounts from {}", accounts.len(), path.display());
    Ok(accounts)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
