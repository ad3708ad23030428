use crate::{
    error::AccountError,
    model::{Account, AccountPatch},
    validation::{account_id_from_value, parse_account_id},
};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

/// In-memory registry of accounts keyed by organization number.
///
/// Every operation holds the map lock for its whole duration, so an
/// existence check and the mutation that follows it are atomic with
/// respect to concurrent requests.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Mutex<HashMap<String, Account>>,
    next_request_id: AtomicU64,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps the whole content of the store.
    pub fn replace_all(&self, accounts: HashMap<String, Account>) {
        *self.accounts.lock() = accounts;
    }

    /// Allocates the envelope id of a newly handled request.
    pub fn next_request_id(&self) -> u64 {
        self.next_request_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn len(&self) -> usize {
        self.accounts.lock().len()
    }

    pub fn get(&self, raw_id: &str) -> Result<Account, AccountError> {
        let id = parse_account_id(Some(raw_id))?;

        self.accounts
            .lock()
            .get(&id.key())
            .cloned()
            .ok_or_else(|| AccountError::NotFound(id.key()))
    }

    /// Accounts sorted by name. A non-zero `number` smaller than the count
    /// keeps only that many leading entries.
    pub fn list(&self, number: usize) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.lock().values().cloned().collect();
        accounts.sort_unstable_by(|a, b| a.name.cmp(&b.name));

        if number > 0 && number < accounts.len() {
            accounts.truncate(number);
        }

        accounts
    }

    pub fn create(&self, payload: &Value) -> Result<Account, AccountError> {
        let payload = payload
            .as_object()
            .ok_or_else(|| AccountError::InvalidPayload("expected a JSON object".to_owned()))?;
        let id = account_id_from_value(payload.get("orgno"))?;

        let mut accounts = self.accounts.lock();
        if accounts.contains_key(&id.key()) {
            return Err(AccountError::AlreadyExists(id.key()));
        }

        let account = Account::from_payload(id, payload)?;
        accounts.insert(id.key(), account.clone());
        tracing::info!("created account {id}");

        Ok(account)
    }

    /// Applies a partial update. The flag tells whether any field changed.
    pub fn edit(&self, raw_id: &str, payload: &Value) -> Result<(Account, bool), AccountError> {
        let id = parse_account_id(Some(raw_id))?;

        let mut accounts = self.accounts.lock();
        let account = accounts
            .get_mut(&id.key())
            .ok_or_else(|| AccountError::NotFound(id.key()))?;

        if !payload.is_object() {
            return Err(AccountError::InvalidPayload(
                "expected a JSON object".to_owned(),
            ));
        }
        let patch = AccountPatch::deserialize(payload)
            .map_err(|err| AccountError::InvalidPayload(err.to_string()))?;

        let changed = account.apply(patch);
        if changed {
            tracing::info!("updated account {id}");
        }

        Ok((account.clone(), changed))
    }

    pub fn delete(&self, raw_id: &str) -> Result<Account, AccountError> {
        let id = parse_account_id(Some(raw_id))?;

        let account = self
            .accounts
            .lock()
            .remove(&id.key())
            .ok_or_else(|| AccountError::NotFound(id.key()))?;
        tracing::info!("deleted account {id}");

        Ok(account)
    }
}
