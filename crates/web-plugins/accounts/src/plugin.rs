use super::{seed::load_seed, store::AccountStore, web};
use axum::Router;
use filesystem::{FileSystem, StdFileSystem};
use plugin_api::{Plugin, PluginError};
use std::{path::PathBuf, sync::Arc};

/// Serves the account registry under `/api/v1`.
pub struct AccountsPlugin {
    seed_path: Option<PathBuf>,
    filesystem: Arc<dyn FileSystem>,
    store: Arc<AccountStore>,
}

impl AccountsPlugin {
    pub fn new(seed_path: Option<PathBuf>) -> Self {
        Self::with_filesystem(seed_path, StdFileSystem)
    }

    pub fn with_filesystem(seed_path: Option<PathBuf>, filesystem: impl FileSystem) -> Self {
        Self {
            seed_path,
            filesystem: Arc::new(filesystem),
            store: Arc::new(AccountStore::new()),
        }
    }
}

impl Plugin for AccountsPlugin {
    fn name(&self) -> &'static str {
        "accounts"
    }

    fn mount(&mut self) -> Result<(), PluginError> {
        let Some(seed_path) = &self.seed_path else {
            tracing::debug!("no seed file configured, starting with an empty registry");
            return Ok(());
        };

        let accounts = load_seed(self.filesystem.as_ref(), seed_path).map_err(|e| {
            PluginError::InitError(format!("Error loading seed accounts: {e}"))
        })?;

        tracing::info!(
            "seeded {} accounts from {}",
            accounts.len(),
            seed_path.display()
        );
        self.store.replace_all(accounts);

        Ok(())
    }

    fn unmount(&self) -> Result<(), PluginError> {
        tracing::debug!("dropping {} in-memory accounts", self.store.len());
        Ok(())
    }

    fn routes(&self) -> Router {
        web::routes(self.store.clone())
    }
}
