pub(crate) mod handler;

pub use handler::{PluginContainer, PluginContainerError};

use crate::config::ServerConfig;
use accounts::plugin::AccountsPlugin;
use plugin_api::Plugin;

/// Plugins served by this build, configured for the current process.
pub(crate) fn registry(config: &ServerConfig) -> Vec<Box<dyn Plugin>> {
    vec![Box::new(AccountsPlugin::new(config.seed_path.clone()))]
}
