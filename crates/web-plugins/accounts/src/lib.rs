mod envelope;
mod error;
mod model;
mod seed;
mod store;
mod validation;
mod web;

pub mod plugin;

pub use envelope::Envelope;
pub use error::AccountError;
pub use model::{Account, AccountPatch};
pub use seed::{load_seed, SeedError};
pub use store::AccountStore;
pub use validation::{parse_account_id, AccountId};
