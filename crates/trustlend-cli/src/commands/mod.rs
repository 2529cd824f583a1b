pub mod assess;
pub mod lenders;
pub mod loans;

use std::path::PathBuf;

use clap::Args;

use crate::store::JsonFileStore;

/// Where records are persisted between runs.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Path to the JSON record store
    #[arg(long, env = "TRUSTLEND_STORE", default_value = "trustlend-store.json")]
    pub store: PathBuf,
}

impl StoreArgs {
    pub fn open(&self) -> JsonFileStore {
        JsonFileStore::open(&self.store)
    }
}
