//! Implements a struct that holds the state of the web server.

use std::{path::Path, sync::Arc};

use crate::{
    Error,
    ledger::{Ledger, load_ledger},
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions loaded at startup. They are never modified, so the
    /// handlers share them without locking.
    pub ledger: Arc<Ledger>,
}

impl AppState {
    /// Create a new [AppState] that serves `ledger`.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }

    /// Create a new [AppState] that serves the ledger in the CSV file at `path`.
    ///
    /// # Errors
    /// Returns [Error::Load] if the ledger cannot be loaded.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let ledger = load_ledger(path)?;

        Ok(Self::new(ledger))
    }
}
