pub mod json_backend;

use crate::errors::Result;
use crate::ledger::LedgerState;

/// Abstraction over the opaque blob store holding the serialized ledger.
/// The engine assumes a single writer; nothing here locks or merges.
pub trait StateStore: Send + Sync {
    /// Returns the stored state, or `None` on first run.
    fn load(&self) -> Result<Option<LedgerState>>;
    fn save(&self, state: &LedgerState) -> Result<()>;
}

pub use json_backend::JsonStore;
