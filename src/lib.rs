#![doc(test(attr(deny(warnings))))]

//! Allowance Core maintains a rolling monthly spending allowance derived from
//! an annual target, records dated income and expense entries, and archives
//! completed months into a bounded history.

pub mod currency;
pub mod editor;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod manager;
pub mod rollover;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Allowance Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
