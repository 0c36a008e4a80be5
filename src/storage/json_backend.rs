use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::errors::{BudgetError, Result};
use crate::ledger::LedgerState;

use super::StateStore;

const DEFAULT_DIR_NAME: &str = ".allowance_core";
const STATE_FILE: &str = "state.json";
const TMP_SUFFIX: &str = "tmp";

/// Single-file JSON store with atomic tmp-then-rename writes.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Store rooted at the default application data directory.
    pub fn new_default() -> Result<Self> {
        Self::at_dir(&app_data_dir())
    }

    pub fn at_dir(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(STATE_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonStore {
    fn load(&self) -> Result<Option<LedgerState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&data)
            .map_err(|err| BudgetError::StorageError(format!("corrupt state file: {err}")))?;
        Ok(Some(state))
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Application data directory, `~/.allowance_core` unless
/// `ALLOWANCE_CORE_HOME` overrides it.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("ALLOWANCE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::at_dir(temp.path()).expect("json store");
        (store, temp)
    }

    #[test]
    fn load_reports_first_run_as_none() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        let mut state = LedgerState::new("2024-07");
        state.settings.annual_budget = 4_800.0;
        state
            .add_transaction(
                TransactionKind::Income,
                200.0,
                "Gift",
                NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
                None,
            )
            .unwrap();

        store.save(&state).expect("save state");
        let loaded = store.load().expect("load state").expect("state present");
        assert_eq!(loaded, state);
    }

    #[test]
    fn save_leaves_no_tmp_file_behind() {
        let (store, guard) = store_with_temp_dir();
        store.save(&LedgerState::new("2024-07")).expect("save");
        let leftovers: Vec<_> = std::fs::read_dir(guard.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext == TMP_SUFFIX)
                    .unwrap_or(false)
            })
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn corrupt_state_file_surfaces_a_storage_error() {
        let (store, _guard) = store_with_temp_dir();
        std::fs::write(store.path(), "{not json").unwrap();
        let err = store.load().expect_err("corrupt file must fail");
        assert!(matches!(err, BudgetError::StorageError(_)));
    }
}
