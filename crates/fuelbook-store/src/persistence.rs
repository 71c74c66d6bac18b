//! Persistence backends for the ledger.

use fuelbook_core::LedgerEntry;

use crate::StoreError;

/// Durable storage for the full ledger table.
///
/// The store loads the whole table once and writes the whole table back
/// after every append. Backends able to append a single row can override
/// [`LedgerPersistence::append`]; the default replaces the whole table.
pub trait LedgerPersistence {
    /// Load every entry, in stored order.
    fn load(&self) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Replace the stored table with `entries`.
    fn save(&mut self, entries: &[LedgerEntry]) -> Result<(), StoreError>;

    /// Persist `entries` after `appended` was pushed onto the end.
    fn append(
        &mut self,
        entries: &[LedgerEntry],
        appended: &LedgerEntry,
    ) -> Result<(), StoreError> {
        let _ = appended;
        self.save(entries)
    }

    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;
}

/// In-memory persistence, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    entries: Vec<LedgerEntry>,
    saves: usize,
}

impl MemoryLedger {
    /// Create an empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory ledger holding `entries`.
    #[must_use]
    pub const fn with_entries(entries: Vec<LedgerEntry>) -> Self {
        Self { entries, saves: 0 }
    }

    /// The last saved table.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// How many times the table has been written.
    #[must_use]
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl LedgerPersistence for MemoryLedger {
    fn load(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[LedgerEntry]) -> Result<(), StoreError> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
