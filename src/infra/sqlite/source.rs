use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::ledger::{Expense, Movement};
use crate::infra::sqlite::queries::{query_page, LedgerTable};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::source::{FetchPage, FetchParams, RecordSource, SourceError};

/// Ledger database serving movements and expenses, with filtering and
/// pagination pushed down into SQL.
#[derive(Debug, Clone)]
pub struct SqliteLedger {
    pub db_path: PathBuf,
}

impl SqliteLedger {
    pub fn open(db_path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let db_path = db_path.into();
        init_db(&db_path)?;
        Ok(Self { db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn fetch_table<T: LedgerTable>(
        &self,
        params: &FetchParams,
    ) -> Result<FetchPage<T>, SourceError> {
        if !self.db_path.exists() {
            return Err(SourceError::Unavailable(self.db_path.display().to_string()));
        }
        let page = query_page::<T>(&self.db_path, params)?;
        debug!(
            table = T::TABLE,
            rows = page.records.len(),
            total = page.total,
            "fetched ledger page"
        );
        Ok(page)
    }
}

impl RecordSource<Movement> for SqliteLedger {
    fn fetch(&self, params: &FetchParams) -> Result<FetchPage<Movement>, SourceError> {
        self.fetch_table(params)
    }
}

impl RecordSource<Expense> for SqliteLedger {
    fn fetch(&self, params: &FetchParams) -> Result<FetchPage<Expense>, SourceError> {
        self.fetch_table(params)
    }
}
