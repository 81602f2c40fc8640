use std::sync::Arc;

use tracing::info;

use crate::domain::entities::record::Record;
use crate::domain::list::comparator::sort_records;
use crate::domain::list::predicate::build_predicate;
use crate::usecase::ports::export::{ExportError, ExportSummary, Exporter};
use crate::usecase::ports::source::{FetchParams, RecordSource};
use crate::usecase::services::list_view::{ListViewController, PagingMode, RefreshOutcome};
use crate::usecase::services::render::render_rows;

/// A list controller wired to the source that feeds it.
pub struct ListService<R> {
    source: Arc<dyn RecordSource<R>>,
    controller: ListViewController<R>,
}

impl<R: Record> ListService<R> {
    pub fn new(source: Arc<dyn RecordSource<R>>, controller: ListViewController<R>) -> Self {
        Self { source, controller }
    }

    pub fn controller(&self) -> &ListViewController<R> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ListViewController<R> {
        &mut self.controller
    }

    /// Runs one fetch cycle. When the source shrank under the current page,
    /// the clamped page is fetched once more.
    pub fn refresh(&mut self) -> RefreshOutcome {
        let outcome = self.refresh_once();
        if outcome == RefreshOutcome::Applied && self.controller.needs_refresh() {
            return self.refresh_once();
        }
        outcome
    }

    pub fn refresh_if_needed(&mut self) -> Option<RefreshOutcome> {
        self.controller.needs_refresh().then(|| self.refresh())
    }

    fn refresh_once(&mut self) -> RefreshOutcome {
        let ticket = self.controller.begin_refresh();
        let result = self.source.fetch(&ticket.params);
        self.controller.complete_refresh(ticket, result)
    }

    /// Exports every matching record in display order. Server-paginated
    /// lists fetch the unpaginated set first.
    pub fn export_with(
        &self,
        exporter: &dyn Exporter,
        columns: &[&str],
    ) -> Result<ExportSummary, ExportError> {
        let summary = match self.controller.mode() {
            PagingMode::Local => {
                let rows = render_rows(self.controller.export_rows(), columns);
                exporter.export(columns, &rows)?
            }
            PagingMode::Server => {
                let params = FetchParams {
                    criteria: self.controller.criteria().clone(),
                    sort: self.controller.sort().cloned(),
                    page: None,
                };
                let mut records = self.source.fetch(&params)?.records;
                let visible =
                    build_predicate::<R>(self.controller.criteria(), self.controller.spec());
                records.retain(|record| visible(record));
                if let Some(sort) = self.controller.sort() {
                    sort_records(&mut records, sort, self.controller.spec().tie_break);
                }
                let rows = render_rows(records.iter(), columns);
                exporter.export(columns, &rows)?
            }
        };
        info!(
            section = self.controller.spec().section,
            rows = summary.row_count,
            path = %summary.path.display(),
            "exported list"
        );
        Ok(summary)
    }
}
