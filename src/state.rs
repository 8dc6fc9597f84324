use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::config::AppConfig;
use crate::data::filter::{FilterError, FilterOutcome, FilterState, apply_filters, init_filter_state};
use crate::data::loader::{self, LoadError, LoadSummary};
use crate::data::model::Table;
use crate::guide::Guide;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Which page the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Index into `Guide::pages`.
    Guide(usize),
    /// The live example dashboard.
    Dashboard,
}

// ---------------------------------------------------------------------------
// Dashboard session
// ---------------------------------------------------------------------------

/// What the dashboard tells the user about the current upload.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// Nothing uploaded yet (informational).
    NoInputYet,
    Loaded(LoadSummary),
    /// The last upload could not be parsed; no table is held.
    LoadFailed(String),
    /// An error caught at the outer boundary, with its cause chain.
    Failed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NoInputYet => write!(f, "Please upload a CSV file to begin analysis"),
            Status::Loaded(summary) => write!(f, "{summary}"),
            Status::LoadFailed(msg) => write!(f, "Error loading data: {msg}"),
            Status::Failed(msg) => write!(f, "An error occurred: {msg}"),
        }
    }
}

/// One user's upload and filter selections. Replaced wholesale on every upload.
#[derive(Debug)]
pub struct Session {
    /// Loaded table (None until a file parses).
    pub table: Option<Table>,

    /// One control per column of `table`.
    pub filters: FilterState,

    /// Rows passing the current filters (cached until the next change).
    pub outcome: Option<FilterOutcome>,

    pub status: Status,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            table: None,
            filters: FilterState::default(),
            outcome: None,
            status: Status::NoInputYet,
        }
    }
}

impl Session {
    /// Load from an optional reader. `source` names the input in logs.
    pub fn load_from<R: Read>(&mut self, input: Option<R>, source: &str) {
        match loader::load(input) {
            Ok(Some((table, summary))) => {
                log::info!(
                    "Loaded {source}: {} rows, columns {:?}",
                    summary.rows,
                    table.columns.iter().map(|c| &c.name).collect::<Vec<_>>()
                );
                self.set_table(table, summary);
            }
            Ok(None) => self.clear(Status::NoInputYet),
            Err(e) => self.load_failed(source, e),
        }
    }

    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok((table, summary)) => {
                log::info!("Loaded {}: {summary}", path.display());
                self.set_table(table, summary);
            }
            Err(e) => self.load_failed(&path.display().to_string(), e),
        }
    }

    /// Ingest a freshly parsed table with every filter at pass-through.
    pub fn set_table(&mut self, table: Table, summary: LoadSummary) {
        self.filters = init_filter_state(&table);
        self.outcome = None;
        self.table = Some(table);
        self.status = Status::Loaded(summary);
        // Fresh controls cannot name a missing column.
        if let Err(e) = self.refilter() {
            log::error!("Initial filter pass failed: {e}");
        }
    }

    fn load_failed(&mut self, source: &str, err: LoadError) {
        log::error!("Failed to load {source}: {err}");
        self.clear(Status::LoadFailed(err.to_string()));
    }

    fn clear(&mut self, status: Status) {
        self.table = None;
        self.filters.clear();
        self.outcome = None;
        self.status = status;
    }

    /// Recompute the filtered view after a control change.
    pub fn refilter(&mut self) -> Result<(), FilterError> {
        self.outcome = apply_filters(self.table.as_ref(), &self.filters)?;
        if let Some(outcome) = &self.outcome {
            log::debug!("Refiltered: {} of {} rows visible", outcome.visible.len(), outcome.total);
        }
        Ok(())
    }

    /// Put every control back to pass-through.
    pub fn reset_filters(&mut self) {
        for control in &mut self.filters {
            control.reset();
        }
    }

    /// Rows to show: the filtered view, or every row when no filtering ran.
    pub fn visible_rows(&self) -> Vec<usize> {
        match (&self.outcome, &self.table) {
            (Some(outcome), _) => outcome.visible.clone(),
            (None, Some(table)) => (0..table.n_rows()).collect(),
            (None, None) => Vec::new(),
        }
    }

    pub fn filter_summary(&self) -> Option<String> {
        self.outcome.as_ref().and_then(FilterOutcome::summary)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub page: Page,
    pub guide: Guide,
    /// Set when the embedded guide content failed to load.
    pub guide_error: Option<String>,
    pub session: Session,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let (guide, guide_error) = match Guide::embedded() {
            Ok(guide) => (guide, None),
            Err(e) => {
                log::warn!("Guide content unavailable: {e}");
                (Guide::default(), Some(format!("Guide content unavailable: {e}")))
            }
        };
        let page = if guide.pages.is_empty() {
            Page::Dashboard
        } else {
            Page::Guide(0)
        };
        Self {
            page,
            guide,
            guide_error,
            session: Session::default(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::ControlKind;
    use crate::data::model::CellValue;

    const CARS: &str = "Make,Year\nFord,2019\nAudi,2019\nFord,2020\nKia,2021\nFord,2021\nAudi,2021\n";

    fn loaded() -> Session {
        let mut session = Session::default();
        session.load_from(Some(CARS.as_bytes()), "cars.csv");
        session
    }

    #[test]
    fn starts_with_nothing_loaded() {
        let mut session = Session::default();
        assert_eq!(session.status, Status::NoInputYet);
        session.load_from::<&[u8]>(None, "nothing");
        assert_eq!(session.status, Status::NoInputYet);
        assert!(session.visible_rows().is_empty());
        assert_eq!(
            session.status.to_string(),
            "Please upload a CSV file to begin analysis"
        );
    }

    #[test]
    fn load_initialises_filters_and_view() {
        let session = loaded();
        assert_eq!(
            session.status,
            Status::Loaded(LoadSummary { rows: 6, columns: 2 })
        );
        assert_eq!(session.filters.len(), 2);
        assert_eq!(session.visible_rows(), (0..6).collect::<Vec<_>>());
        assert_eq!(session.filter_summary(), None);
    }

    #[test]
    fn failed_upload_returns_to_no_table() {
        let mut session = loaded();
        session.load_from(Some("a,b\n1\n".as_bytes()), "broken.csv");
        assert!(session.table.is_none());
        assert!(session.filters.is_empty());
        assert!(matches!(session.status, Status::LoadFailed(_)));
        assert!(session.status.to_string().starts_with("Error loading data:"));

        session.load_from(Some(CARS.as_bytes()), "cars.csv");
        assert!(session.table.is_some());
    }

    #[test]
    fn refilter_and_reset() {
        let mut session = loaded();
        if let ControlKind::Categorical { selected, .. } = &mut session.filters[1].kind {
            selected.insert(CellValue::Integer(2021));
        }
        session.refilter().unwrap();
        assert_eq!(session.visible_rows(), vec![3, 4, 5]);
        assert_eq!(
            session.filter_summary().as_deref(),
            Some("Filtered data: 3 rows (from 6 total)")
        );

        session.reset_filters();
        session.refilter().unwrap();
        assert_eq!(session.visible_rows().len(), 6);
    }

    #[test]
    fn app_opens_on_first_guide_page() {
        let state = AppState::new(AppConfig::default());
        assert_eq!(state.page, Page::Guide(0));
        assert!(state.guide_error.is_none());
    }
}
