use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::config::DashboardConfig;
use crate::data::filter::{table_view, SortState};
use crate::data::loader::load_file;
use crate::data::model::{NumericField, StudentDataset, StudentRecord};
use crate::error::DataLoadError;
use crate::stats::Insights;

type LoadResult = Result<StudentDataset, DataLoadError>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded record set (None until a load succeeds).
    pub dataset: Option<StudentDataset>,

    /// Aggregates for `dataset` (computed once per load).
    pub insights: Option<Insights>,

    /// Table search text.
    pub search: String,

    /// Table sort column and direction.
    pub sort: SortState,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Pending background load, if any.
    pending: Option<(PathBuf, Receiver<LoadResult>)>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            insights: None,
            search: String::new(),
            sort: SortState::default(),
            status_message: None,
            pending: None,
        }
    }

    /// Whether a file loading operation is in progress.
    pub fn loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Read and parse `path` on a worker thread. The result is picked up by
    /// [`AppState::poll_load`].
    pub fn start_loading(&mut self, path: PathBuf) {
        let (tx, rx) = mpsc::channel();
        let worker_path = path.clone();
        thread::spawn(move || {
            // Receiver gone means the state was dropped; nothing to report.
            let _ = tx.send(load_file(&worker_path));
        });
        log::debug!("Loading {}", path.display());
        self.status_message = None;
        self.pending = Some((path, rx));
    }

    /// Apply a finished background load, if there is one.
    /// Returns `true` when the state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some((path, rx)) = &self.pending else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(DataLoadError::Disconnected),
        };
        let path = path.clone();
        self.pending = None;

        match result {
            Ok(dataset) => {
                log::info!("Loaded {} students from {}", dataset.len(), path.display());
                self.set_dataset(dataset);
            }
            Err(e) => self.fail_load(&path, &e),
        }
        true
    }

    /// Ingest a newly loaded dataset and compute its insights.
    pub fn set_dataset(&mut self, dataset: StudentDataset) {
        match Insights::compute(&dataset, &self.config) {
            Ok(insights) => {
                self.insights = Some(insights);
                self.dataset = Some(dataset);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Cannot summarise dataset: {e}");
                self.insights = None;
                self.dataset = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    fn fail_load(&mut self, path: &std::path::Path, err: &DataLoadError) {
        log::error!("Failed to load {}: {err:#}", path.display());
        self.status_message = Some(format!("Error: {err}"));
        self.dataset = None;
        self.insights = None;
    }

    /// Header click on a sortable column.
    pub fn click_sort(&mut self, column: NumericField) {
        self.sort.click(column);
        log::debug!("Sorting by {} ({:?})", column, self.sort.order);
    }

    /// Rows visible in the table for the current search and sort.
    pub fn visible_records(&self) -> Vec<&StudentRecord> {
        match &self.dataset {
            Some(ds) => table_view(ds.records(), &self.search, self.sort),
            None => Vec::new(),
        }
    }
}
