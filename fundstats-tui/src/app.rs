//! Application state — single-owner, main-thread only.
//!
//! All dashboard state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use fundstats_core::{Dataset, RowCounts};
use fundstats_pipeline::{
    ApplyOutcome, DashboardUpdate, PublishedView, SelectionController, SelectionSnapshot,
};

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Which selector receives ←/→.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    FundType,
    Country,
}

impl Focus {
    pub fn toggle(self) -> Focus {
        match self {
            Focus::FundType => Focus::Country,
            Focus::Country => Focus::FundType,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::FundType => "Fund type",
            Focus::Country => "Country",
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Geo labels without a map position.
    Region,
    /// A chart projector failed.
    Chart,
    Worker,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Region => "GEO",
            ErrorCategory::Chart => "CHART",
            ErrorCategory::Worker => "WRK",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub overlay: Overlay,

    // Selection and the published dashboard
    pub controller: SelectionController,
    pub view: PublishedView,
    /// Newest generation sent to the worker and not yet published.
    pub pending: Option<u64>,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Dataset facts for the status bar
    pub fingerprint: String,
    pub row_counts: RowCounts,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
}

impl AppState {
    pub fn new(
        controller: SelectionController,
        dataset: &Dataset,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let mut app = Self {
            running: true,
            focus: Focus::Country,
            overlay: Overlay::None,
            controller,
            view: PublishedView::new(),
            pending: None,
            worker_tx,
            worker_rx,
            fingerprint: dataset.fingerprint().to_string(),
            row_counts: dataset.row_counts(),
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
        };

        for fault in dataset.region_report() {
            app.record(ErrorCategory::Region, fault.to_string(), "data load".into());
        }
        if !dataset.region_report().is_empty() {
            app.set_warning(format!(
                "{} Geo label(s) cannot be placed on the map (e for details)",
                dataset.region_report().len()
            ));
        }
        app
    }

    /// Ask the worker for the current selection with a full recompute.
    pub fn request_initial(&mut self) {
        let snapshot = self.controller.snapshot();
        self.request(snapshot);
    }

    fn request(&mut self, snapshot: SelectionSnapshot) {
        let generation = snapshot.generation;
        if self.worker_tx.send(WorkerCommand::Recompute(snapshot)).is_err() {
            self.push_error(
                ErrorCategory::Worker,
                "recompute worker is not running".into(),
                format!("generation {generation}"),
            );
            return;
        }
        self.pending = Some(generation);
    }

    /// Step the focused selector and queue a recompute when it changed.
    pub fn cycle_selection(&mut self, step: isize) {
        let snapshot = match self.focus {
            Focus::FundType => self.controller.cycle_fund_type(step),
            Focus::Country => self.controller.cycle_country(step),
        };
        if let Some(snapshot) = snapshot {
            self.request(snapshot);
        }
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Updated {
                update,
                coalesced,
                elapsed_ms,
            } => {
                let generation = update.generation;
                let country = update.selection.country.clone();
                log::debug!(
                    "tui: gen {generation} ready in {elapsed_ms} ms ({coalesced} coalesced)"
                );
                let alert_shown = matches!(
                    self.status_message,
                    Some((_, StatusLevel::Warning | StatusLevel::Error))
                );
                if self.apply_update(*update) && !alert_shown {
                    self.set_status(format!("{country} updated in {elapsed_ms} ms"));
                }
            }
        }
    }

    /// Publish a worker result. Returns false when it was entirely stale.
    pub fn apply_update(&mut self, update: DashboardUpdate) -> bool {
        let generation = update.generation;
        let chart_errors = update
            .charts
            .as_ref()
            .map(|charts| charts.errors())
            .unwrap_or_default();
        let context = format!(
            "{} / {}",
            update.selection.fund_type, update.selection.country
        );

        match self.view.apply(update) {
            ApplyOutcome::Stale => {
                log::debug!("tui: dropped stale gen {generation}");
                return false;
            }
            ApplyOutcome::ChartsOnly => {
                log::debug!("tui: late gen {generation} updated charts only");
            }
            ApplyOutcome::Accepted => {}
        }

        if self.pending.is_some_and(|p| p <= generation) {
            self.pending = None;
        }
        for (kind, message) in chart_errors {
            self.push_error(ErrorCategory::Chart, message, format!("{kind} chart, {context}"));
        }
        true
    }

    /// Push an error to the history and show it in the status bar.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        self.record(category, message.clone(), context);
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Push an error to the history, capping at 50.
    fn record(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message,
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use fundstats_core::{DerivativeRecord, GeoRecord, NavRecord, Tables};
    use fundstats_pipeline::Pipeline;
    use std::sync::mpsc;
    use std::sync::Arc;

    pub(crate) fn sample_dataset() -> Arc<Dataset> {
        let nav = |fund_type: &str, country: &str, nav: f64| NavRecord {
            fund_type: fund_type.into(),
            country: country.into(),
            nav,
            fund_count: 100,
            gross_leverage_incl: 2.0,
            gross_leverage_excl: 1.5,
            synthetic_leverage: 0.5,
        };
        Arc::new(Dataset::from_tables(Tables {
            nav: vec![
                nav("Hedge Funds", "Malta", 1.0),
                nav("Hedge Funds", "Cyprus", 3.0),
                nav("Open Ended Funds", "Malta", 2.0),
            ],
            derivatives: vec![
                DerivativeRecord {
                    country: "Malta".into(),
                    derivative: "FX Derivatives".into(),
                    gross_notional_exposure: 4.0,
                },
                DerivativeRecord {
                    country: "Cyprus".into(),
                    derivative: "IR Derivatives".into(),
                    gross_notional_exposure: f64::NAN,
                },
            ],
            geo: vec![GeoRecord {
                country: "Malta".into(),
                label: "Oceania".into(),
                investment_area: None,
                amount: 1.0,
            }],
            ..Tables::default()
        }))
    }

    /// App wired to channels the test drives by hand.
    pub(crate) fn test_app() -> (AppState, mpsc::Receiver<WorkerCommand>) {
        let ds = sample_dataset();
        let controller = SelectionController::new(&ds).unwrap();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(controller, &ds, cmd_tx, resp_rx), cmd_rx)
    }

    fn recompute(snapshot: &SelectionSnapshot) -> DashboardUpdate {
        Pipeline::new(sample_dataset(), false).recompute(snapshot)
    }

    fn sent_snapshot(rx: &mpsc::Receiver<WorkerCommand>) -> SelectionSnapshot {
        match rx.try_recv().unwrap() {
            WorkerCommand::Recompute(s) => s,
            other => panic!("expected recompute, got {other:?}"),
        }
    }

    #[test]
    fn focus_toggles() {
        assert_eq!(Focus::FundType.toggle(), Focus::Country);
        assert_eq!(Focus::Country.toggle(), Focus::FundType);
    }

    #[test]
    fn region_faults_land_in_history() {
        let (app, _rx) = test_app();
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Region);
        assert!(app.error_history[0].message.contains("Oceania"));
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _rx) = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Chart, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn cycling_requests_recompute() {
        let (mut app, rx) = test_app();
        app.request_initial();
        assert_eq!(sent_snapshot(&rx).generation, 0);

        app.cycle_selection(1);
        let snap = sent_snapshot(&rx);
        assert_eq!(snap.generation, 1);
        assert_eq!(snap.selection.country, "Cyprus");
        assert_eq!(app.pending, Some(1));
    }

    #[test]
    fn stale_update_does_not_replace_view() {
        let (mut app, rx) = test_app();
        app.cycle_selection(1);
        app.cycle_selection(1);
        let first = sent_snapshot(&rx);
        let second = sent_snapshot(&rx);

        app.apply_update(recompute(&second));
        app.apply_update(recompute(&first));
        assert_eq!(app.view.generation(), Some(2));
        assert_eq!(app.view.selection().unwrap().country, "Malta");
        assert_eq!(app.pending, None);
    }

    #[test]
    fn chart_failure_is_recorded() {
        let (mut app, rx) = test_app();
        app.cycle_selection(1);
        let snap = sent_snapshot(&rx);
        app.apply_update(recompute(&snap));

        assert_eq!(app.error_history[0].category, ErrorCategory::Chart);
        assert!(app.error_history[0].context.starts_with("Derivatives chart"));
        assert!(app.view.metrics().is_some());
    }

    #[test]
    fn dead_worker_is_reported() {
        let ds = sample_dataset();
        let controller = SelectionController::new(&ds).unwrap();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        drop(cmd_rx);
        let mut app = AppState::new(controller, &ds, cmd_tx, resp_rx);
        app.request_initial();
        assert_eq!(app.error_history[0].category, ErrorCategory::Worker);
        assert_eq!(app.pending, None);
    }

    #[test]
    fn finished_update_shows_status_unless_an_alert_is_up() {
        let (mut app, rx) = test_app();
        app.request_initial();
        let snap = sent_snapshot(&rx);
        let respond = |snap: &SelectionSnapshot| WorkerResponse::Updated {
            update: Box::new(recompute(snap)),
            coalesced: 0,
            elapsed_ms: 7,
        };

        // The load-time region warning stays visible.
        app.handle_worker_response(respond(&snap));
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));

        app.status_message = None;
        app.handle_worker_response(respond(&snap));
        assert_eq!(
            app.status_message,
            Some(("Malta updated in 7 ms".to_string(), StatusLevel::Info))
        );
    }
}
