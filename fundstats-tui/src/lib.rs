//! FundStats terminal dashboard.
//!
//! - Header with the fund-type and country selectors
//! - Metrics column for the selection
//! - Derivatives, Geo, Assets and Strategy chart panes
//! - Status bar, error history and help overlays
//!
//! Recomputation runs on a background worker; the render loop only drains
//! its responses into the published view.

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use worker::{spawn_worker, WorkerCommand, WorkerResponse};
