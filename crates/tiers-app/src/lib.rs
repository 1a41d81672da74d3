// Application layer: state owned by the primary task, background services

pub mod error;
pub mod service;
pub mod state;

pub use error::AppError;
pub use service::{LookupEvent, LookupService, RefreshEvent, RefreshService};
pub use state::{AppState, RankReport, Snapshot};
