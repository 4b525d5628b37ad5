pub mod config;
pub mod prelude;
pub mod state;
pub mod ui;

pub use config::Config;
pub use state::{SessionState, SyncController, SyncError, SyncEvent, SyncPhase, TerminationReason};

pub use ui::widgets;
