pub mod app;
pub mod config;
pub mod errors;
pub mod garden;
pub mod handlers;
pub mod models;
pub mod share;
pub mod source;
pub mod state;
pub mod theme;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Config;
pub use garden::{derive_summary, derive_summary_at};
pub use source::{ContributionSource, HttpSource, LookupError};
pub use state::AppState;
