//! spamscore Server
//!
//! HTTP front end for the spam classifier. The model is loaded once at
//! startup and injected into the router state; `POST /score` turns
//! `{"text", "threshold"}` into `{"prediction", "propensity"}`.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use cli::{Cli, Commands, ModelArgs, ScoreArgs, ServeArgs};
pub use config::{ConfigOverrides, MetricsConfig, ServerConfig};
pub use routes::{create_router, AppError};
pub use state::AppState;
