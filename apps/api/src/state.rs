use std::sync::Arc;

use crate::applications::service::SubmissionService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds nothing mutable: each submission is independent.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub applications: Arc<SubmissionService>,
}
