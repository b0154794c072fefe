//! State
//!
//! Shared across handlers through the depot.

use std::{sync::Arc, time::Instant};

use emporium_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// When the process started serving.
    pub(crate) started_at: Instant,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self {
            app,
            started_at: Instant::now(),
        })
    }
}
