use std::sync::Arc;

use crate::pipeline::Advisor;

/// Shared by every handler; cloning is a refcount bump.
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<Advisor>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(advisor: Advisor, max_upload_bytes: usize) -> Self {
        Self {
            advisor: Arc::new(advisor),
            max_upload_bytes,
        }
    }
}
