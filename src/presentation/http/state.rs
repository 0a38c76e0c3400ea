// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

/// Shared by every handler through an `Extension` layer.
#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
}

impl HttpState {
    pub fn new(services: Arc<ApplicationServices>) -> Self {
        Self { services }
    }
}
