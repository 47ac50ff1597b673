use std::sync::Arc;

use dialog_core::application::DialogService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: DialogService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DialogService) -> Self {
        Self { args, service }
    }
}
