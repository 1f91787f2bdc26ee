//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the OMDb requests.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `search`: Debounced query commits and paginated search requests
//! - `details`: Row expansion and detail lookups

mod input;
mod search;
mod details;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }
}
