//! Lazily fetched details for the expanded result row

use super::types::ItemDetail;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(ItemDetail),
    /// The lookup failed; the row renders without details
    Failed,
}

/// A mounted detail view. Every expansion creates a new panel with a fresh
/// `mount` number, so a lookup that finishes after its row was collapsed (or
/// collapsed and expanded again) can be recognised and dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailPanel {
    pub id: String,
    pub mount: u64,
    pub state: DetailState,
}

impl DetailPanel {
    pub fn mount(id: &str, mount: u64) -> Self {
        Self {
            id: id.to_string(),
            mount,
            state: DetailState::Loading,
        }
    }

    pub fn detail(&self) -> Option<&ItemDetail> {
        match &self.state {
            DetailState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }
}
