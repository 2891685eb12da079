//! Map overlay load state.
//!
//! Layers are reloaded every time the map is shown, unless a load is already
//! running.

use crate::api::ApiRequest;
use crate::domain::LayerSet;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LayerStatus {
    #[default]
    Idle,
    Loading,
    Loaded(LayerSet),
}

#[derive(Debug, Clone, Default)]
pub struct MapState {
    pub status: LayerStatus,
}

impl MapState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading every layer. Returns `None` while a load is in flight.
    pub fn load(&mut self) -> Option<ApiRequest> {
        if self.status == LayerStatus::Loading {
            return None;
        }
        self.status = LayerStatus::Loading;
        Some(ApiRequest::load_layers())
    }

    pub fn apply(&mut self, layers: LayerSet) {
        tracing::debug!(
            layers = layers.layers.len(),
            errors = layers.errors.len(),
            "map layers ready"
        );
        self.status = LayerStatus::Loaded(layers);
    }
}
