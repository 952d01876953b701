use std::sync::Arc;

use http::header::InvalidHeaderValue;
use hydrus_auth::AuthGate;

use super::shaper::ResponseShaper;
use crate::doc::ApiDocument;
use crate::domain::storage::StorageProvider;

/// Shared by every request of one API surface.
#[derive(Clone)]
pub struct AppState {
    pub doc: Arc<ApiDocument>,
    pub storage: Arc<dyn StorageProvider>,
    pub gate: Arc<AuthGate>,
    pub shaper: ResponseShaper,
}

impl AppState {
    /// # Errors
    /// Fails when the document's vocabulary URL cannot be sent as a header.
    pub fn new(
        doc: Arc<ApiDocument>,
        storage: Arc<dyn StorageProvider>,
        gate: AuthGate,
    ) -> Result<Self, InvalidHeaderValue> {
        let shaper = ResponseShaper::new(&doc)?;
        Ok(Self {
            doc,
            storage,
            gate: Arc::new(gate),
            shaper,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("api_name", &self.doc.api_name())
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
