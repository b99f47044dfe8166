//! Shared test helpers for API client tests.

#![allow(dead_code)]

use notaxia_api::{AdminApi, ApiConfig, AuthApi, RecordingNavigator, ResourceClient};
use notaxia_session::{MemorySessionStore, SessionStore, SessionToken};
use std::sync::Arc;
use wiremock::MockServer;

/// A client wired to a mock server, with handles on its store and navigator.
pub struct Harness {
    pub client: ResourceClient,
    pub store: Arc<MemorySessionStore>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn admin(&self) -> AdminApi {
        AdminApi::new(self.client.clone())
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.client.clone())
    }

    pub fn stored_token(&self) -> Option<String> {
        self.store.get().unwrap().map(SessionToken::into_inner)
    }
}

/// Builds a signed-out harness against `server`.
pub fn harness(server: &MockServer) -> Harness {
    build(server, MemorySessionStore::new())
}

/// Builds a harness already holding `token`.
pub fn harness_with_token(server: &MockServer, token: &str) -> Harness {
    build(
        server,
        MemorySessionStore::with_token(SessionToken::new(token).unwrap()),
    )
}

fn build(server: &MockServer, store: MemorySessionStore) -> Harness {
    let store = Arc::new(store);
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ResourceClient::new(
        ApiConfig::new(server.uri()),
        store.clone(),
        navigator.clone(),
    )
    .unwrap();
    Harness {
        client,
        store,
        navigator,
    }
}
