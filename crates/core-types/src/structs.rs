use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The caller identity resolved by an upstream authentication layer.
///
/// Threaded by value through the service for auditing and attribution
/// only. It is never required for correctness and nothing in the core
/// verifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
}

impl Identity {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
