//! Session identity

use serde::Deserialize;
use serde::Serialize;

/// The logged-in user for the lifetime of one session.
///
/// Serializes to the same camelCase shape the service's `create-user`
/// endpoint and the persisted `userData` blob use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Roll number the form schema is keyed by.
    pub roll_number: String,
    /// Display name.
    pub name: String,
}

impl Identity {
    /// Creates a new identity.
    pub fn new(roll_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            roll_number: roll_number.into(),
            name: name.into(),
        }
    }
}

/// Where the current session identity lives.
///
/// The form view requires an identity; its absence sends the user back
/// to the login view. The store is injected into whatever drives the
/// session rather than read as ambient global state, and implementations
/// are session-scoped: nothing persists across program runs.
pub trait IdentityStore {
    /// The stored identity, if a user is logged in.
    fn get(&self) -> Option<Identity>;

    /// Replaces the stored identity.
    fn set(&mut self, identity: Identity);

    /// Logs the user out.
    fn clear(&mut self);
}

/// In-memory store, the default for a single terminal session.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    current: Option<Identity>,
}

impl MemoryIdentityStore {
    /// Creates an empty store (nobody logged in).
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn get(&self) -> Option<Identity> {
        self.current.clone()
    }

    fn set(&mut self, identity: Identity) {
        self.current = Some(identity);
    }

    fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_lifecycle() {
        let mut store = MemoryIdentityStore::new();
        assert!(store.get().is_none());

        store.set(Identity::new("RA2211003010000", "Alice"));
        assert_eq!(store.get().unwrap().name, "Alice");

        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_wire_shape() {
        let identity = Identity::new("R1", "Alice");
        let json = serde_json::to_string(&identity).unwrap();
        assert_eq!(json, r#"{"rollNumber":"R1","name":"Alice"}"#);

        let parsed: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, identity);
    }
}
