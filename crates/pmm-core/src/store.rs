use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::{GatewayError, Result};
use crate::types::Message;

/// A single conversation session.
///
/// `turns[0]` is always the seeded system prompt; later turns alternate
/// user and assistant messages appended by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub turns: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a session seeded with the given system prompt.
    pub fn new(id: impl Into<String>, system_prompt: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            turns: vec![Message::system(system_prompt)],
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a message and update the timestamp.
    pub fn push_message(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.turns.push(message);
    }
}

/// Storage abstraction for conversation sessions.
///
/// The orchestrator only talks to this trait; [`InMemoryStore`] is the
/// default implementation.
pub trait SessionStore: Send + Sync {
    /// Fetch the session with the given id, creating it first if it does
    /// not exist. With no id, a fresh session under a generated id is
    /// created. Returns a snapshot.
    fn get_or_create(&self, id: Option<&str>) -> Result<Session>;

    /// Append a message to an existing session.
    fn append(&self, session_id: &str, message: Message) -> Result<()>;

    /// Full transcript of an existing session.
    fn transcript(&self, session_id: &str) -> Result<Vec<Message>>;

    /// Remove a session. Returns whether it existed.
    fn delete(&self, session_id: &str) -> Result<bool>;

    /// Number of live sessions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory session store. Sessions live for the lifetime of the process.
pub struct InMemoryStore {
    sessions: RwLock<HashMap<String, Session>>,
    system_prompt: String,
}

impl InMemoryStore {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            system_prompt: system_prompt.into(),
        }
    }
}

impl SessionStore for InMemoryStore {
    fn get_or_create(&self, id: Option<&str>) -> Result<Session> {
        // Callers may supply their own ids; unknown ones are adopted as-is.
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| GatewayError::Store(format!("session lock poisoned: {e}")))?;
        let session = sessions
            .entry(id)
            .or_insert_with_key(|key| Session::new(key.clone(), &self.system_prompt));
        Ok(session.clone())
    }

    fn append(&self, session_id: &str, message: Message) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| GatewayError::Store(format!("session lock poisoned: {e}")))?;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| GatewayError::SessionNotFound(session_id.to_string()))?;
        session.push_message(message);
        Ok(())
    }

    fn transcript(&self, session_id: &str) -> Result<Vec<Message>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| GatewayError::Store(format!("session lock poisoned: {e}")))?;
        sessions
            .get(session_id)
            .map(|s| s.turns.clone())
            .ok_or_else(|| GatewayError::SessionNotFound(session_id.to_string()))
    }

    fn delete(&self, session_id: &str) -> Result<bool> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| GatewayError::Store(format!("session lock poisoned: {e}")))?;
        Ok(sessions.remove(session_id).is_some())
    }

    fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use std::sync::Arc;

    #[test]
    fn test_fresh_session_is_seeded_with_system_prompt() {
        let store = InMemoryStore::new("be helpful");
        let session = store.get_or_create(None).unwrap();
        assert_eq!(session.turns.len(), 1);
        assert_eq!(session.turns[0].role, Role::System);
        assert_eq!(session.turns[0].content, "be helpful");
    }

    #[test]
    fn test_get_or_create_without_id_creates_distinct_sessions() {
        let store = InMemoryStore::new("sys");
        let a = store.get_or_create(None).unwrap();
        let b = store.get_or_create(None).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let store = InMemoryStore::new("sys");
        let first = store.get_or_create(Some("abc")).unwrap();
        store.append("abc", Message::user("hi")).unwrap();
        let second = store.get_or_create(Some("abc")).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.turns.len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_caller_supplied_id_is_adopted() {
        let store = InMemoryStore::new("sys");
        let session = store.get_or_create(Some("ext-1")).unwrap();
        assert_eq!(session.id, "ext-1");
    }

    #[test]
    fn test_append_to_missing_session_fails() {
        let store = InMemoryStore::new("sys");
        let err = store.append("nope", Message::user("hi")).unwrap_err();
        assert!(matches!(err, GatewayError::SessionNotFound(_)));
    }

    #[test]
    fn test_system_turn_survives_appends() {
        let store = InMemoryStore::new("sys");
        let session = store.get_or_create(Some("s1")).unwrap();
        store.append(&session.id, Message::user("question")).unwrap();
        store.append(&session.id, Message::assistant("answer")).unwrap();
        let transcript = store.transcript(&session.id).unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].role, Role::System);
        assert_eq!(transcript[0].content, "sys");
    }

    #[test]
    fn test_delete_then_recreate_starts_fresh() {
        let store = InMemoryStore::new("sys");
        let session = store.get_or_create(Some("s1")).unwrap();
        store.append(&session.id, Message::user("hi")).unwrap();

        assert!(store.delete("s1").unwrap());
        assert!(!store.delete("s1").unwrap());

        let recreated = store.get_or_create(Some("s1")).unwrap();
        assert_eq!(recreated.turns.len(), 1);
        assert_eq!(recreated.turns[0].role, Role::System);
    }

    #[test]
    fn test_concurrent_get_or_create_is_atomic_per_id() {
        let store = Arc::new(InMemoryStore::new("sys"));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store.get_or_create(Some("shared")).unwrap()
            }));
        }
        for handle in handles {
            let session = handle.join().unwrap();
            assert_eq!(session.id, "shared");
            assert_eq!(session.turns.len(), 1);
        }
        assert_eq!(store.len(), 1);
    }
}
