//! In-memory conversation sessions
//!
//! A session belongs to one `(app_name, user_id)` pair and records every
//! event produced by runs against it.

use agent_core::AgentEvent;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Session lookup failures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// No session with this id for the given app and user
    #[error("Session not found: {0}")]
    NotFound(String),

    /// A session with this id already exists
    #[error("Session already exists: {0}")]
    AlreadyExists(String),
}

impl From<SessionError> for agent_core::Error {
    fn from(err: SessionError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}

/// A conversation session
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Session id
    pub id: String,
    /// Owning application
    pub app_name: String,
    /// Owning user
    pub user_id: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Events recorded so far, oldest first
    pub events: Vec<AgentEvent>,
}

/// Session store kept in process memory
#[derive(Default)]
pub struct InMemorySessionService {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionService {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a generated id
    pub fn create_session(&self, app_name: &str, user_id: &str) -> Session {
        let id = Uuid::new_v4().to_string();
        let session = Session {
            id: id.clone(),
            app_name: app_name.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            events: Vec::new(),
        };
        self.write().insert(id, session.clone());
        debug!(app_name, user_id, session_id = %session.id, "Session created");
        session
    }

    /// Create a session with a caller-chosen id
    pub fn create_session_with_id(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Session, SessionError> {
        let mut sessions = self.write();
        if sessions.contains_key(session_id) {
            return Err(SessionError::AlreadyExists(session_id.to_string()));
        }
        let session = Session {
            id: session_id.to_string(),
            app_name: app_name.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            events: Vec::new(),
        };
        sessions.insert(session_id.to_string(), session.clone());
        Ok(session)
    }

    /// Look up a session owned by `app_name`/`user_id`
    pub fn get_session(&self, app_name: &str, user_id: &str, session_id: &str) -> Option<Session> {
        self.read()
            .get(session_id)
            .filter(|s| s.app_name == app_name && s.user_id == user_id)
            .cloned()
    }

    /// Sessions owned by `app_name`/`user_id`, oldest first
    pub fn list_sessions(&self, app_name: &str, user_id: &str) -> Vec<Session> {
        let mut list: Vec<Session> = self
            .read()
            .values()
            .filter(|s| s.app_name == app_name && s.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by_key(|s| s.created_at);
        list
    }

    /// Remove a session; returns whether it existed
    pub fn delete_session(&self, app_name: &str, user_id: &str, session_id: &str) -> bool {
        let mut sessions = self.write();
        let owned = sessions
            .get(session_id)
            .is_some_and(|s| s.app_name == app_name && s.user_id == user_id);
        if owned {
            sessions.remove(session_id);
        }
        owned
    }

    /// Record an event on a session
    pub fn append_event(&self, session_id: &str, event: AgentEvent) -> Result<(), SessionError> {
        let mut sessions = self.write();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
        session.events.push(event);
        Ok(())
    }

    /// Events recorded on a session
    pub fn events(&self, session_id: &str) -> Result<Vec<AgentEvent>, SessionError> {
        self.read()
            .get(session_id)
            .map(|s| s.events.clone())
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Session>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}
