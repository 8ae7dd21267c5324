//! Builder Session Management
//!
//! A session is one user's editing context: the canvas, the buffered
//! property editor, the in-progress resize drag (if any), and the AI
//! export preference. The manager tracks active sessions with idle
//! expiry and a capacity cap.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::canvas::Canvas;
use crate::properties::PropertyEditor;
use crate::resize::ResizeSession;

/// One active editing context.
#[derive(Debug, Clone)]
pub struct BuilderSession {
    /// Unique session identifier
    pub id: Uuid,

    /// The canvas being edited
    pub canvas: Canvas,

    /// Buffered editor for the selected element
    pub editor: PropertyEditor,

    /// In-progress resize drag, if any
    pub resize: Option<ResizeSession>,

    /// Whether exports should try the generative backend first. Flipped
    /// off when the backend reports a quota/rate-limit failure.
    pub ai_enabled: bool,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session was last accessed
    pub last_accessed_at: DateTime<Utc>,
}

impl BuilderSession {
    /// Create a new session with an empty canvas
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            canvas: Canvas::new(),
            editor: PropertyEditor::new(),
            resize: None,
            ai_enabled: true,
            created_at: now,
            last_accessed_at: now,
        }
    }

    /// Create a session with a specific ID
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Select an element and reset the editor buffer from it; None clears
    /// both the selection and the buffer.
    pub fn select_element(&mut self, id: Option<Uuid>) -> bool {
        match id {
            Some(id) => {
                if !self.canvas.select(id) {
                    return false;
                }
                if let Some(element) = self.canvas.get(id) {
                    self.editor.select(element);
                }
                true
            }
            None => {
                self.canvas.deselect();
                self.editor.deselect();
                true
            }
        }
    }

    /// Update last accessed timestamp
    pub fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }

    /// Check if session is expired (not accessed for given duration)
    #[must_use]
    pub fn is_expired(&self, max_idle_secs: i64) -> bool {
        let idle = Utc::now() - self.last_accessed_at;
        idle.num_seconds() > max_idle_secs
    }
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Session manager for concurrent builder sessions.
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<Uuid, BuilderSession>>>,
    max_idle_secs: i64,
    max_sessions: usize,
}

impl SessionManager {
    /// Create a new session manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_idle_secs: 3600,
            max_sessions: 100,
        }
    }

    /// Configure maximum idle time
    #[must_use]
    pub fn with_max_idle_secs(mut self, secs: i64) -> Self {
        self.max_idle_secs = secs;
        self
    }

    /// Configure the session capacity cap
    #[must_use]
    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = max;
        self
    }

    /// Create a new session. At capacity, the least recently accessed
    /// session is evicted first.
    pub async fn create_session(&self) -> BuilderSession {
        let session = BuilderSession::new();
        let mut sessions = self.sessions.write().await;

        if sessions.len() >= self.max_sessions {
            if let Some(oldest) = sessions
                .values()
                .min_by_key(|s| s.last_accessed_at)
                .map(|s| s.id)
            {
                debug!(session_id = %oldest, "evicting least recently used session");
                sessions.remove(&oldest);
            }
        }

        sessions.insert(session.id, session.clone());
        session
    }

    /// Get the session with the given ID, creating an empty one under
    /// that ID when it does not exist yet.
    pub async fn ensure_session(&self, session_id: Uuid) -> BuilderSession {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(&session_id) {
                return session.clone();
            }
        }
        let session = BuilderSession::new().with_id(session_id);
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id)
            .or_insert_with(|| session.clone())
            .clone()
    }

    /// Get a session snapshot by ID
    pub async fn get_session(&self, session_id: Uuid) -> Option<BuilderSession> {
        let sessions = self.sessions.read().await;
        sessions.get(&session_id).cloned()
    }

    /// Run a closure against a session, touching its access time.
    /// Returns None when the session does not exist.
    pub async fn update_session<F, R>(&self, session_id: Uuid, f: F) -> Option<R>
    where
        F: FnOnce(&mut BuilderSession) -> R,
    {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session_id) {
            Some(session) => {
                session.touch();
                Some(f(session))
            }
            None => None,
        }
    }

    /// Remove a session
    pub async fn remove_session(&self, session_id: Uuid) -> Option<BuilderSession> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&session_id)
    }

    /// Clean up expired sessions, returning how many were removed
    pub async fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let max_idle = self.max_idle_secs;
        sessions.retain(|_, s| !s.is_expired(max_idle));
        before - sessions.len()
    }

    /// Number of active sessions
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::element::{ElementKind, Position};

    #[test]
    fn test_session_starts_empty() {
        let session = BuilderSession::new();
        assert!(session.canvas.is_empty());
        assert!(session.ai_enabled);
        assert!(session.resize.is_none());
    }

    #[test]
    fn test_select_element_resets_editor() {
        let mut session = BuilderSession::new();
        let entry = catalog::entry(ElementKind::Button).unwrap();
        let id = session.canvas.add_element(entry, Position::new(0, 0));

        assert!(session.select_element(Some(id)));
        assert_eq!(session.editor.element_id(), Some(id));

        assert!(session.select_element(None));
        assert!(session.editor.element_id().is_none());
        assert!(session.canvas.selected().is_none());
    }

    #[test]
    fn test_select_missing_element_fails() {
        let mut session = BuilderSession::new();
        assert!(!session.select_element(Some(Uuid::new_v4())));
    }

    #[test]
    fn test_session_expiry() {
        let mut session = BuilderSession::new();
        assert!(!session.is_expired(3600));

        session.last_accessed_at = Utc::now() - chrono::Duration::seconds(7200);
        assert!(session.is_expired(3600));
    }

    #[tokio::test]
    async fn test_manager_create_and_get() {
        let manager = SessionManager::new();
        let session = manager.create_session().await;

        assert_eq!(manager.session_count().await, 1);
        let retrieved = manager.get_session(session.id).await;
        assert_eq!(retrieved.map(|s| s.id), Some(session.id));
    }

    #[tokio::test]
    async fn test_manager_update_touches() {
        let manager = SessionManager::new();
        let session = manager.create_session().await;
        let before = session.last_accessed_at;

        manager
            .update_session(session.id, |s| {
                let entry = catalog::entry(ElementKind::Card).unwrap();
                s.canvas.add_element(entry, Position::new(0, 0));
            })
            .await;

        let after = manager.get_session(session.id).await.unwrap();
        assert_eq!(after.canvas.len(), 1);
        assert!(after.last_accessed_at >= before);
    }

    #[tokio::test]
    async fn test_manager_ensure_session() {
        let manager = SessionManager::new();
        let id = Uuid::new_v4();

        let created = manager.ensure_session(id).await;
        assert_eq!(created.id, id);
        assert_eq!(manager.session_count().await, 1);

        // second call returns the same session, not a fresh one
        manager
            .update_session(id, |s| {
                let entry = catalog::entry(ElementKind::Span).unwrap();
                s.canvas.add_element(entry, Position::new(0, 0));
            })
            .await;
        let again = manager.ensure_session(id).await;
        assert_eq!(again.canvas.len(), 1);
    }

    #[tokio::test]
    async fn test_manager_update_missing_session() {
        let manager = SessionManager::new();
        let result = manager.update_session(Uuid::new_v4(), |_| ()).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_manager_evicts_at_capacity() {
        let manager = SessionManager::new().with_max_sessions(2);
        let first = manager.create_session().await;
        // make the first session clearly the oldest
        manager
            .update_session(first.id, |s| {
                s.last_accessed_at = Utc::now() - chrono::Duration::seconds(60);
            })
            .await;
        manager.create_session().await;
        manager.create_session().await;

        assert_eq!(manager.session_count().await, 2);
        assert!(manager.get_session(first.id).await.is_none());
    }

    #[tokio::test]
    async fn test_manager_cleanup_expired() {
        let manager = SessionManager::new().with_max_idle_secs(3600);
        let session = manager.create_session().await;
        manager
            .update_session(session.id, |s| {
                s.last_accessed_at = Utc::now() - chrono::Duration::seconds(7200);
            })
            .await;

        assert_eq!(manager.cleanup_expired().await, 1);
        assert_eq!(manager.session_count().await, 0);
    }
}
