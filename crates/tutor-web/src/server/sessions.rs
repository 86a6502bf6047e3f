//! Session store: maps session cookies to per-browser chat state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use tokio::sync::{Mutex, RwLock};
use tutor_ai::{Conversation, LearningLevel, TokenTracker};
use tutor_common::SessionId;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "tutor_session";

/// Everything one browser keeps between interactions.
pub struct BrowserSession {
    pub conversation: Conversation,
    pub level: LearningLevel,
    pub dark_mode: bool,
    pub tracker: TokenTracker,
    last_active: Instant,
}

impl BrowserSession {
    pub fn new(level: LearningLevel, dark_mode: bool) -> Self {
        Self {
            conversation: Conversation::new(),
            level,
            dark_mode,
            tracker: TokenTracker::new(),
            last_active: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    /// Clear the conversation and its usage counters; display preferences stay.
    pub fn reset(&mut self) {
        self.conversation.clear();
        self.tracker.reset();
    }
}

/// Preferences applied to newly created sessions.
#[derive(Debug, Clone, Copy)]
pub struct SessionDefaults {
    pub level: LearningLevel,
    pub dark_mode: bool,
}

/// Each session sits behind its own mutex so one browser's turns run one
/// at a time while other browsers proceed.
pub type SharedSession = Arc<Mutex<BrowserSession>>;

/// Thread-safe session store.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SharedSession>>>,
    defaults: SessionDefaults,
}

impl SessionStore {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            defaults,
        }
    }

    /// Look up the session for a known id, or create a fresh one.
    ///
    /// Unknown ids are never adopted; the caller gets a new id and must set
    /// the cookie when the returned flag is `true`.
    pub async fn resolve(&self, id: Option<SessionId>) -> (SessionId, SharedSession, bool) {
        if let Some(id) = id {
            if let Some(session) = self.sessions.read().await.get(&id) {
                return (id, session.clone(), false);
            }
        }

        let id = SessionId::new();
        let session = Arc::new(Mutex::new(BrowserSession::new(
            self.defaults.level,
            self.defaults.dark_mode,
        )));
        self.sessions.write().await.insert(id.clone(), session.clone());
        tracing::debug!(session_id = %id, "Created browser session");
        (id, session, true)
    }

    /// Drop sessions idle for at least `max_idle`. Sessions in the middle of
    /// a request are locked and always kept.
    pub async fn reap_idle(&self, max_idle: Duration) -> usize {
        let mut map = self.sessions.write().await;
        let before = map.len();
        map.retain(|id, session| {
            let idle = match session.try_lock() {
                Ok(guard) => guard.last_active.elapsed() >= max_idle,
                Err(_) => false,
            };
            if idle {
                tracing::info!(session_id = %id, "Reaping idle session");
            }
            !idle
        });
        before - map.len()
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Extract the session id from the request's `Cookie` headers.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}

/// `Set-Cookie` value for a session id.
pub fn session_cookie(id: &SessionId) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn store() -> SessionStore {
        SessionStore::new(SessionDefaults {
            level: LearningLevel::Intermediate,
            dark_mode: true,
        })
    }

    #[tokio::test]
    async fn resolve_creates_session_with_defaults() {
        let store = store();
        let (_, session, created) = store.resolve(None).await;
        assert!(created);

        let session = session.lock().await;
        assert_eq!(session.level, LearningLevel::Intermediate);
        assert!(session.dark_mode);
        assert!(session.conversation.is_empty());
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn resolve_returns_existing_session() {
        let store = store();
        let (id, first, _) = store.resolve(None).await;
        first.lock().await.conversation.append_user("hello");

        let (same_id, second, created) = store.resolve(Some(id.clone())).await;
        assert!(!created);
        assert_eq!(same_id, id);
        assert_eq!(second.lock().await.conversation.len(), 1);
    }

    #[tokio::test]
    async fn resolve_does_not_adopt_unknown_ids() {
        let store = store();
        let foreign = SessionId::new();
        let (id, _, created) = store.resolve(Some(foreign.clone())).await;
        assert!(created);
        assert_ne!(id, foreign);
    }

    #[tokio::test]
    async fn reap_drops_idle_sessions() {
        let store = store();
        store.resolve(None).await;
        store.resolve(None).await;

        assert_eq!(store.reap_idle(Duration::from_secs(3600)).await, 0);
        assert_eq!(store.reap_idle(Duration::ZERO).await, 2);
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn reap_keeps_busy_sessions() {
        let store = store();
        let (_, session, _) = store.resolve(None).await;
        let _guard = session.lock().await;

        assert_eq!(store.reap_idle(Duration::ZERO).await, 0);
        assert_eq!(store.count().await, 1);
    }

    #[test]
    fn reset_keeps_preferences() {
        let mut session = BrowserSession::new(LearningLevel::Advanced, true);
        session.conversation.append_user("q");
        session.tracker.record(&tutor_ai::TokenUsage {
            input_tokens: 3,
            output_tokens: 4,
        });

        session.reset();
        assert!(session.conversation.is_empty());
        assert_eq!(session.tracker.call_count(), 0);
        assert_eq!(session.level, LearningLevel::Advanced);
        assert!(session.dark_mode);
    }

    #[test]
    fn cookie_parsing_finds_session_among_others() {
        let id = SessionId::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}; other=1")).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn cookie_parsing_ignores_malformed_ids() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("tutor_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers), None);
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn set_cookie_value_is_http_only() {
        let id = SessionId::new();
        let cookie = session_cookie(&id);
        assert!(cookie.starts_with(&format!("{SESSION_COOKIE}={id};")));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
    }
}
