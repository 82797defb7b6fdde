//! Session storage and management.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use tracing::debug;

use super::{Flash, SessionToken};
use crate::error::TodoError;
use crate::todo::ListManager;
use crate::Result;

/// Per-browser state: the user's lists and pending flash messages.
#[derive(Debug, Clone)]
pub struct Session {
    /// Token carried in the session cookie.
    pub token: SessionToken,
    /// All lists owned by this session.
    pub lists: ListManager,
    /// Messages for the next rendered page.
    pub flash: Flash,
    /// Time of last activity.
    pub last_activity: Instant,
}

impl Session {
    /// Create an empty session.
    pub fn new(token: SessionToken) -> Self {
        Self {
            token,
            lists: ListManager::new(),
            flash: Flash::default(),
            last_activity: Instant::now(),
        }
    }

    /// Update the last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Get the idle duration since last activity.
    pub fn idle_duration(&self) -> Duration {
        self.last_activity.elapsed()
    }
}

/// Idle time after which a session is evicted.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Thread-safe storage for sessions.
///
/// Each request works on one session under the store-wide write lock, so a
/// single mutation is atomic. This also serializes requests of unrelated
/// sessions; at one small list collection per user the lock is held for
/// microseconds, so per-session locking is not used.
///
/// Sessions idle for longer than the idle timeout are swept out the next
/// time a session is created, at most once per timeout period.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionToken, Session>>,
    idle_timeout: Duration,
    last_cleanup: RwLock<Instant>,
}

impl SessionStore {
    /// Create a new empty session store with the default idle timeout.
    pub fn new() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }

    /// Create a new empty session store evicting sessions idle for `idle_timeout`.
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
            last_cleanup: RwLock::new(Instant::now()),
        }
    }

    /// Create a new empty session.
    ///
    /// Returns the newly assigned token.
    pub fn create(&self) -> Result<SessionToken> {
        self.maybe_cleanup()?;

        let token = SessionToken::new();

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| TodoError::LockPoisoned)?;

        sessions.insert(token, Session::new(token));
        Ok(token)
    }

    /// Check if a session exists.
    pub fn contains(&self, token: &SessionToken) -> Result<bool> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| TodoError::LockPoisoned)?;
        Ok(sessions.contains_key(token))
    }

    /// Update a session using a closure and return the closure's result.
    ///
    /// The session is touched before the closure runs. Returns an error if
    /// the session doesn't exist.
    pub fn update<F, R>(&self, token: &SessionToken, f: F) -> Result<R>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| TodoError::LockPoisoned)?;

        let session = sessions
            .get_mut(token)
            .ok_or_else(|| TodoError::SessionNotFound(token.to_string()))?;

        session.touch();
        Ok(f(session))
    }

    /// Get the number of sessions in the store.
    pub fn count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Drop sessions idle for longer than `max_idle`.
    ///
    /// Returns the number of sessions removed.
    pub fn remove_idle(&self, max_idle: Duration) -> Result<usize> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| TodoError::LockPoisoned)?;

        let before = sessions.len();
        sessions.retain(|_, session| session.idle_duration() <= max_idle);
        Ok(before - sessions.len())
    }

    /// Evict idle sessions if a full timeout period passed since the last sweep.
    fn maybe_cleanup(&self) -> Result<()> {
        let should_cleanup = self
            .last_cleanup
            .read()
            .map_err(|_| TodoError::LockPoisoned)?
            .elapsed()
            > self.idle_timeout;

        if !should_cleanup {
            return Ok(());
        }

        let mut last = self
            .last_cleanup
            .write()
            .map_err(|_| TodoError::LockPoisoned)?;

        // Double-check after acquiring lock
        if last.elapsed() <= self.idle_timeout {
            return Ok(());
        }
        *last = Instant::now();

        let removed = self.remove_idle(self.idle_timeout)?;
        if removed > 0 {
            debug!(removed, remaining = self.count(), "idle sessions evicted");
        }
        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(store: &SessionStore, token: &SessionToken) -> Session {
        store.update(token, |s| s.clone()).unwrap()
    }

    #[test]
    fn test_create_session() {
        let store = SessionStore::new();
        let token = store.create().unwrap();

        assert!(store.contains(&token).unwrap());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_new_session_is_empty() {
        let store = SessionStore::new();
        let token = store.create().unwrap();

        let session = snapshot(&store, &token);
        assert_eq!(session.token, token);
        assert!(session.lists.is_empty());
        assert_eq!(session.flash, Flash::default());
    }

    #[test]
    fn test_contains_nonexistent() {
        let store = SessionStore::new();
        assert!(!store.contains(&SessionToken::new()).unwrap());
    }

    #[test]
    fn test_update_session() {
        let store = SessionStore::new();
        let token = store.create().unwrap();

        let id = store
            .update(&token, |s| s.lists.create_list("Groceries"))
            .unwrap()
            .unwrap();

        let session = snapshot(&store, &token);
        assert_eq!(session.lists.get_list(id).unwrap().name(), "Groceries");
    }

    #[test]
    fn test_update_nonexistent() {
        let store = SessionStore::new();
        let result = store.update(&SessionToken::new(), |_| ());
        assert!(matches!(result, Err(TodoError::SessionNotFound(_))));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.create().unwrap();
        let b = store.create().unwrap();

        store
            .update(&a, |s| s.lists.create_list("Mine"))
            .unwrap()
            .unwrap();

        assert!(snapshot(&store, &b).lists.is_empty());
    }

    #[test]
    fn test_remove_idle() {
        let store = SessionStore::new();
        store.create().unwrap();
        store.create().unwrap();

        assert_eq!(store.remove_idle(Duration::from_secs(3600)).unwrap(), 0);
        assert_eq!(store.count(), 2);

        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.remove_idle(Duration::ZERO).unwrap(), 2);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_create_evicts_stale_sessions() {
        let store = SessionStore::with_idle_timeout(Duration::from_millis(20));
        let stale = store.create().unwrap();
        store.create().unwrap();
        assert_eq!(store.count(), 2);

        std::thread::sleep(Duration::from_millis(50));
        let fresh = store.create().unwrap();

        assert_eq!(store.count(), 1);
        assert!(store.contains(&fresh).unwrap());
        assert!(!store.contains(&stale).unwrap());
    }

    #[test]
    fn test_active_sessions_survive_cleanup() {
        let store = SessionStore::with_idle_timeout(Duration::from_millis(100));
        let active = store.create().unwrap();
        let idle = store.create().unwrap();

        std::thread::sleep(Duration::from_millis(70));
        store.update(&active, |_| ()).unwrap();
        std::thread::sleep(Duration::from_millis(70));

        store.create().unwrap();
        assert!(store.contains(&active).unwrap());
        assert!(!store.contains(&idle).unwrap());
    }

    #[test]
    fn test_no_sweep_before_timeout() {
        let store = SessionStore::with_idle_timeout(Duration::from_secs(3600));
        for _ in 0..10 {
            store.create().unwrap();
        }
        assert_eq!(store.count(), 10);
    }

    #[test]
    fn test_concurrent_access() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(SessionStore::new());
        let mut handles = vec![];

        for _ in 0..50 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || store.create().unwrap()));
        }

        let tokens: Vec<SessionToken> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let unique: std::collections::HashSet<_> = tokens.iter().collect();
        assert_eq!(unique.len(), 50);
        assert_eq!(store.count(), 50);
    }
}
