use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::Mutex, time::Instant};

use crate::{engine::RoundKind, models::Question, names};

/// One pin slot per kind of round; a chapter round occupies the same slot
/// whatever its chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinSlot {
    Random,
    Chapter,
    Wrong,
    LastWrong,
}

impl From<&RoundKind> for PinSlot {
    fn from(kind: &RoundKind) -> Self {
        match kind {
            RoundKind::Random10 => PinSlot::Random,
            RoundKind::ByChapter(_) => PinSlot::Chapter,
            RoundKind::AllWrong => PinSlot::Wrong,
            RoundKind::LastWrong => PinSlot::LastWrong,
        }
    }
}

#[derive(Debug, Clone)]
struct Pin {
    kind: RoundKind,
    questions: Vec<Question>,
}

/// Per-session practice state: the question set of the round in progress and
/// the ids missed in the most recent graded round.
#[derive(Debug, Clone)]
pub struct SessionState {
    pins: HashMap<PinSlot, Pin>,
    last_missed: Vec<i64>,
    touched: Instant,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            pins: HashMap::new(),
            last_missed: Vec::new(),
            touched: Instant::now(),
        }
    }
}

impl SessionState {
    pub fn pin(&mut self, kind: &RoundKind, questions: Vec<Question>) {
        self.pins.insert(
            PinSlot::from(kind),
            Pin {
                kind: kind.clone(),
                questions,
            },
        );
    }

    /// Returns and clears the pin for `kind`. A pin left by a different
    /// chapter is cleared but not returned.
    pub fn take_pin(&mut self, kind: &RoundKind) -> Vec<Question> {
        match self.pins.remove(&PinSlot::from(kind)) {
            Some(pin) if pin.kind == *kind => pin.questions,
            Some(pin) => {
                tracing::debug!("discarding pin for {:?} while grading {:?}", pin.kind, kind);
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    pub fn set_last_missed(&mut self, ids: Vec<i64>) {
        self.last_missed = ids;
    }

    pub fn take_last_missed(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.last_missed)
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.touched.elapsed() > ttl
    }
}

/// In-memory session states keyed by the session cookie token.
///
/// A state lives as long as the cookie: entries idle for longer than the
/// cookie's max age are dropped on the next access to the store.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionState>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(names::SESSION_MAX_AGE_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Runs `f` against the state for `token`, creating it on first use.
    async fn with_session<T>(&self, token: &str, f: impl FnOnce(&mut SessionState) -> T) -> T {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions);
        let state = sessions.entry(token.to_string()).or_default();
        state.touched = Instant::now();
        f(state)
    }

    /// Runs `f` against the state for `token` only if the session exists.
    async fn with_existing_session<T>(
        &self,
        token: &str,
        f: impl FnOnce(&mut SessionState) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions);
        let state = sessions.get_mut(token)?;
        state.touched = Instant::now();
        Some(f(state))
    }

    fn prune(&self, sessions: &mut HashMap<String, SessionState>) {
        let before = sessions.len();
        sessions.retain(|_, state| !state.is_expired(self.ttl));
        let dropped = before - sessions.len();
        if dropped > 0 {
            tracing::debug!("dropped {dropped} expired review sessions");
        }
    }

    pub async fn pin(&self, token: &str, kind: &RoundKind, questions: Vec<Question>) {
        self.with_session(token, |s| s.pin(kind, questions)).await
    }

    pub async fn take_pin(&self, token: &str, kind: &RoundKind) -> Vec<Question> {
        self.with_existing_session(token, |s| s.take_pin(kind))
            .await
            .unwrap_or_default()
    }

    pub async fn set_last_missed(&self, token: &str, ids: Vec<i64>) {
        self.with_session(token, |s| s.set_last_missed(ids)).await
    }

    pub async fn take_last_missed(&self, token: &str) -> Vec<i64> {
        self.with_existing_session(token, |s| s.take_last_missed())
            .await
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;

    fn q(id: i64) -> Question {
        Question {
            id,
            chapter: "Ming".to_string(),
            question: format!("Question {id}"),
            answer: "A".to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn take_pin_returns_and_clears() {
        let mut state = SessionState::default();
        state.pin(&RoundKind::Random10, vec![q(1), q(2)]);
        assert_eq!(state.take_pin(&RoundKind::Random10).len(), 2);
        assert!(state.take_pin(&RoundKind::Random10).is_empty());
    }

    #[test]
    fn pins_are_kept_per_round_kind() {
        let mut state = SessionState::default();
        state.pin(&RoundKind::Random10, vec![q(1)]);
        state.pin(&RoundKind::AllWrong, vec![q(2), q(3)]);
        assert_eq!(state.take_pin(&RoundKind::AllWrong).len(), 2);
        assert_eq!(state.take_pin(&RoundKind::Random10).len(), 1);
    }

    #[test]
    fn chapter_pin_for_another_chapter_is_not_returned() {
        let mut state = SessionState::default();
        state.pin(&RoundKind::ByChapter("Ming".into()), vec![q(1)]);
        assert!(state
            .take_pin(&RoundKind::ByChapter("Qing".into()))
            .is_empty());
        assert!(state
            .take_pin(&RoundKind::ByChapter("Ming".into()))
            .is_empty());
    }

    #[test]
    fn last_missed_is_consumed_once() {
        let mut state = SessionState::default();
        state.set_last_missed(vec![4, 5]);
        assert_eq!(state.take_last_missed(), vec![4, 5]);
        assert!(state.take_last_missed().is_empty());
    }

    #[tokio::test]
    async fn sessions_do_not_share_state() {
        let store = SessionStore::new();
        store.set_last_missed("a", vec![1]).await;
        assert!(store.take_last_missed("b").await.is_empty());
        assert_eq!(store.take_last_missed("a").await, vec![1]);
    }

    #[tokio::test]
    async fn reading_an_unknown_session_does_not_create_it() {
        let store = SessionStore::new();
        for i in 0..100 {
            let token = format!("cookieless-{i}");
            assert!(store.take_pin(&token, &RoundKind::Random10).await.is_empty());
            assert!(store.take_last_missed(&token).await.is_empty());
        }
        assert!(store.sessions.lock().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_expire_with_the_cookie() {
        let store = SessionStore::with_ttl(Duration::from_secs(60));
        store.pin("old", &RoundKind::Random10, vec![q(1)]).await;
        store.set_last_missed("old", vec![1]).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        store.set_last_missed("fresh", vec![2]).await;

        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(store.take_pin("old", &RoundKind::Random10).await.is_empty());
        assert!(store.take_last_missed("old").await.is_empty());

        let sessions = store.sessions.lock().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key("fresh"));
    }

    #[tokio::test(start_paused = true)]
    async fn access_keeps_a_session_alive() {
        let store = SessionStore::with_ttl(Duration::from_secs(60));
        store.pin("a", &RoundKind::AllWrong, vec![q(1)]).await;

        tokio::time::advance(Duration::from_secs(50)).await;
        store.set_last_missed("a", vec![3]).await;
        tokio::time::advance(Duration::from_secs(50)).await;

        assert_eq!(store.take_last_missed("a").await, vec![3]);
        assert_eq!(store.take_pin("a", &RoundKind::AllWrong).await.len(), 1);
    }
}
