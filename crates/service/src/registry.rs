//! Live chat sessions keyed by id, plus the most recently started one.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::ServiceError;
use crate::session::ChatSession;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<ChatSession>>>,
    current: RwLock<Option<Uuid>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `session` and make it the current one.
    pub async fn insert(&self, session: Arc<ChatSession>) {
        let id = session.id();
        self.sessions.write().await.insert(id, session);
        *self.current.write().await = Some(id);
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<ChatSession>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// The most recently started session.
    pub async fn current(&self) -> Option<Arc<ChatSession>> {
        let id = (*self.current.read().await)?;
        self.get(id).await
    }

    /// The session named by `id`, or the current one when no id is given.
    pub async fn resolve(&self, id: Option<Uuid>) -> Result<Arc<ChatSession>, ServiceError> {
        match id {
            Some(id) => self.get(id).await.ok_or(ServiceError::SessionNotFound(id)),
            None => self.current().await.ok_or(ServiceError::NoActiveSession),
        }
    }

    /// Drop finished sessions whose messages were all delivered, except the current one.
    /// Returns how many were removed.
    pub async fn prune_finished(&self) -> usize {
        let current = *self.current.read().await;
        let candidates: Vec<Arc<ChatSession>> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|session| Some(session.id()) != current)
            .cloned()
            .collect();

        let mut finished = Vec::new();
        for session in candidates {
            if !session.status().await.is_active() && session.is_drained().await {
                finished.push(session.id());
            }
        }

        let mut sessions = self.sessions.write().await;
        for id in &finished {
            sessions.remove(id);
        }
        finished.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
