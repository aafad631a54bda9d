//! Session Repository

use shared::models::Session;

use super::BaseRepository;
use crate::db::Database;
use crate::utils::{AppError, AppResult};

/// Outcome of looking a bearer token up in the session store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    Active(Session),
    /// Expired; the session has been removed
    Expired,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct SessionRepository {
    base: BaseRepository,
}

impl SessionRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Store a new session, dropping sessions that have already expired
    pub async fn insert(&self, session: Session, now_millis: i64) -> AppResult<()> {
        self.base
            .db()
            .write(|snap| {
                snap.sessions.retain(|s| !s.is_expired(now_millis));
                snap.sessions.push(session);
                Ok(())
            })
            .await
    }

    /// Resolve a token. An expired session is purged on the spot.
    pub async fn lookup(&self, token: &str, now_millis: i64) -> AppResult<SessionLookup> {
        let snap = self.base.db().read().await?;
        match snap.sessions.iter().find(|s| s.token == token) {
            None => Ok(SessionLookup::Unknown),
            Some(s) if !s.is_expired(now_millis) => Ok(SessionLookup::Active(s.clone())),
            Some(_) => {
                self.base
                    .db()
                    .write(|snap| {
                        snap.sessions.retain(|s| s.token != token);
                        Ok::<_, AppError>(())
                    })
                    .await?;
                Ok(SessionLookup::Expired)
            }
        }
    }

    /// Revoke a token; returns whether a session was removed
    pub async fn remove(&self, token: &str) -> AppResult<bool> {
        self.base
            .db()
            .write(|snap| {
                let before = snap.sessions.len();
                snap.sessions.retain(|s| s.token != token);
                Ok(snap.sessions.len() != before)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Snapshot;

    fn session(token: &str, expires: i64) -> Session {
        Session {
            token: token.to_string(),
            user_id: 1,
            expires,
        }
    }

    #[tokio::test]
    async fn test_lookup_states() {
        let repo = SessionRepository::new(Database::in_memory(Snapshot::default()));
        repo.insert(session("live", 2_000), 0).await.unwrap();
        repo.insert(session("old", 500), 0).await.unwrap();

        assert!(matches!(
            repo.lookup("live", 1_000).await.unwrap(),
            SessionLookup::Active(_)
        ));
        assert_eq!(repo.lookup("nope", 1_000).await.unwrap(), SessionLookup::Unknown);

        assert_eq!(repo.lookup("old", 1_000).await.unwrap(), SessionLookup::Expired);
        // purged by the failed attempt
        assert_eq!(repo.lookup("old", 1_000).await.unwrap(), SessionLookup::Unknown);
        let snap = repo.base.db().read().await.unwrap();
        assert_eq!(snap.sessions, vec![session("live", 2_000)]);
    }

    #[tokio::test]
    async fn test_insert_drops_expired_sessions() {
        let repo = SessionRepository::new(Database::in_memory(Snapshot::default()));
        repo.insert(session("a", 100), 0).await.unwrap();
        repo.insert(session("b", 1_000), 200).await.unwrap();
        let snap = repo.base.db().read().await.unwrap();
        assert_eq!(snap.sessions, vec![session("b", 1_000)]);
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = SessionRepository::new(Database::in_memory(Snapshot::default()));
        repo.insert(session("a", 1_000), 0).await.unwrap();
        repo.insert(session("b", 1_000), 0).await.unwrap();
        assert!(repo.remove("a").await.unwrap());
        assert!(!repo.remove("a").await.unwrap());
        let snap = repo.base.db().read().await.unwrap();
        assert_eq!(snap.sessions, vec![session("b", 1_000)]);
    }
}
