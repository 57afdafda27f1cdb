use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-session mutexes. Mutations of one session are serialized while
/// unrelated sessions proceed independently. The table itself is only locked
/// long enough to look up or insert an entry.
///
/// Entries nobody holds or waits on are swept on every acquire, so the table
/// tracks in-flight sessions rather than every session ever seen.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Holders and waiters each own a clone; only the table's is left on idle entries.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(session_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_session_is_serialized() {
        let locks = SessionLocks::new();
        let _held = locks.acquire("cs_1").await;

        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire("cs_1")).await;
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn test_other_sessions_not_blocked() {
        let locks = SessionLocks::new();
        let _held = locks.acquire("cs_1").await;

        let other = tokio::time::timeout(Duration::from_millis(50), locks.acquire("cs_2")).await;
        assert!(other.is_ok());
        assert_eq!(locks.tracked().await, 2);
    }

    #[tokio::test]
    async fn test_released_on_drop() {
        let locks = SessionLocks::new();
        drop(locks.acquire("cs_1").await);

        let again = tokio::time::timeout(Duration::from_millis(50), locks.acquire("cs_1")).await;
        assert!(again.is_ok());
        assert_eq!(locks.tracked().await, 1);
    }

    #[tokio::test]
    async fn test_idle_entries_are_pruned() {
        let locks = SessionLocks::new();
        for n in 0..10 {
            drop(locks.acquire(&format!("cs_{}", n)).await);
        }
        let _held = locks.acquire("cs_held").await;
        assert_eq!(locks.tracked().await, 1);

        drop(locks.acquire("cs_other").await);
        assert_eq!(locks.tracked().await, 2);
    }

    #[tokio::test]
    async fn test_waiters_keep_their_entry() {
        let locks = Arc::new(SessionLocks::new());
        let held = locks.acquire("cs_1").await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire("cs_1").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(locks.acquire("cs_2").await);
        let _again = locks.acquire("cs_3").await;
        assert_eq!(locks.tracked().await, 2);

        drop(held);
        tokio::time::timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
    }
}
