use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Single-flight guard for lead submissions. A second submission with the
/// same key while one is in flight gets no permit and must be rejected
/// without touching the store. The permit releases its key on drop, so the
/// key is freed on success and on every failure path alike.
#[derive(Debug, Clone, Default)]
pub struct InflightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InflightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key`, or returns `None` when a submission with the same key
    /// is already in flight.
    pub fn try_begin(&self, key: impl Into<String>) -> Option<InflightPermit> {
        let key = key.into();
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        if keys.insert(key.clone()) {
            Some(InflightPermit {
                key,
                keys: Arc::clone(&self.keys),
            })
        } else {
            None
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.keys.lock().unwrap().len()
    }
}

#[derive(Debug)]
pub struct InflightPermit {
    key: String,
    keys: Arc<Mutex<HashSet<String>>>,
}

impl Drop for InflightPermit {
    fn drop(&mut self) {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        keys.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_refused_until_release() {
        let guard = InflightGuard::new();

        let permit = guard.try_begin("prop-1:9876543210");
        assert!(permit.is_some());
        assert!(guard.try_begin("prop-1:9876543210").is_none());

        // A different key is unrelated in-flight state.
        assert!(guard.try_begin("prop-2:9876543210").is_some());

        drop(permit);
        assert!(guard.try_begin("prop-1:9876543210").is_some());
    }

    #[test]
    fn permit_releases_on_error_paths_too() {
        let guard = InflightGuard::new();

        let result: Result<(), &str> = (|| {
            let _permit = guard.try_begin("prop-1:555").ok_or("busy")?;
            Err("store unreachable")
        })();

        assert!(result.is_err());
        // The failed attempt must not leave the key claimed.
        assert_eq!(guard.len(), 0);
        assert!(guard.try_begin("prop-1:555").is_some());
    }

    #[tokio::test]
    async fn concurrent_duplicate_submissions_race_to_one_permit() {
        let guard = InflightGuard::new();
        let barrier = Arc::new(tokio::sync::Barrier::new(9));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let guard = guard.clone();
            let barrier = barrier.clone();
            tasks.push(tokio::spawn(async move {
                let permit = guard.try_begin("prop-1:777");
                // Every task has attempted before any permit is released,
                // as with a double-click racing an in-flight write.
                barrier.wait().await;
                permit.is_some()
            }));
        }
        barrier.wait().await;

        let mut accepted = 0;
        for task in tasks {
            if task.await.unwrap() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(guard.len(), 0);
    }
}
