//! In-memory `IssueRepository` with storage-style serial ids.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{IssuePersistenceError, IssueRepository};
use crate::domain::{Issue, IssueId, IssuePatch, NewIssue};

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    issues: BTreeMap<i32, Issue>,
}

/// Issue store ordered by id. Ids start at 1 and are never reused.
pub struct InMemoryIssueRepository {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl InMemoryIssueRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(Store::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Store>, IssuePersistenceError> {
        self.store
            .lock()
            .map_err(|_| IssuePersistenceError::query("issue store lock poisoned"))
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn list(&self) -> Result<Vec<Issue>, IssuePersistenceError> {
        Ok(self.lock()?.issues.values().cloned().collect())
    }

    async fn find_by_id(&self, id: IssueId) -> Result<Option<Issue>, IssuePersistenceError> {
        Ok(self.lock()?.issues.get(&id.get()).cloned())
    }

    async fn insert(&self, issue: &NewIssue) -> Result<Issue, IssuePersistenceError> {
        let now = self.clock.utc();
        let mut store = self.lock()?;
        let id = store
            .next_id
            .checked_add(1)
            .ok_or_else(|| IssuePersistenceError::query("issue id sequence exhausted"))?;
        store.next_id = id;
        let stored = Issue {
            id: IssueId::new(id),
            title: issue.title.clone(),
            description: issue.description.clone(),
            status: issue.status,
            priority: issue.priority,
            user_id: issue.user_id.clone(),
            created_at: now,
            updated_at: now,
        };
        store.issues.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: IssueId,
        patch: &IssuePatch,
    ) -> Result<Option<Issue>, IssuePersistenceError> {
        let now = self.clock.utc();
        let mut store = self.lock()?;
        Ok(store.issues.get_mut(&id.get()).map(|issue| {
            patch.apply_to(issue, now);
            issue.clone()
        }))
    }

    async fn delete(&self, id: IssueId) -> Result<bool, IssuePersistenceError> {
        Ok(self.lock()?.issues.remove(&id.get()).is_some())
    }
}
