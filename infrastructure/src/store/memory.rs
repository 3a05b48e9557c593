//! In-process action store.

use async_trait::async_trait;
use proposal_application::ports::action_store::{ActionStore, StoreError};
use proposal_domain::{ActionRecord, ProblemId};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Action records kept in memory, grouped by problem.
#[derive(Default)]
pub struct InMemoryActionStore {
    records: RwLock<HashMap<ProblemId, Vec<ActionRecord>>>,
}

impl InMemoryActionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActionStore for InMemoryActionStore {
    async fn create(&self, record: ActionRecord) -> Result<ActionRecord, StoreError> {
        let record = match record.created_at {
            Some(_) => record,
            None => record.with_created_at(chrono::Utc::now()),
        };
        debug!("Storing {} record {}", record.kind, record.id);
        self.records
            .write()
            .await
            .entry(record.problem_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn find_by_problem(
        &self,
        problem_id: &ProblemId,
    ) -> Result<Vec<ActionRecord>, StoreError> {
        let mut records = self
            .records
            .read()
            .await
            .get(problem_id)
            .cloned()
            .unwrap_or_default();
        // Stable: records created in the same instant keep insertion order.
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }

    async fn delete_by_problem(&self, problem_id: &ProblemId) -> Result<usize, StoreError> {
        Ok(self
            .records
            .write()
            .await
            .remove(problem_id)
            .map(|records| records.len())
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use proposal_domain::ActionKind;

    fn record(problem: &str, kind: ActionKind, output: &str) -> ActionRecord {
        ActionRecord::new(ProblemId::new(problem), kind, "", output).unwrap()
    }

    #[tokio::test]
    async fn test_create_stamps_created_at() {
        let store = InMemoryActionStore::new();
        let stored = store
            .create(record("p-1", ActionKind::Plan, "plan"))
            .await
            .unwrap();
        assert!(stored.created_at.is_some());

        let fixed = Utc::now() - Duration::hours(1);
        let stored = store
            .create(record("p-1", ActionKind::Write, "draft").with_created_at(fixed))
            .await
            .unwrap();
        assert_eq!(stored.created_at, Some(fixed));
    }

    #[tokio::test]
    async fn test_find_by_problem_sorted_and_isolated() {
        let store = InMemoryActionStore::new();
        let now = Utc::now();
        store
            .create(record("p-1", ActionKind::Review, "late").with_created_at(now))
            .await
            .unwrap();
        store
            .create(
                record("p-1", ActionKind::Plan, "early")
                    .with_created_at(now - Duration::minutes(5)),
            )
            .await
            .unwrap();
        store
            .create(record("p-2", ActionKind::Analyze, "other"))
            .await
            .unwrap();

        let found = store.find_by_problem(&ProblemId::new("p-1")).await.unwrap();
        let outputs: Vec<_> = found.iter().map(|r| r.output()).collect();
        assert_eq!(outputs, vec!["early", "late"]);
        assert!(
            store
                .find_by_problem(&ProblemId::new("missing"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_delete_by_problem_returns_count() {
        let store = InMemoryActionStore::new();
        for output in ["a", "b"] {
            store
                .create(record("p-1", ActionKind::Plan, output))
                .await
                .unwrap();
        }

        let id = ProblemId::new("p-1");
        assert_eq!(store.delete_by_problem(&id).await.unwrap(), 2);
        assert_eq!(store.delete_by_problem(&id).await.unwrap(), 0);
        assert!(store.find_by_problem(&id).await.unwrap().is_empty());
    }
}
