use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::resume::{ResumeInput, ResumeRecord};
use crate::repository::ResumeRepository;

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryResumeRepository {
    records: RwLock<HashMap<String, ResumeRecord>>,
}

impl InMemoryResumeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeRepository for InMemoryResumeRepository {
    async fn get(&self, id: &str) -> Result<Option<ResumeRecord>, AppError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn put(&self, record: ResumeRecord) -> Result<(), AppError> {
        self.records.write().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn update(
        &self,
        id: &str,
        input: ResumeInput,
    ) -> Result<Option<ResumeRecord>, AppError> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(id).map(|record| {
            record.apply(input);
            record.updated_at = Utc::now();
            record.clone()
        }))
    }

    async fn list(&self) -> Result<Vec<ResumeRecord>, AppError> {
        let mut records: Vec<ResumeRecord> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.records.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_put_get_replace() {
        let repo = InMemoryResumeRepository::new();
        let mut record = ResumeRecord::new("a");
        repo.put(record.clone()).await.unwrap();
        assert_eq!(repo.get("a").await.unwrap(), Some(record.clone()));

        record.full_name = Some("Jane".to_string());
        repo.put(record.clone()).await.unwrap();
        assert_eq!(
            repo.get("a").await.unwrap().unwrap().full_name.as_deref(),
            Some("Jane")
        );
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let repo = InMemoryResumeRepository::new();
        let newer = ResumeRecord::new("newer");
        let mut older = ResumeRecord::new("older");
        older.created_at = newer.created_at - Duration::days(1);
        repo.put(newer).await.unwrap();
        repo.put(older).await.unwrap();
        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["older", "newer"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_partial_updates_keep_both_fields() {
        let repo = Arc::new(InMemoryResumeRepository::new());
        repo.put(ResumeRecord::new("a")).await.unwrap();

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    let input = if i % 2 == 0 {
                        ResumeInput {
                            email: Some(format!("user{i}@x.com")),
                            ..Default::default()
                        }
                    } else {
                        ResumeInput {
                            phone: Some(format!("555-{i}")),
                            ..Default::default()
                        }
                    };
                    repo.update("a", input).await.unwrap()
                })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().is_some());
        }

        let record = repo.get("a").await.unwrap().unwrap();
        assert!(record.email.is_some());
        assert!(record.phone.is_some());
        assert!(record.updated_at >= record.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryResumeRepository::new();
        let updated = repo.update("nope", ResumeInput::default()).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_and_missing() {
        let repo = InMemoryResumeRepository::new();
        repo.put(ResumeRecord::new("a")).await.unwrap();
        assert!(repo.delete("a").await.unwrap());
        assert!(!repo.delete("a").await.unwrap());
        assert_eq!(repo.get("a").await.unwrap(), None);
    }
}
