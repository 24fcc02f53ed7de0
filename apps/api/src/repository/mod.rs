//! Resume storage. Handlers hold an `Arc<dyn ResumeRepository>`; the render
//! pipeline only ever sees the `ResumeRecord` a lookup returns.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::resume::{ResumeInput, ResumeRecord};

pub use memory::InMemoryResumeRepository;
pub use postgres::PgResumeRepository;

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<ResumeRecord>, AppError>;

    /// Inserts or replaces the record with the same id.
    async fn put(&self, record: ResumeRecord) -> Result<(), AppError>;

    /// Applies a partial patch atomically and bumps `updated_at`.
    /// Returns the updated record, or `None` when `id` is unknown.
    async fn update(&self, id: &str, input: ResumeInput)
        -> Result<Option<ResumeRecord>, AppError>;

    /// All records, oldest first.
    async fn list(&self) -> Result<Vec<ResumeRecord>, AppError>;

    /// Returns `false` when nothing was stored under `id`.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
