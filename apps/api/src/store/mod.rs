//! Persistence gateway — a thin CRUD façade over the managed data store.
//! Each operation is a single round trip; no transactions span operations.

pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::{NewResume, ResumePatch, ResumeRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of an ownership-qualified mutation.
#[derive(Debug)]
pub enum Mutation<T> {
    Applied(T),
    /// No record with that id exists.
    NotFound,
    /// The record exists but belongs to a different owner.
    NotOwner,
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Inserts a record; the store assigns `id` and `created_at`.
    async fn create(&self, record: NewResume) -> Result<ResumeRow, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRow>, StoreError>;

    /// All resumes for an owner, newest-created first.
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<ResumeRow>, StoreError>;

    /// Applies `patch` only to a record matching both `id` and `owner`.
    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: ResumePatch,
    ) -> Result<Mutation<ResumeRow>, StoreError>;

    /// Deletes only a record matching both `id` and `owner`. Deleting twice
    /// yields `Applied` then `NotFound`.
    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<Mutation<()>, StoreError>;
}
