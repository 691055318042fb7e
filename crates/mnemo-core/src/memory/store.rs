//! MemoryStore trait definition.
//!
//! An owner-keyed collection of memory records. Each owner's records are kept
//! in insertion order; an owner with no records is indistinguishable from an
//! owner that was never seen.

use mnemo_types::error::RepositoryError;
use mnemo_types::memory::{MemoryId, MemoryRecord};

/// Repository trait for memory records.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition) so backing
/// stores that do I/O fit the same interface as the in-memory one.
pub trait MemoryStore: Send + Sync {
    /// Append records for `owner_id`, one per `(text, embedding)` entry, in
    /// order, assigning each a fresh id.
    ///
    /// All-or-nothing: on error no entry from the batch is visible.
    fn append_all(
        &self,
        owner_id: &str,
        entries: Vec<(String, Vec<f32>)>,
    ) -> impl std::future::Future<Output = Result<Vec<MemoryId>, RepositoryError>> + Send;

    /// Append one record for `owner_id` and return its fresh id.
    fn append(
        &self,
        owner_id: &str,
        text: &str,
        embedding: Vec<f32>,
    ) -> impl std::future::Future<Output = Result<MemoryId, RepositoryError>> + Send {
        async move {
            let ids = self
                .append_all(owner_id, vec![(text.to_string(), embedding)])
                .await?;
            ids.into_iter()
                .next()
                .ok_or_else(|| RepositoryError::Query("append stored no record".to_string()))
        }
    }

    /// All records for an owner, in insertion order. Empty if none.
    fn get(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<MemoryRecord>, RepositoryError>> + Send;

    /// Look up a record by id across all owners.
    fn find_by_id(
        &self,
        id: &MemoryId,
    ) -> impl std::future::Future<Output = Result<Option<MemoryRecord>, RepositoryError>> + Send;

    /// Replace text and embedding of the record with `id`, keeping its id,
    /// owner, and position. Returns `false` if no such record exists.
    fn replace_in_place(
        &self,
        id: &MemoryId,
        text: &str,
        embedding: Vec<f32>,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Remove every record for an owner. Returns the number removed.
    fn delete_all(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<usize, RepositoryError>> + Send;
}
