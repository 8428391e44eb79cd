use async_trait::async_trait;
use models::player::{Player, PlayerInput};

use crate::errors::ServiceError;

/// Store seam for player records.
///
/// Implementations must make each operation atomic with respect to every
/// other: the collection a call observes is exactly the collection its
/// mutation applies to, with no interleaving in between.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Full collection, current as of call time.
    async fn list(&self) -> Result<Vec<Player>, ServiceError>;
    /// Record with the given id, or `NotFound`.
    async fn get(&self, id: &str) -> Result<Player, ServiceError>;
    /// Mint a fresh id, append a record built from `input`, persist.
    async fn create(&self, input: PlayerInput) -> Result<Player, ServiceError>;
    /// Patch the record with `id`, or create one when absent. The flag is
    /// `true` when a record was created; a created record gets a freshly
    /// generated id, the lookup id is not reused.
    async fn upsert(&self, id: &str, input: PlayerInput)
        -> Result<(Player, bool), ServiceError>;
    /// Patch the record with `id`; never creates.
    async fn patch(&self, id: &str, input: PlayerInput) -> Result<Player, ServiceError>;
    /// Remove the record with `id` and persist the collection without it.
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
