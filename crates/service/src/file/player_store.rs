use std::sync::Arc;

use models::player::{Player, PlayerInput};

use crate::errors::ServiceError;
use crate::players::PlayerStore;
use crate::storage::json_doc_store::JsonDocStore;

/// File-backed player store.
///
/// The whole collection lives in one JSON array on disk; `JsonDocStore`
/// serializes every load-mutate-save cycle, so concurrent handlers cannot
/// clobber each other's writes. Records are located by linear scan on id.
#[derive(Clone)]
pub struct FilePlayerStore {
    store: Arc<JsonDocStore<Vec<Player>>>,
}

impl FilePlayerStore {
    /// Open the store at the given file path. Creates the file with an
    /// empty collection if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonDocStore::<Vec<Player>>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait::async_trait]
impl PlayerStore for FilePlayerStore {
    async fn list(&self) -> Result<Vec<Player>, ServiceError> {
        self.store.read().await
    }

    async fn get(&self, id: &str) -> Result<Player, ServiceError> {
        let players = self.store.read().await?;
        players
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found("Player"))
    }

    async fn create(&self, input: PlayerInput) -> Result<Player, ServiceError> {
        self.store
            .update(|players| {
                let player = Player::create(input);
                players.push(player.clone());
                Ok(player)
            })
            .await
    }

    async fn upsert(
        &self,
        id: &str,
        input: PlayerInput,
    ) -> Result<(Player, bool), ServiceError> {
        self.store
            .update(|players| match players.iter_mut().find(|p| p.id == id) {
                Some(existing) => {
                    existing.apply(input);
                    Ok((existing.clone(), false))
                }
                None => {
                    // Lookup miss creates a record under a brand-new id;
                    // the path id is only ever used to search.
                    let player = Player::create(input);
                    players.push(player.clone());
                    Ok((player, true))
                }
            })
            .await
    }

    async fn patch(&self, id: &str, input: PlayerInput) -> Result<Player, ServiceError> {
        self.store
            .update(|players| {
                let player = players
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| ServiceError::not_found("Player"))?;
                player.apply(input);
                Ok(player.clone())
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store
            .update(|players| {
                let pos = players
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or_else(|| ServiceError::not_found("Player"))?;
                players.remove(pos);
                Ok(())
            })
            .await
    }
}
