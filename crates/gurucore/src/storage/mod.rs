//! User profile persistence

pub mod profile;
pub mod redis_store;
pub mod store;

use std::sync::Arc;

use crate::core::config::StoreBackend;
use crate::core::error::StoreError;

// Re-exports for convenience
pub use profile::UserProfile;
pub use redis_store::RedisProfileStore;
pub use store::{MemoryProfileStore, ProfileStore};

/// Builds the store selected by configuration.
///
/// Redis is not contacted here; see [`RedisProfileStore`].
pub fn open_store(backend: &StoreBackend) -> Result<Arc<dyn ProfileStore>, StoreError> {
    match backend {
        StoreBackend::Redis { url } => Ok(Arc::new(RedisProfileStore::open(url)?)),
        StoreBackend::Fixture { path } => {
            log::warn!("Using fixture profile store {}; registrations are not persisted", path.display());
            Ok(Arc::new(MemoryProfileStore::from_users_file(path)?))
        }
    }
}
