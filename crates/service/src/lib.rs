//! Service layer owning the player collection.
//! - `players` defines the store seam the HTTP layer depends on.
//! - `storage` holds the whole-document JSON persistence primitive.
//! - `file` provides the file-backed store implementation.

pub mod errors;
pub mod file;
pub mod players;
pub mod runtime;
pub mod storage;
