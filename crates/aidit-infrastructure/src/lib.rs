pub mod config_storage;
pub mod paths;
pub mod state_repository;
pub mod storage;

pub use crate::config_storage::ConfigStorage;
pub use crate::paths::AiditPaths;
pub use crate::state_repository::{InMemoryStateRepository, JsonFileStateRepository};
