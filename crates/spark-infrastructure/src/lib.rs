pub mod file_idea_repository;
pub mod memory_idea_repository;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::file_idea_repository::FileIdeaRepository;
pub use crate::memory_idea_repository::InMemoryIdeaRepository;
pub use crate::secret_service::SecretServiceImpl;
