pub mod persona_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod staged_item_repo;

pub use persona_repo::PersonaRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use staged_item_repo::StagedItemRepo;
