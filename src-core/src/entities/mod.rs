pub mod entities_model;
pub mod entities_repository;
pub mod entities_service;
pub mod entities_traits;

pub use entities_model::{Entity, EntityFilters, EntityUpdate, NewEntity};
pub use entities_repository::EntityRepository;
pub use entities_service::EntityService;
pub use entities_traits::{EntityRepositoryTrait, EntityServiceTrait};
