pub mod mappers;
pub mod repositories;

pub use repositories::in_memory_food_catalog::InMemoryFoodCatalog;
