use crate::domain::{
    common::entities::app_errors::CoreError,
    food::entities::{FoodDetails, FoodRecord},
};

/// Read-only access to the reference nutrition table.
///
/// The table is loaded once at startup and shared across requests, so lookups
/// are synchronous and take `&self`.
#[cfg_attr(test, mockall::automock)]
pub trait FoodCatalog: Send + Sync {
    /// Exact dish-name match with a case-insensitive fallback. Fails with
    /// [`CoreError::NotFound`] carrying near-match suggestions.
    fn find(&self, name: &str) -> Result<FoodRecord, CoreError>;

    /// Sorted dish names, filtered by case-insensitive substring when a term is given.
    fn search(&self, term: Option<String>) -> Vec<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait FoodService: Send + Sync {
    fn get_food(&self, name: &str) -> Result<FoodDetails, CoreError>;

    fn search_foods(&self, term: Option<String>) -> Vec<String>;
}
