pub mod get_food;
pub mod get_foods;
