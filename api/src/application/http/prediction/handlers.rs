pub mod log_meals;
pub mod predict_meal;
