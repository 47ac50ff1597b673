pub mod classifier;
pub mod food_catalog;
pub mod prediction_log;
