pub mod category;
pub mod entities;
pub mod ports;
pub mod services;

pub use category::{FoodCategory, categorize};
pub use entities::{FoodDetails, FoodRecord};
pub use ports::{FoodCatalog, FoodService};
