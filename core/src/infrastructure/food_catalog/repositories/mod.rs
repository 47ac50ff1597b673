pub mod in_memory_food_catalog;
