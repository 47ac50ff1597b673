pub mod food;
pub mod health;
pub mod prediction;
pub mod server;
