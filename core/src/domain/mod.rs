pub mod common;
pub mod food;
pub mod guardrail;
pub mod health;
pub mod portion;
pub mod prediction;
