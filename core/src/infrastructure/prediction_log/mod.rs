pub mod jsonl_prediction_log;

pub use jsonl_prediction_log::JsonlPredictionLog;
