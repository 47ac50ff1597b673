use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dialog_core::domain::common::{
    ClassifierConfig, DatasetConfig, DialogConfig, EngineConfig, PredictionLogConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "dialog-api", version, about = "Meal-safety prediction API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub classifier: ClassifierArgs,

    #[command(flatten)]
    pub prediction_log: PredictionLogArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatasetArgs {
    #[arg(id = "dataset_path", long = "dataset-path", env = "DATASET_PATH", default_value = "data/foods.csv")]
    pub path: PathBuf,

    #[arg(long = "suggestion-limit", env = "SUGGESTION_LIMIT", default_value_t = 5)]
    pub suggestion_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassifierKind {
    Disabled,
    Logistic,
    Remote,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ClassifierArgs {
    #[arg(
        long = "classifier",
        env = "CLASSIFIER_KIND",
        value_enum,
        default_value_t = ClassifierKind::Disabled
    )]
    pub kind: ClassifierKind,

    /// JSON logistic model artifact, used with `--classifier logistic`.
    #[arg(long = "model-path", env = "MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Prediction endpoint, used with `--classifier remote`.
    #[arg(long = "model-endpoint", env = "MODEL_ENDPOINT")]
    pub endpoint: Option<String>,

    #[arg(long = "model-timeout-secs", env = "MODEL_TIMEOUT_SECS", default_value_t = 5)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct PredictionLogArgs {
    /// JSON-lines file receiving meal logs. Logging is disabled when unset.
    #[arg(id = "prediction_log_path", long = "prediction-log-path", env = "PREDICTION_LOG_PATH")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<ClassifierArgs> for ClassifierConfig {
    fn from(args: ClassifierArgs) -> Self {
        match (args.kind, args.model_path, args.endpoint) {
            (ClassifierKind::Logistic, Some(model_path), _) => {
                ClassifierConfig::Logistic { model_path }
            }
            (ClassifierKind::Remote, _, Some(endpoint)) => ClassifierConfig::Remote {
                endpoint,
                timeout_secs: args.timeout_secs,
            },
            (ClassifierKind::Logistic, None, _) => {
                tracing::warn!("--classifier logistic needs --model-path, classifier disabled");
                ClassifierConfig::Disabled
            }
            (ClassifierKind::Remote, _, None) => {
                tracing::warn!("--classifier remote needs --model-endpoint, classifier disabled");
                ClassifierConfig::Disabled
            }
            (ClassifierKind::Disabled, _, _) => ClassifierConfig::Disabled,
        }
    }
}

impl From<Args> for DialogConfig {
    fn from(args: Args) -> Self {
        DialogConfig {
            dataset: DatasetConfig {
                path: args.dataset.path,
            },
            classifier: args.classifier.into(),
            prediction_log: PredictionLogConfig {
                path: args.prediction_log.path,
            },
            engine: EngineConfig {
                suggestion_limit: args.dataset.suggestion_limit,
                ..EngineConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_without_model_is_disabled() {
        let args = Args::parse_from(["dialog-api", "--classifier", "logistic"]);

        let config = DialogConfig::from(args);

        assert!(matches!(config.classifier, ClassifierConfig::Disabled));
    }

    #[test]
    fn remote_classifier_keeps_timeout() {
        let args = Args::parse_from([
            "dialog-api",
            "--classifier",
            "remote",
            "--model-endpoint",
            "http://model:9000/predict",
            "--model-timeout-secs",
            "2",
            "--suggestion-limit",
            "3",
        ]);

        let config = DialogConfig::from(args);

        match config.classifier {
            ClassifierConfig::Remote {
                endpoint,
                timeout_secs,
            } => {
                assert_eq!(endpoint, "http://model:9000/predict");
                assert_eq!(timeout_secs, 2);
            }
            other => panic!("unexpected classifier config: {:?}", other),
        }
        assert_eq!(config.engine.suggestion_limit, 3);
    }

    #[test]
    fn origins_are_comma_separated() {
        let args = Args::parse_from([
            "dialog-api",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);

        assert_eq!(args.server.allowed_origins.len(), 2);
    }
}
