use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spamscore-server")]
#[command(author, version, about = "Spam scoring service", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the scoring endpoint over HTTP
    Serve(ServeArgs),

    /// Score a single text and print the result as JSON
    Score(ScoreArgs),
}

/// Artifact path overrides shared by all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Classifier artifact path
    #[arg(long, env = "SPAMSCORE_CLASSIFIER")]
    pub classifier: Option<PathBuf>,

    /// Vectorizer artifact path
    #[arg(long, env = "SPAMSCORE_VECTORIZER")]
    pub vectorizer: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "spamscore.yaml")]
    pub config: PathBuf,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "SPAMSCORE_PORT")]
    pub port: Option<u16>,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Threshold used when a request omits one
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Disable the Prometheus recorder
    #[arg(long)]
    pub no_metrics: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Text to score
    #[arg(short, long)]
    pub text: String,

    /// Decision threshold
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Configuration file path
    #[arg(short, long, default_value = "spamscore.yaml")]
    pub config: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<&ServeArgs> for ConfigOverrides {
    fn from(args: &ServeArgs) -> Self {
        Self {
            listen: args.listen.clone(),
            port: args.port,
            classifier_path: args.model.classifier.clone(),
            vectorizer_path: args.model.vectorizer.clone(),
            default_threshold: args.threshold,
            metrics_enabled: args.no_metrics.then_some(false),
        }
    }
}

impl From<&ScoreArgs> for ConfigOverrides {
    fn from(args: &ScoreArgs) -> Self {
        Self {
            classifier_path: args.model.classifier.clone(),
            vectorizer_path: args.model.vectorizer.clone(),
            default_threshold: args.threshold,
            ..Default::default()
        }
    }
}
