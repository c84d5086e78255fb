use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caseflow_core::{Payload, PipelineSpec, ProviderKey};
use caseflow_engine::{
    GeminiClient, KeywordEvaluator, McpProvider, PipelineRunner, ProviderRegistry, StageKind,
};

const DEFAULT_CONFIG: &str = "config/pipeline.toml";
const DEFAULT_INPUT: &str = "config/sample_input.json";

#[derive(Parser)]
#[command(name = "caseflow")]
#[command(about = "Staged support-triage pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configured pipeline against an input payload
    Run {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Override the backing model id
        #[arg(long)]
        model: Option<String>,
    },
    /// Parse a pipeline descriptor and report its stages
    Check {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { config, input, model }) => run(&config, &input, model).await,
        Some(Commands::Check { config }) => check(&config),
        None => run(&cli.config, &cli.input, None).await,
    }
}

async fn run(config: &Path, input: &Path, model: Option<String>) -> Result<()> {
    init_tracing();

    let spec = load_spec(config)?;
    let initial = load_payload(input)?;
    tracing::info!(
        pipeline = %spec.name,
        stages = spec.stages.len(),
        "Loaded pipeline descriptor"
    );

    let mut client = GeminiClient::from_env()
        .context("A Gemini API key is required to run the pipeline")?;
    if let Some(model) = model {
        client = client.with_model(&model);
    }

    let evaluator = Arc::new(KeywordEvaluator::default());
    let mut common = McpProvider::new(ProviderKey::Common, client.clone())
        .with_evaluator(evaluator.clone());
    let mut atlas = McpProvider::new(ProviderKey::Atlas, client).with_evaluator(evaluator);
    if let Some(persona) = spec.persona() {
        common = common.with_persona(persona);
        atlas = atlas.with_persona(persona);
    }

    let registry = ProviderRegistry::new()
        .register(Arc::new(common))
        .register(Arc::new(atlas));
    let runner = PipelineRunner::new(spec.stages.clone(), registry)
        .context("Invalid pipeline configuration")?;

    println!("Pipeline '{}' starting...", spec.name);
    if let Some(persona) = spec.persona() {
        println!("Persona:\n{persona}");
    }

    let state = runner.run(initial).await?;

    println!();
    println!("FINAL PAYLOAD:");
    println!("{}", serde_json::to_string_pretty(&Value::Object(state.payload))?);

    println!();
    println!("LOGS:");
    for line in &state.logs {
        println!("{line}");
    }

    Ok(())
}

fn check(config: &Path) -> Result<()> {
    let spec = load_spec(config)?;

    println!();
    println!("Pipeline: {}", spec.name);
    println!("Stages ({}):", spec.stages.len());
    for stage in &spec.stages {
        let kind = match StageKind::of(stage) {
            StageKind::Sequential => format!("{} abilities", stage.abilities.len()),
            StageKind::Decision => "confidence branch".to_string(),
            StageKind::Unimplemented => format!("no-op (mode={})", stage.mode),
        };
        println!("  {:<12} {}", stage.name, kind);
    }
    println!();

    Ok(())
}

fn load_spec(path: &Path) -> Result<PipelineSpec> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pipeline descriptor {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse pipeline descriptor {}", path.display()))
}

fn load_payload(path: &Path) -> Result<Payload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input payload {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse input payload {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Input payload must be a JSON object"),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caseflow=info,caseflow_engine=info".into()),
        )
        .init();
}
