use bedrock_invoke::bedrock::BedrockCli;
use bedrock_invoke::config::Config;
use bedrock_invoke::env::EnvSnapshot;
use bedrock_invoke::error::Result;
use bedrock_invoke::pipeline;
use bedrock_invoke::registry::ModelRegistry;
use bedrock_invoke::response::Extracted;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "bedrock-invoke",
    about = "Invoke an Amazon Bedrock text model through the AWS CLI"
)]
struct Cli {
    /// Registered model name
    #[arg(short, long, default_value = "deepseek")]
    model: String,

    /// User prompt substituted into the model's template
    #[arg(
        short,
        long,
        default_value = "Explain what Amazon Bedrock is in one sentence."
    )]
    prompt: String,

    /// Path to config file (builtin model table when absent)
    #[arg(short, long, default_value = "bedrock.toml")]
    config: PathBuf,

    /// Override configured max_tokens
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Override configured temperature (clamped to [0, 1])
    #[arg(long)]
    temperature: Option<f64>,

    /// Override configured top_p (clamped to [0, 1])
    #[arg(long)]
    top_p: Option<f64>,

    /// Exit nonzero per error kind instead of the demo-friendly exit 0
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bedrock_invoke=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let strict = cli.strict;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Failures are reported on stdout; the exit code stays 0 unless
            // --strict asked for per-kind codes.
            println!("Error: {err}");
            if strict {
                ExitCode::from(err.exit_code())
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let env = EnvSnapshot::load();
    let config = Config::load_or_default(&cli.config)?;
    let request = config
        .request
        .with_overrides(cli.max_tokens, cli.temperature, cli.top_p);
    let registry = ModelRegistry::from_config(&config);
    let invoker = BedrockCli::from_config(&config.invoke, env);

    let extracted =
        pipeline::run_once(&registry, &invoker, &request, &cli.model, &cli.prompt).await?;

    match extracted {
        Extracted::Text(text) => {
            println!("Response:");
            println!("{text}");
        }
        Extracted::FullBody(dump) => {
            println!("Full Response Body: {dump}");
        }
    }
    Ok(())
}
