use anyhow::Context;
use clap::Parser;
use heart_risk::config::{Command, PredictArgs};
use heart_risk::utils::error::{AppError, ErrorSeverity};
use heart_risk::utils::logger::{self, LogFormat};
use heart_risk::utils::validation::Validate;
use heart_risk::{app, AppConfig, CliConfig, InferencePipeline, LocalArtifacts};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to read configuration from {}", cli.config))?;
    cli.apply_overrides(&mut config);

    logger::init_logger(
        cli.verbose,
        &config.logging.level,
        LogFormat::parse(&config.logging.format),
    );
    tracing::info!("Starting heart-risk");
    tracing::debug!("Configuration: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let outcome = match &cli.command {
        Command::Serve { .. } => app::serve(&config).await,
        Command::Predict(args) => run_predict(&config, args),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "heart-risk failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

fn run_predict(config: &AppConfig, args: &PredictArgs) -> heart_risk::Result<()> {
    let (selector, record) = args.to_request()?;
    let pipeline = InferencePipeline::new(LocalArtifacts::new(&config.artifacts.dir));
    let result = pipeline.predict(selector, &record)?;

    println!("{}", result.risk_level().headline());
    println!("Risk Score: {}", result.risk_score_percent());
    Ok(())
}

fn exit_code(e: &AppError) -> i32 {
    match e.severity() {
        // rejected input
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
