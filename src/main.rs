use creaturegen::{
    logger::{self, LogLevel, LoggerConfig},
    pipeline, Config, CreatureClient, PipelineOutcome, Result,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_result = dotenv::dotenv();
    let config = Config::from_env();

    let logger_config = config
        .as_ref()
        .map(logger::logger_config_for)
        .unwrap_or_else(|_| LoggerConfig::default().with_level(LogLevel::Info));
    if let Err(e) = logger::init_with_config(logger_config) {
        eprintln!("{}", e);
    }

    match dotenv_result {
        Ok(path) => log::info!("✅ Loaded {}", path.display()),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(outcome) => {
            println!(
                "✅ Image generated and saved to {} ({} bytes, HTTP {})",
                outcome.output_path.display(),
                outcome.bytes_written,
                outcome.image_status
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<PipelineOutcome> {
    logger::log_config_info(config);

    let client = CreatureClient::new(config)?;
    pipeline::run(client.text(), client.image(), config).await
}
