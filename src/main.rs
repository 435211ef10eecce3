use anyhow::Context;
use clap::Parser;
use cropwise::cli::{Cli, Commands, RecommendArgs, RotateArgs, YieldArgs};
use cropwise::config::Config;
use cropwise::datasources::{PredictionClient, PredictionService};
use cropwise::logic::yield_estimator::remote_yield_reference;
use cropwise::logic::{RecommendationResolver, RotationResolver, YieldEstimator};
use cropwise::{report, CropWiseError};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init = cli.command {
        Config::setup_interactive().context("Interactive setup failed")?;
        return Ok(());
    }

    let config = match Config::load(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run `cropwise init` or copy config/config.yaml.example to config/config.yaml");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Recommend(ref args) => recommend(&config, args, cli.json).await,
        Commands::Rotate(ref args) => rotate(&config, args, cli.json).await,
        Commands::Yield(ref args) => estimate_yield(&config, args, cli.json).await,
        Commands::Check => check(&config).await,
        Commands::Init => Ok(()),
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

fn build_service(config: &Config) -> cropwise::Result<Option<Arc<dyn PredictionService>>> {
    if !config.service.enabled {
        tracing::info!("Prediction service disabled, running offline");
        return Ok(None);
    }
    let client = PredictionClient::new(config.service.clone())?;
    Ok(Some(Arc::new(client)))
}

fn print_json<T: serde::Serialize>(value: &T) -> cropwise::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn recommend(config: &Config, args: &RecommendArgs, json: bool) -> cropwise::Result<()> {
    let request = args.to_request()?;
    let resolver = match build_service(config)? {
        Some(service) => RecommendationResolver::new(service),
        None => RecommendationResolver::offline(),
    };

    let result = resolver.resolve(&request).await?;
    if json {
        print_json(&result)
    } else {
        print!("{}", report::recommendations(&result));
        Ok(())
    }
}

async fn rotate(config: &Config, args: &RotateArgs, json: bool) -> cropwise::Result<()> {
    let request = args.to_request()?;
    let service = if args.offline {
        None
    } else {
        build_service(config)?
    };
    let resolver = match service {
        Some(service) => RotationResolver::new(service),
        None => RotationResolver::offline(),
    };

    let plan = resolver.resolve(&request).await?;
    if json {
        print_json(&plan)
    } else {
        print!("{}", report::rotation(&plan));
        Ok(())
    }
}

async fn estimate_yield(config: &Config, args: &YieldArgs, json: bool) -> cropwise::Result<()> {
    let input = args.to_input();
    let result = YieldEstimator::new().estimate(&input)?;

    let reference = if args.remote_reference {
        let service = build_service(config)?.ok_or_else(|| {
            CropWiseError::Validation(
                "--remote-reference needs the prediction service enabled in config".into(),
            )
        })?;
        match remote_yield_reference(service.as_ref(), &input).await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Remote yield reference unavailable: {}", e);
                Some(None)
            }
        }
    } else {
        None
    };

    if json {
        print_json(&serde_json::json!({
            "estimate": result,
            "remote_reference": reference.flatten(),
        }))
    } else {
        print!("{}", report::yield_estimate(&result, reference));
        Ok(())
    }
}

async fn check(config: &Config) -> cropwise::Result<()> {
    config.service.validate()?;
    println!("Config OK");
    println!("  Service: {}", config.service.url);
    println!("  Timeout: {}s", config.service.timeout_secs);

    if !config.service.enabled {
        println!("  Mode:    offline (service disabled)");
        return Ok(());
    }

    let client = PredictionClient::new(config.service.clone())?;
    if client.test_connection().await? {
        println!("  Status:  reachable");
    } else {
        println!("  Status:  OFFLINE (offline tables will be used)");
    }
    Ok(())
}
