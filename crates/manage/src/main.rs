use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pasos_manage::cli::{Cli, Command};
use pasos_manage::commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "pasos_manage=info".into()),
    );
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Digest(args) => commands::digest::run(args).await,
        Command::SyncInstagram(args) => commands::instagram::run(args).await,
        Command::OptimizeImages(args) => commands::images::run(args),
    }
}
