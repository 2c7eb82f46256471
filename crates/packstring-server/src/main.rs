//! Packstring web server
//!
//! Serves the MT Hunt & Fish Outfitters site: the public pages, the
//! contact form, the Stripe deposit webhook, and (when a password is
//! configured) the /admin back office.
//!
//! Usage:
//! ```bash
//! # With config file
//! packstring-server --config config.yaml
//!
//! # Or with environment variables (env vars override config)
//! ADMIN_PASSWORD=... STRIPE_SECRET_KEY=sk_live_... packstring-server
//!
//! # Local development with hot-reloading availability
//! packstring-server --dev
//! ```

mod config;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use packstring_availability::AvailabilityStore;
use packstring_db::Store;
use packstring_payments::{StripeClient, StripeConfig};
use packstring_site::{AppState, SiteConfig};

use config::ServerConfig;

#[derive(Parser)]
#[command(name = "packstring-server")]
#[command(about = "MT Hunt & Fish Outfitters web server")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, env = "PACKSTRING_CONFIG")]
    config: Option<PathBuf>,

    /// Dev mode: reload availability.yaml on change
    #[arg(long)]
    dev: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    config.merge_env();
    if cli.dev {
        config.dev = true;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(dev = config.dev, "starting packstring-server");

    let store = Store::open(Path::new(&config.database_path)).await?;
    info!(path = %config.database_path, "database ready");

    let availability = Arc::new(AvailabilityStore::new(
        config.availability_path.clone(),
        config.dev,
    ));
    info!(path = %config.availability_path, dev = config.dev, "availability store ready");

    let stripe = match &config.stripe.secret_key {
        Some(secret_key) => {
            let mut stripe_config = StripeConfig::new(secret_key.clone());
            if let Some(webhook_secret) = &config.stripe.webhook_secret {
                stripe_config = stripe_config.with_webhook_secret(webhook_secret.clone());
            } else {
                warn!("stripe configured without a webhook secret; webhook signatures will not be verified");
            }
            info!("stripe payments enabled");
            Some(Arc::new(StripeClient::new(stripe_config)))
        }
        None => {
            info!("no stripe key configured, deposit links disabled");
            None
        }
    };

    if config.admin_password.is_none() {
        warn!("no admin password configured, /admin is disabled");
    }

    let state = AppState::new(
        store,
        availability,
        stripe,
        SiteConfig {
            site_url: config.site_url.trim_end_matches('/').to_string(),
            admin_password: config.admin_password.clone(),
        },
    );
    let app = packstring_site::router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
