use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use showcase::feed::HttpTransport;
use showcase::web::WebServer;
use showcase::Config;

#[derive(Parser)]
#[command(
    name = "showcase",
    about = "Storefront product showcase: fetches the product feed and renders the landing page",
    version
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the landing page over HTTP (default).
    Serve,

    /// Run the pipeline once and print the page to stdout.
    Render {
        /// Print only the product container content.
        #[arg(long)]
        fragment: bool,
    },
}

fn load_config(path: &str) -> Config {
    match Config::load_with_env(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = load_config(&cli.config);

    if let Err(e) = showcase::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        showcase::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config).await,
        Commands::Render { fragment } => render(&config, fragment).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: &Config) -> showcase::Result<()> {
    info!("Showcase for {}", config.display.storefront_url);
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );
    WebServer::new(config)?.run().await
}

async fn render(config: &Config, fragment: bool) -> showcase::Result<()> {
    let timeout = config.feed.request_timeout_secs.map(Duration::from_secs);
    let transport = Arc::new(HttpTransport::with_timeout(timeout)?);

    let page = showcase::render_page(config, transport).await?;
    info!(
        "Rendered {} product(s) from {:?}",
        page.summary.cards, page.summary.origin
    );

    if fragment {
        println!("{}", page.fragment);
    } else {
        println!("{}", page.html);
    }
    Ok(())
}
