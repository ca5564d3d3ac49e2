use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use loglens::api;
use loglens::models::AppConfig;
use loglens::server;
use loglens::services::{codec, ImageLogTransformer, DataUriCodec};

#[derive(Parser)]
#[command(name = "loglens")]
#[command(about = "LogLens - log intensity transform for dashboard image previews")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply the log transform to an image file (PNG, JPEG, ...)
    Transform {
        /// Input image file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (PNG when transformed)
        #[arg(short, long)]
        output: PathBuf,

        /// Copy the image through unchanged (toggle off)
        #[arg(long)]
        no_log: bool,
    },
    /// Print an image file as a data URI
    Encode {
        /// Input image file path
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LogLens API",
        description = "Log intensity transform for dashboard image previews",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_transform),
    components(schemas(api::TransformRequest, api::TransformResponse)),
    tags(
        (name = "Transform", description = "Image intensity transforms")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Transform {
            input,
            output,
            no_log,
        }) => run_transform_command(&input, &output, !no_log).await,
        Some(Commands::Encode { input }) => run_encode_command(&input),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loglens=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Transform an image file directly (no server needed)
async fn run_transform_command(
    input: &Path,
    output: &Path,
    toggle: bool,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = AppConfig::from_env();
    let bytes = std::fs::read(input)?;
    let reference = codec::file_reference(&bytes)?;

    let transformer = ImageLogTransformer::new(Arc::new(DataUriCodec::from_config(&config)));
    // Previous and current are the same image, so the toggle alone decides
    let result = transformer
        .transform(toggle, Some(&reference), Some(reference.clone()))
        .await?
        .into_reference()
        .ok_or_else(|| anyhow::anyhow!("No image produced"))?;

    let out_bytes = codec::reference_bytes(&result)?;
    std::fs::write(output, &out_bytes)?;
    println!(
        "{} {} ({} bytes)",
        if toggle { "Transformed" } else { "Copied" },
        output.display(),
        out_bytes.len()
    );

    Ok(())
}

/// Print an image file as a data URI
fn run_encode_command(input: &Path) -> anyhow::Result<()> {
    init_cli_tracing();

    let bytes = std::fs::read(input)?;
    let reference = codec::file_reference(&bytes)?;
    println!("{}", reference.as_str());

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("LogLens v{VERSION}");
    println!("Log intensity transform for dashboard image previews\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    println!("\nCommands:");
    println!("  loglens serve      Start the HTTP server");
    println!("  loglens transform  Apply the log transform to an image file");
    println!("  loglens encode     Print an image file as a data URI");
    println!("\nRun 'loglens --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loglens=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    tracing::info!(
        max_reference_bytes = config.max_reference_bytes,
        max_pixels = config.max_pixels,
        "Configuration loaded"
    );

    // Create application state using shared server module
    let state = server::create_app_state(config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "LogLens server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
