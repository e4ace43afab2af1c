use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use vf_client::HttpService;
use vf_spec::{PlotSpec, ValidationError, validate_spec};
use vf_sync::{
    FormController, PlotDims, SchemaService, ServiceError, ServiceWorker, SyncError,
    seed_from_param,
};

#[derive(Parser)]
#[command(name = "vf-cli")]
#[command(about = "Vizform CLI - plot form client for a Schema/Plot service", long_about = None)]
struct Cli {
    /// Base URL of the Schema/Plot service
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a spec against the service and print the merged spec and schema
    Schema {
        /// Spec JSON (defaults to the empty spec)
        #[arg(long)]
        spec: Option<String>,
    },
    /// Request rendered plot markup for a spec
    Plot {
        /// Spec JSON (defaults to the empty spec)
        #[arg(long)]
        spec: Option<String>,
        /// Plot height in pixels
        #[arg(long, default_value_t = 600)]
        height: u32,
        /// Plot width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fetch the dataset summary markup
    Head {
        /// Dataset name
        dataset: String,
    },
    /// Validate a spec against the schema the service declares for it
    Validate {
        /// Spec JSON
        #[arg(long)]
        spec: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

fn main() -> Result<(), CliError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let service = Arc::new(HttpService::new(&cli.url));

    match cli.command {
        Commands::Schema { spec } => cmd_schema(service, spec.as_deref()),
        Commands::Plot {
            spec,
            height,
            width,
            output,
        } => cmd_plot(service, spec.as_deref(), height, width, output.as_deref()),
        Commands::Head { dataset } => cmd_head(service, &dataset),
        Commands::Validate { spec } => cmd_validate(service, &spec),
    }
}

fn cmd_schema(service: Arc<HttpService>, spec: Option<&str>) -> Result<(), CliError> {
    let seed = seed_from_param(spec);
    let (mut controller, request) = FormController::mount(seed);

    let worker = ServiceWorker::new(service);
    worker.submit(request);
    let completion = worker
        .recv()
        .ok_or_else(|| CliError::Other("service worker hung up".to_owned()))?;

    match controller.handle_response(completion.generation, completion.outcome) {
        Some(reconciled) => {
            println!("✓ Reconciled against dataset: {}", reconciled.dataset);
            println!("{}", serde_json::to_string_pretty(controller.spec())?);
            println!("{}", serde_json::to_string_pretty(controller.schema())?);
            Ok(())
        }
        None => Err(CliError::Other(
            "schema round trip failed; see log output".to_owned(),
        )),
    }
}

fn cmd_plot(
    service: Arc<HttpService>,
    spec: Option<&str>,
    height: u32,
    width: u32,
    output: Option<&std::path::Path>,
) -> Result<(), CliError> {
    let seed = seed_from_param(spec);
    let dims = PlotDims {
        height,
        width,
        inline: None,
    };
    let markup = service.fetch_plot(&seed.spec, dims)?;

    match output {
        Some(path) => {
            std::fs::write(path, markup)?;
            println!("✓ Wrote plot markup to {}", path.display());
        }
        None => println!("{markup}"),
    }
    Ok(())
}

fn cmd_head(service: Arc<HttpService>, dataset: &str) -> Result<(), CliError> {
    println!("{}", service.fetch_head(dataset)?);
    Ok(())
}

fn cmd_validate(service: Arc<HttpService>, spec: &str) -> Result<(), CliError> {
    let parsed: PlotSpec = serde_json::from_str(spec)?;
    let response = service.fetch_schema(&parsed)?;
    validate_spec(&parsed, &response.schema)?;
    println!("✓ Spec conforms to the service schema");
    Ok(())
}
