mod serve;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use relgraph_core::{Config, Dashboard, DashboardError, DashboardRequest, GraphOutcome, Selection};

use serve::templates::{render_dashboard_page, PageMode, PageSettings};

#[derive(Parser)]
#[command(name = "relgraph")]
#[command(about = "Interactive relationship graph dashboard for CSV relationship tables", long_about = None)]
struct Cli {
    /// Config file (defaults to ./relgraph.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the dashboard as a standalone HTML file
    Render {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file
        #[arg(short, long, default_value = "relgraph.html")]
        output: PathBuf,
    },
    /// Serve the dashboard with live filter controls
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Do not open a browser
        #[arg(long)]
        no_open: bool,
    },
    /// Print nodes with their degree, size and color
    Inspect {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print a default config file
    Init,
}

#[derive(Args)]
struct FilterArgs {
    /// Keep only this tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Keep only this relation (repeatable)
    #[arg(long = "relation")]
    relations: Vec<String>,
}

impl FilterArgs {
    fn into_request(self) -> DashboardRequest {
        DashboardRequest {
            tags: Selection::new(self.tags),
            relations: Selection::new(self.relations),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn render(config: Config, request: DashboardRequest, output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let server = config.server.clone();
    let page = Dashboard::new(config).page(&request)?;

    if let GraphOutcome::NoData = page.outcome {
        eprintln!("Warning: {}", DashboardError::NoDataAfterFilter);
        return Ok(());
    }

    let settings = PageSettings {
        title: &server.title,
        frame_height: server.frame_height,
        mode: PageMode::Static,
    };
    let html = render_dashboard_page(&page, &settings);
    std::fs::write(&output, html).map_err(|e| DashboardError::io(&output, e))?;

    println!("Wrote {}", output.display());
    Ok(())
}

fn inspect(config: Config, request: DashboardRequest) -> Result<(), Box<dyn std::error::Error>> {
    let model = match Dashboard::new(config).model(&request) {
        Ok(model) => model,
        Err(e) if e.is_warning() => {
            eprintln!("Warning: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let width = model.nodes.iter().map(|n| n.id.len()).max().unwrap_or(0).max(4);
    println!("{:<width$}  {:>6}  {:>6}  COLOR", "NODE", "DEGREE", "SIZE");
    for node in &model.nodes {
        println!(
            "{:<width$}  {:>6}  {:>6.1}  {}",
            node.id, node.degree, node.size, node.color
        );
    }
    println!("\n{} nodes, {} edges", model.node_count(), model.edge_count());
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Init => {
            print!("{}", Config::default_config_string());
            Ok(())
        }
        Commands::Render { filter, output } => {
            let config = load_config(cli.config.as_ref())?;
            render(config, filter.into_request(), output)
        }
        Commands::Inspect { filter } => {
            let config = load_config(cli.config.as_ref())?;
            inspect(config, filter.into_request())
        }
        Commands::Serve { port, no_open } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(port) = port {
                config.server.port = port;
            }
            if no_open {
                config.server.open_browser = false;
            }
            serve::start_server(config).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
