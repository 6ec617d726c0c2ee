use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{auth, config, dashboard, orders, products};

#[derive(Parser)]
#[command(name = "rom")]
#[command(about = "Restaurant order manager CLI", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> site -> local)
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and persist the session
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the persisted session
    Logout,

    /// Print the logged-in user
    Whoami,

    /// Menu management
    Products {
        #[command(subcommand)]
        cmd: products::ProductsCmd,
    },

    /// Order list, status changes and new orders
    Orders {
        #[command(subcommand)]
        cmd: orders::OrdersCmd,
    },

    /// Sales and order statistics
    Dashboard,

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Report config keys nothing reads
    ConfigCheck {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Exit non-zero when unused keys are found
        #[arg(long, default_value_t = false)]
        fail_on_unused: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConfigHash { paths } => config::hash(&paths),
        Commands::ConfigCheck {
            paths,
            fail_on_unused,
        } => config::check(&paths, fail_on_unused),
        Commands::Login { username, password } => {
            auth::login(&cli.config_paths, &username, &password).await
        }
        Commands::Register { username, password } => {
            auth::register(&cli.config_paths, &username, &password).await
        }
        Commands::Logout => auth::logout(&cli.config_paths),
        Commands::Whoami => auth::whoami(&cli.config_paths),
        Commands::Products { cmd } => products::run(&cli.config_paths, cmd).await,
        Commands::Orders { cmd } => orders::run(&cli.config_paths, cmd).await,
        Commands::Dashboard => dashboard::run(&cli.config_paths).await,
    }
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
