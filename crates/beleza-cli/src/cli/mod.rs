//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use beleza_core::config::Config;
use beleza_core::http::ApiClient;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "beleza")]
#[command(version)]
#[command(about = "Salon booking client CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Store (tenant) to scope requests to (overrides the config default)
    #[arg(long, global = true, value_name = "ID")]
    store: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in to the booking platform
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long, env = "BELEZA_PASSWORD")]
        password: String,
    },

    /// Sign out (clear the local session)
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage appointments
    Appointments {
        #[command(subcommand)]
        command: AppointmentCommands,
    },

    /// Browse the service catalog
    Services {
        #[command(subcommand)]
        command: ServiceCommands,
    },

    /// Browse employees
    Employees {
        #[command(subcommand)]
        command: EmployeeCommands,
    },

    /// Loyalty points
    Points {
        #[command(subcommand)]
        command: PointsCommands,
    },

    /// Rate an employee
    Rate {
        /// Employee ID
        #[arg(value_name = "EMPLOYEE_ID")]
        employee: String,

        /// Score in stars (1-5)
        #[arg(value_name = "SCORE")]
        score: u8,

        /// Optional comment
        #[arg(long)]
        comment: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum AppointmentCommands {
    /// List appointments
    List {
        /// Only upcoming appointments
        #[arg(long)]
        upcoming: bool,

        /// Only appointments with this employee
        #[arg(long, value_name = "EMPLOYEE_ID")]
        employee: Option<String>,
    },
    /// Book an appointment
    Book {
        /// Employee ID
        #[arg(long, value_name = "EMPLOYEE_ID")]
        employee: String,

        /// Service ID
        #[arg(long, value_name = "SERVICE_ID")]
        service: String,

        /// Start time (RFC 3339, e.g. 2026-08-10T14:00:00Z)
        #[arg(long, value_name = "WHEN")]
        at: String,

        /// Optional notes for the stylist
        #[arg(long)]
        notes: Option<String>,
    },
    /// Cancel an appointment
    Cancel {
        /// The ID of the appointment to cancel
        #[arg(value_name = "APPOINTMENT_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ServiceCommands {
    /// List services
    List,
}

#[derive(clap::Subcommand)]
enum EmployeeCommands {
    /// List employees, best-rated first
    List {
        /// Include deactivated employees
        #[arg(long)]
        all: bool,
    },
}

#[derive(clap::Subcommand)]
enum PointsCommands {
    /// Show the current balance
    Balance,
    /// Show the earning history
    History,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Persist a default store (tenant) id
    SetStore {
        /// Store identifier
        #[arg(value_name = "ID")]
        id: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("BELEZA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the API client, wiring the sign-out alert into the transport layer.
fn build_client(mut config: Config, store_override: Option<String>) -> Result<ApiClient> {
    if let Some(store) = store_override {
        config.store_id = Some(store);
    }

    ApiClient::builder(config)
        .sign_out_handler(Arc::new(|| {
            eprintln!("Your session has expired. Please sign in again with 'beleza login'.");
        }))
        .build()
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    // Config commands don't need a client
    if let Commands::Config { command } = &cli.command {
        return match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetStore { id } => commands::config::set_store(id),
        };
    }

    let client = build_client(config, cli.store)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&client, &email, &password).await,
        Commands::Logout => commands::auth::logout(&client).await,
        Commands::Whoami => commands::auth::whoami(&client).await,

        Commands::Appointments { command } => match command {
            AppointmentCommands::List { upcoming, employee } => {
                commands::appointments::list(&client, upcoming, employee.as_deref()).await
            }
            AppointmentCommands::Book {
                employee,
                service,
                at,
                notes,
            } => commands::appointments::book(&client, &employee, &service, &at, notes).await,
            AppointmentCommands::Cancel { id } => commands::appointments::cancel(&client, &id).await,
        },

        Commands::Services { command } => match command {
            ServiceCommands::List => commands::services::list(&client).await,
        },

        Commands::Employees { command } => match command {
            EmployeeCommands::List { all } => commands::employees::list(&client, all).await,
        },

        Commands::Points { command } => match command {
            PointsCommands::Balance => commands::points::balance(&client).await,
            PointsCommands::History => commands::points::history(&client).await,
        },

        Commands::Rate {
            employee,
            score,
            comment,
        } => commands::ratings::rate(&client, &employee, score, comment.as_deref()).await,

        Commands::Config { .. } => unreachable!("handled above"),
    }
}
