//! Biblioteca Imperial - command line client
//!
//! Logs in against the REST backend and runs loan and catalog workflows.

use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblioteca_imperial_client::{
    config::AppConfig,
    models::Work,
    policy::{permitted_actions, LoanRules},
    repository::{Credentials, LibraryBackend, Repository},
    services::Services,
    AppError, AppState,
};

#[derive(Parser)]
#[command(name = "biblioteca-imperial")]
#[command(about = "Biblioteca Imperial - loans and catalog", long_about = None)]
struct Cli {
    /// Account email
    #[arg(short, long, global = true, env = "BIBLIOTECA_EMAIL")]
    email: Option<String>,

    /// Account password
    #[arg(short, long, global = true, env = "BIBLIOTECA_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show open loans with their status and the summary counters
    Loans,

    /// Borrow any available copy of a work
    Borrow {
        /// Work ID (e.g. OBR-00001)
        work_id: String,
    },

    /// Renew a loan
    Renew {
        /// Loan ID
        loan_id: String,
    },

    /// Return a loan
    Return {
        /// Loan ID
        loan_id: String,
    },

    /// List the catalog
    Works,

    /// Search works by title
    Search {
        /// Part of the title
        title: String,
    },

    /// List users (admin area)
    Users,

    /// List authors (admin area)
    Authors,

    /// List categories (admin area)
    Categories,

    /// Show the access level and permitted actions
    Access,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config);

    let cli = Cli::parse();

    let (Some(email), Some(password)) = (cli.email, cli.password) else {
        anyhow::bail!("--email and --password are required (or BIBLIOTECA_EMAIL / BIBLIOTECA_PASSWORD)");
    };

    let repository = Repository::connect(
        &config.api,
        Some(Credentials {
            email: email.clone(),
            password: password.clone(),
        }),
    )?;
    let backend: Arc<dyn LibraryBackend> = Arc::new(repository);
    let services = Services::new(backend, LoanRules::from(&config.loans));

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    if let Err(e) = run(&state, cli.command, &email, &password).await {
        tracing::error!("{}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(e.code() as i32);
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblioteca_imperial_client={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(state: &AppState, command: Commands, email: &str, password: &str) -> Result<(), AppError> {
    let services = &state.services;
    let user = services.backend.login(email, password).await?;
    tracing::info!("Logged in as {} ({})", user.name, user.effective_access_level());

    let now = Utc::now();

    match command {
        Commands::Loans => {
            let dashboard = services.loans.dashboard(&user, now).await?;
            println!(
                "Ativos: {}  Atrasados: {}  Multas pendentes: R$ {}",
                dashboard.summary.active, dashboard.summary.overdue, dashboard.summary.unpaid_fines
            );
            for entry in &dashboard.entries {
                let c = &entry.classification;
                let days = match c.days_remaining {
                    Some(d) if d < 0 => format!("{} dia(s) de atraso", -d),
                    Some(0) => "vence hoje".to_string(),
                    Some(d) => format!("{} dia(s) restantes", d),
                    None => "data de devolução indefinida".to_string(),
                };
                println!(
                    "{}  {}  [{}]  {}  renovações: {}/{}{}",
                    entry.loan.id,
                    entry.loan.title.as_deref().unwrap_or("-"),
                    c.effective_status,
                    days,
                    entry.loan.renewal_count,
                    biblioteca_imperial_client::models::MAX_RENEWALS,
                    if c.is_renewable { "  (renovável)" } else { "" }
                );
            }
        }
        Commands::Borrow { work_id } => {
            let loan = services.loans.borrow(&user, &work_id, now).await?;
            println!(
                "Empréstimo {} realizado. Devolução prevista: {}",
                loan.id,
                loan.due_date.as_deref().unwrap_or("-")
            );
        }
        Commands::Renew { loan_id } => {
            let loan = services.loans.renew(&user, &loan_id, now).await?;
            println!(
                "Empréstimo {} renovado. Nova data: {}",
                loan.id,
                loan.due_date.as_deref().unwrap_or("-")
            );
        }
        Commands::Return { loan_id } => {
            let loan = services.loans.return_loan(&user, &loan_id).await?;
            println!("Empréstimo {} devolvido.", loan.id);
        }
        Commands::Works => print_works(&services.catalog.list_works().await?),
        Commands::Search { title } => print_works(&services.catalog.search_works(&title).await?),
        Commands::Users => {
            for u in services.admin.list_users(&user).await? {
                println!(
                    "{}  {} <{}>  {}{}",
                    u.id,
                    u.name,
                    u.email,
                    u.group_label(),
                    if u.active { "" } else { "  (inativo)" }
                );
            }
        }
        Commands::Authors => {
            for author in services.admin.list_authors(&user).await? {
                println!("{}  {}", author.id, author.name.as_deref().unwrap_or("-"));
            }
        }
        Commands::Categories => {
            for category in services.admin.list_categories(&user).await? {
                println!(
                    "{}  {}  nível {}",
                    category.id,
                    category.name.as_deref().unwrap_or("-"),
                    category.restriction_level.unwrap_or(1)
                );
            }
        }
        Commands::Access => {
            let level = user.effective_access_level();
            println!("{} <{}>", user.name, user.email);
            println!("{} ({})", level, user.group_label());
            for action in permitted_actions(level) {
                println!("  - {:?}", action);
            }
        }
    }

    Ok(())
}

fn print_works(works: &[Work]) {
    for work in works {
        println!(
            "{}  {}  {}",
            work.id,
            work.display_title(),
            work.author_names().join(", ")
        );
    }
}
