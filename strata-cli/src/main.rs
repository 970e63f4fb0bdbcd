//! Strata CLI - command-line front-end for the Strata community platform
//!
//! Stands in for the mobile UI layer: drives the session manager and the
//! authenticated API wrappers from the terminal.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use strata_client::{
    ApiClientConfig, CommunityClient, CreateCommunityRequest, DocumentClient, HttpAuthClient,
    QueryClient,
};
use strata_core::{
    init_logging, log_operation_error, log_operation_start, log_operation_success, StrataConfig,
    StrataError, StrataResult,
};
use strata_session::{FileCredentialStore, Route, SessionManager};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Client for the Strata community-management platform")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create an account in an existing community
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Invite code of the community to join
        #[arg(long)]
        community_code: String,
    },

    /// Log out and clear the stored token
    Logout,

    /// Show the current session
    Status,

    /// Ask the community assistant a question
    Ask {
        question: String,
    },

    /// Upload a community document (PDF)
    Upload {
        file: PathBuf,

        /// Document category (bylaws, guidelines, standards, ...)
        #[arg(long, default_value = "bylaws")]
        document_type: String,
    },

    /// Create a new community with an admin account
    CreateCommunity {
        #[arg(long)]
        name: String,

        #[arg(long)]
        max_households: u32,

        #[arg(long)]
        admin_name: String,

        #[arg(long)]
        admin_email: String,

        #[arg(long)]
        admin_password: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref());
    config.apply_env_overrides();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        e.log();
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> StrataConfig {
    match path {
        Some(path) => match StrataConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => StrataConfig::default(),
    }
}

async fn run(command: Commands, config: &StrataConfig) -> StrataResult<()> {
    let api_config = ApiClientConfig::from(&config.api);
    let store = Arc::new(FileCredentialStore::new(&config.storage.data_dir)?);
    let auth = Arc::new(HttpAuthClient::new(api_config.clone())?);
    let manager = SessionManager::new(store, auth);
    let mut routes = manager.subscribe_routes();

    match command {
        Commands::Login { email, password } => {
            log_operation_start!("login", email = %email);
            match manager.login(&email, &password).await {
                Ok(()) => log_operation_success!("login"),
                Err(e) => {
                    log_operation_error!("login", e);
                    return Err(e);
                }
            }

            let session = manager.snapshot().await;
            if let Some(identity) = session.identity {
                println!(
                    "Logged in as {} (community {})",
                    identity.email, identity.community_id
                );
            }
        }
        Commands::Signup {
            name,
            email,
            password,
            community_code,
        } => {
            manager
                .signup(&name, &email, &password, &community_code)
                .await?;

            let session = manager.snapshot().await;
            if let Some(identity) = session.identity {
                println!(
                    "Welcome, {}. You have joined community {}.",
                    name, identity.community_id
                );
            }
        }
        Commands::Logout => {
            manager.logout().await?;
            println!("Logged out.");
        }
        Commands::Status => {
            let restored = manager.restore_session().await?;
            if !restored {
                println!("Not signed in.");
            } else {
                let session = manager.snapshot().await;
                if let Some(identity) = session.identity {
                    println!("Signed in as {}", identity.email);
                    println!("  community: {}", identity.community_id);
                    println!("  admin:     {}", identity.is_admin);
                    println!("  expires:   {}", format_expiry(identity.expires_at));
                }
            }
        }
        Commands::Ask { question } => {
            let (token, community_code) = require_session(&manager).await?;
            let client = QueryClient::new(api_config.clone())?;
            let response = client.answer_query(&token, &question, &community_code).await?;
            println!("{}", response.answer);
        }
        Commands::Upload {
            file,
            document_type,
        } => {
            let (token, community_code) = require_session(&manager).await?;
            let bytes = std::fs::read(&file)?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| "document.pdf".to_string());

            let client = DocumentClient::new(api_config.clone())?;
            let uploaded = client
                .upload_document(&token, &community_code, &document_type, &file_name, bytes)
                .await?;
            println!("{}", uploaded.message);
        }
        Commands::CreateCommunity {
            name,
            max_households,
            admin_name,
            admin_email,
            admin_password,
        } => {
            let client = CommunityClient::new(api_config.clone())?;
            let created = client
                .create_community(&CreateCommunityRequest {
                    name,
                    max_households,
                    admin_name,
                    admin_email,
                    admin_password,
                })
                .await?;
            println!("{}", created.message);
            println!("Community code: {}", created.hoa_code);
        }
    }

    drain_routes(&mut routes);
    Ok(())
}

/// Restore the stored session and hand back the token and community code
async fn require_session(manager: &SessionManager) -> StrataResult<(String, String)> {
    if !manager.restore_session().await? {
        return Err(StrataError::authentication(
            "Not signed in. Run `strata login` first.",
            "cli",
        ));
    }

    let session = manager.snapshot().await;
    match (session.token, session.identity) {
        (Some(token), Some(identity)) => Ok((token, identity.community_id)),
        _ => Err(StrataError::authentication(
            "Session is not authenticated",
            "cli",
        )),
    }
}

/// A terminal has no screens to switch; log where the UI would navigate
fn drain_routes(routes: &mut tokio::sync::broadcast::Receiver<Route>) {
    while let Ok(route) = routes.try_recv() {
        debug!(?route, "UI would navigate");
    }
}

fn format_expiry(expires_at: i64) -> String {
    match chrono::DateTime::<chrono::Utc>::from_timestamp(expires_at, 0) {
        Some(when) => when.to_rfc3339(),
        None => expires_at.to_string(),
    }
}
