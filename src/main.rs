//! AirAware CLI
//!
//! Terminal front end for the AirAware dashboard:
//! - Sign up / log in / log out
//! - Show the AQI dashboard for a city
//! - Chat with the air-quality assistant
//! - Send feedback and ratings
//! - Download the PDF report

use airaware::config::{generate_default_config, Config, LoggingConfig};
use airaware::dashboard::{load_directory, DashboardView};
use airaware::{
    App, DashboardBoot, FileSessionStore, HttpBackend, Lang, RatingSelection,
    TerminalRenderer, View,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "airaware")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Air-quality dashboard client")]
#[command(long_about = "AirAware shows current and forecast AQI for tracked cities,\nwith health advice, and lets you send feedback to the AirAware team.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print dashboard data as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Signup {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Log in to an existing account
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the startup view (auth or dashboard)
    Status,

    /// Show the dashboard for a city (default: first tracked city)
    Dashboard {
        city: Option<String>,
    },

    /// List tracked cities
    Cities,

    /// Ask the air-quality assistant
    Chat {
        message: String,
        /// Reply language (en, te, hi)
        #[arg(short, long, default_value = "en")]
        lang: Lang,
    },

    /// Send feedback
    Feedback {
        text: String,
    },

    /// Rate the app (1-5 stars)
    Rate {
        stars: u8,
    },

    /// Download the AQI report for a city
    Report {
        city: Option<String>,
        /// Output file (default: print the report link)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.backend_url {
        config.backend.url = url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!(backend = %config.backend.url, "AirAware CLI v{}", env!("CARGO_PKG_VERSION"));

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_ref());
    }

    let backend = Arc::new(HttpBackend::new(&config.backend).context("Failed to create HTTP client")?);
    let store = Arc::new(FileSessionStore::new(&config.session.path));
    let app = App::new(backend, store).with_fallback_cities(config.dashboard.fallback_cities.clone());

    match cli.command {
        Commands::Signup { email, password } => {
            let view = app.signup(&email, &password).await.unwrap_or_else(|e| fail(e));
            println!("Signed up.");
            print_view(&app, view, cli.json).await?;
        }

        Commands::Login { email, password } => {
            let view = app.login(&email, &password).await.unwrap_or_else(|e| fail(e));
            println!("Logged in.");
            print_view(&app, view, cli.json).await?;
        }

        Commands::Logout => {
            let notice = app.logout().unwrap_or_else(|e| fail(e));
            println!("{}", notice);
        }

        Commands::Status => {
            let view = app.bootstrap().await?;
            print_view(&app, view, cli.json).await?;
        }

        Commands::Dashboard { city } => {
            require_session(&app)?;
            match city {
                Some(city) => {
                    if let Err(e) = app.search_city(&city).await {
                        fail(e);
                    }
                    print_dashboard(&app.dashboard().view().await, cli.json)?;
                }
                None => {
                    let view = app.bootstrap().await?;
                    print_view(&app, view, cli.json).await?;
                }
            }
        }

        Commands::Cities => {
            let directory =
                load_directory(app.backend(), &config.dashboard.fallback_cities).await;
            for (slot, city) in directory.cities().iter().enumerate() {
                println!("{}. {}", slot + 1, city);
            }
            if !directory.is_from_backend() {
                println!();
                println!("(default cities - backend listing unavailable or incomplete)");
            }
        }

        Commands::Chat { message, lang } => match app.chat(&message, lang).await {
            Ok(Some(reply)) => println!("{}", reply),
            Ok(None) => {}
            Err(e) => fail(e),
        },

        Commands::Feedback { text } => {
            let message = app.send_feedback(&text).await.unwrap_or_else(|e| fail(e));
            println!("{}", message);
        }

        Commands::Rate { stars } => {
            let mut selection = RatingSelection::new();
            if let Err(e) = selection.select(stars) {
                fail(e);
            }
            let message = app
                .submit_rating(&mut selection)
                .await
                .unwrap_or_else(|e| fail(e));
            println!("{}", message);
        }

        Commands::Report { city, output } => {
            let city = match city {
                Some(city) => city,
                None => load_directory(app.backend(), &config.dashboard.fallback_cities)
                    .await
                    .first()
                    .map(str::to_string)
                    .unwrap_or_default(),
            };
            if let Err(e) = app.search_city(&city).await {
                fail(e);
            }

            match output {
                Some(path) => {
                    let (query, bytes) = app.download_report().await.unwrap_or_else(|e| fail(e));
                    if let Some(parent) = path.parent() {
                        if !parent.as_os_str().is_empty() {
                            std::fs::create_dir_all(parent)?;
                        }
                    }
                    std::fs::write(&path, &bytes)?;
                    println!("Report for {} written to {:?}", query.city, path);
                }
                None => {
                    let link = app.report_link().await.unwrap_or_else(|e| fail(e));
                    println!("{}", link.url);
                }
            }
        }

        Commands::Config { .. } => unreachable!("handled before backend setup"),
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("airaware={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

fn require_session(app: &App) -> anyhow::Result<()> {
    if !app.session().is_logged_in()? {
        eprintln!("Not logged in.");
        eprintln!();
        eprintln!("Log in first with:");
        eprintln!("  airaware login --email you@example.com --password ...");
        std::process::exit(1);
    }
    Ok(())
}

async fn print_view(app: &App, view: View, json: bool) -> anyhow::Result<()> {
    match view {
        View::Auth => {
            println!("Not logged in. Use `airaware login` or `airaware signup`.");
        }
        View::Dashboard(DashboardBoot { directory, initial }) => {
            if !json {
                println!("Cities: {}", directory.cities().join(", "));
                println!();
            }
            if let Some(Err(e)) = initial {
                eprintln!("{}", e);
            }
            print_dashboard(&app.dashboard().view().await, json)?;
        }
    }
    Ok(())
}

fn print_dashboard(view: &DashboardView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("No dashboard data yet.");
        return Ok(());
    }

    let mut renderer = TerminalRenderer::new();
    view.replay(&mut renderer);
    print!("{}", renderer.into_string());
    Ok(())
}

fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("{}", err);
    std::process::exit(1)
}
