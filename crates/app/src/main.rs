use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use dotenv::dotenv;
use log::{info, warn};
use services::{
    AdminService, ApiConfig, AppServices, AuthService, AuthSession, CareerService,
    CatalogService, Clock, CourseService, QuizLoopService, RoadmapService, TutorService,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn session(&self) -> Arc<AuthSession> {
        self.services.session()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn roadmaps(&self) -> Arc<RoadmapService> {
        self.services.roadmaps()
    }

    fn tutor(&self) -> Arc<TutorService> {
        self.services.tutor()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn admin(&self) -> Arc<AdminService> {
        self.services.admin()
    }

    fn career(&self) -> Arc<CareerService> {
        self.services.career()
    }
}

struct Args {
    db_url: String,
    api: ApiConfig,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url http://localhost:5000/api");
    eprintln!("  --db sqlite://sphere.sqlite3");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  SPHERE_API_URL, SPHERE_API_TIMEOUT_SECS, SPHERE_DB_URL, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("SPHERE_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| "sqlite://sphere.sqlite3".into(), normalize_sqlite_url);
        let mut api = ApiConfig::from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    if !value.starts_with("http://") && !value.starts_with("https://") {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api = ApiConfig::new(value).with_timeout(api.timeout);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, api })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Credentials live in SQLite; the binary owns opening the file.
    prepare_sqlite_file(&args.db_url)?;
    info!("api {} (db {})", args.api.base_url, args.db_url);
    let services = AppServices::new_sqlite(&args.db_url, args.api, Clock::default_clock()).await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("LearnSphere")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();

    if let Err(err) = run().await {
        warn!("startup failed: {err}");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
