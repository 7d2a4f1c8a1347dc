//! # admarket
//!
//! Boots the marketplace on in-memory adapters and answers one query per
//! invocation as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use auth_adapters::{Argon2OtpHasher, LogOtpSender, OsRngCodeGenerator, OutboxOtpSender};
use chrono::{Duration, Utc};
use clap::{Args, Parser, Subcommand};
use configs::{LogSettings, Settings};
use domains::{CategoryFilter, GeoPoint, OtpSender, Selection, User};
use secrecy::ExposeSecret;
use serde::Serialize;
use services::{
    AccountService, AdService, AnalyticsService, BrowseEvent, BrowseSession, LoginOutcome,
    OtpPolicy, OtpPorts,
};
use storage_adapters::{InMemoryStore, SeedData};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "admarket")]
#[command(about = "Browse and moderate the in-memory ad marketplace")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Seed dataset (JSON) to boot from; overrides seed.dataset_path
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the ads a viewer would see with the given filters
    Browse(BrowseArgs),

    /// Show the choices for the cascading location dropdowns
    Locations {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        state: Option<String>,
    },

    /// Moderation queue (owner login)
    Pending,

    /// Platform statistics (owner login)
    Analytics,

    /// User directory (owner login)
    Users,

    /// Issue a login code to a phone through the log sender
    Otp {
        phone: String,
    },
}

#[derive(Args)]
struct BrowseArgs {
    /// Category name or ALL
    #[arg(short, long, default_value = "ALL")]
    category: String,

    /// Case-insensitive title search
    #[arg(short, long, default_value = "")]
    query: String,

    #[arg(long)]
    country: Option<String>,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    district: Option<String>,

    #[arg(long, default_value = "")]
    reward_min: String,

    #[arg(long, default_value = "")]
    reward_max: String,

    #[arg(long, default_value = "")]
    duration_min: String,

    #[arg(long, default_value = "")]
    duration_max: String,

    /// Only ads within 50 km of LAT,LNG
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    near: Option<GeoPoint>,
}

fn parse_point(raw: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| "expected LAT,LNG".to_string())?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("bad latitude '{lat}'"))?;
    let lng: f64 = lng.trim().parse().map_err(|_| format!("bad longitude '{lng}'"))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err("coordinates out of range".to_string());
    }
    Ok(GeoPoint::new(lat, lng))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log, cli.verbose);

    let dataset = cli.dataset.or_else(|| settings.seed.dataset_path.clone());
    let seed = match &dataset {
        Some(path) => SeedData::load(path).await?,
        None => SeedData::demo(),
    };
    let store = InMemoryStore::seeded(seed);
    tracing::info!(app = %settings.app.name, env = %settings.app.environment, "marketplace ready");

    match cli.command {
        Commands::Browse(args) => {
            let ads = AdService::new(store.ads.clone(), store.users.clone());
            let session = browse(BrowseSession::new(ads.approved().await?), args)?;
            print_json(&session.visible())
        }
        Commands::Locations { country, state } => {
            let ads = AdService::new(store.ads.clone(), store.users.clone());
            let mut session = BrowseSession::new(ads.approved().await?);
            if let Some(country) = country {
                session.dispatch(BrowseEvent::SetCountry(Selection::parse(&country)));
            }
            if let Some(state) = state {
                session.dispatch(BrowseEvent::SetState(Selection::parse(&state)));
            }
            print_json(&session.location_options())
        }
        Commands::Pending => {
            let owner = owner_login(&store, &settings).await?;
            let ads = AdService::new(store.ads.clone(), store.users.clone());
            print_json(&ads.pending(owner.id).await?)
        }
        Commands::Analytics => {
            let owner = owner_login(&store, &settings).await?;
            let analytics =
                AnalyticsService::new(store.ads.clone(), store.users.clone(), store.ledger.clone());
            print_json(&analytics.platform_stats(owner.id).await?)
        }
        Commands::Users => {
            let owner = owner_login(&store, &settings).await?;
            let accounts = accounts(&store, &settings, Arc::new(OutboxOtpSender::new()));
            print_json(&accounts.list_users(owner.id).await?)
        }
        Commands::Otp { phone } => {
            let sender = Arc::new(LogOtpSender::new(settings.otp.echo_codes));
            let accounts = accounts(&store, &settings, sender);
            let expires_at = accounts.request_otp(&phone, Utc::now()).await?;
            print_json(&serde_json::json!({ "expires_at": expires_at }))
        }
    }
}

fn browse(mut session: BrowseSession, args: BrowseArgs) -> anyhow::Result<BrowseSession> {
    let category = CategoryFilter::parse(&args.category)?;
    let mut events = vec![
        BrowseEvent::SelectCategory(category),
        BrowseEvent::SetQuery(args.query),
    ];
    // Parent levels first: each one resets the levels below it.
    if let Some(country) = args.country {
        events.push(BrowseEvent::SetCountry(Selection::parse(&country)));
    }
    if let Some(state) = args.state {
        events.push(BrowseEvent::SetState(Selection::parse(&state)));
    }
    if let Some(district) = args.district {
        events.push(BrowseEvent::SetDistrict(Selection::parse(&district)));
    }
    events.extend([
        BrowseEvent::SetRewardMin(args.reward_min),
        BrowseEvent::SetRewardMax(args.reward_max),
        BrowseEvent::SetDurationMin(args.duration_min),
        BrowseEvent::SetDurationMax(args.duration_max),
        BrowseEvent::SetUserLocation(args.near),
    ]);

    for event in events {
        session.dispatch(event);
    }
    Ok(session)
}

fn accounts(
    store: &InMemoryStore,
    settings: &Settings,
    sender: Arc<dyn OtpSender>,
) -> AccountService {
    AccountService::new(
        store.users.clone(),
        OtpPorts {
            store: store.otp.clone(),
            hasher: Arc::new(Argon2OtpHasher::new()),
            generator: Arc::new(OsRngCodeGenerator::new(settings.otp.code_digits)),
            sender,
        },
        OtpPolicy {
            ttl: Duration::seconds(settings.otp.ttl_secs),
        },
    )
}

/// Runs the phone + OTP flow for the configured owner phone, reading the
/// code back from the outbox in place of an SMS.
async fn owner_login(store: &InMemoryStore, settings: &Settings) -> anyhow::Result<User> {
    let outbox = Arc::new(OutboxOtpSender::new());
    let accounts = accounts(store, settings, outbox.clone());
    let phone = settings.auth.owner_phone.expose_secret();

    let now = Utc::now();
    accounts.request_otp(phone, now).await?;
    let code = outbox
        .last_code(&services::validation::normalize_phone(phone))
        .context("no code was delivered")?;

    match accounts.verify_otp(phone, &code, now).await? {
        LoginOutcome::Existing(user) if user.is_owner() => Ok(user),
        LoginOutcome::Existing(user) => bail!("{} is not an app owner", user.name),
        LoginOutcome::NewUser { .. } => bail!("no account is registered for the owner phone"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_tracing(log: &LogSettings, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { log.level.as_str() })
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
