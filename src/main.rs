use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use qriva::config::AppConfig;
use qriva::domain::payload::{classify, BadgeType, StatusCode};
use qriva::generator::media_store::{suggested_filename, DirectoryMediaStore, MediaStore};
use qriva::generator::render::render_png;
use qriva::generator::{compose_payload, AttendeeStatus, GeneratorInput};
use qriva::service::checkin_service::CheckInService;
use qriva::service::scanner::{PermissionState, ScanState, ScannerSession, TracingFeedback};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qriva")]
#[command(about = "QR badge check-in scanner and QR code generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Check-in endpoint (overrides CHECKIN_ENDPOINT_URL)
    #[arg(long, global = true)]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a decoded QR string without contacting the gateway
    Classify { raw: String },

    /// Run one scan cycle for a decoded QR string
    CheckIn { raw: String },

    /// Read decoded QR strings from stdin, one per line
    Scan,

    /// Compose a QR payload and optionally save it as a PNG
    Generate {
        #[arg(short, long, value_enum, default_value = "text")]
        kind: Kind,

        #[arg(short, long)]
        data: String,

        /// Attendee status for `badge` payloads
        #[arg(long, value_enum, default_value = "regular")]
        status: Status,

        /// Badge type for `code` payloads (VIP, GENAD, VISITORS, REGULAR)
        #[arg(long, default_value = "REGULAR")]
        badge_type: String,

        /// Status letters for `code` payloads, e.g. UP or S
        #[arg(long)]
        status_code: Option<String>,

        /// Render and store the QR image (QR_OUTPUT_DIR)
        #[arg(long)]
        save: bool,

        #[arg(long)]
        output_dir: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Text,
    Url,
    Badge,
    Code,
}

#[derive(Clone, Copy, ValueEnum)]
enum Status {
    Regular,
    Vip,
    Staff,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut cfg = AppConfig::from_env();
    if let Some(endpoint) = cli.endpoint {
        cfg.checkin_endpoint_url = endpoint;
    }

    match cli.command {
        Commands::Classify { raw } => {
            println!("{}", serde_json::to_string_pretty(&classify(&raw))?);
        }
        Commands::CheckIn { raw } => {
            let mut session = session(&cfg);
            if let Some(state) = session.handle_decode(&raw).await {
                print_state(state)?;
            }
        }
        Commands::Scan => run_scan(&cfg).await?,
        Commands::Generate {
            kind,
            data,
            status,
            badge_type,
            status_code,
            save,
            output_dir,
        } => {
            let input = match kind {
                Kind::Text => GeneratorInput::Text(data),
                Kind::Url => GeneratorInput::Url(data),
                Kind::Badge => GeneratorInput::Badge {
                    id: data,
                    status: match status {
                        Status::Regular => AttendeeStatus::Regular,
                        Status::Vip => AttendeeStatus::Vip,
                        Status::Staff => AttendeeStatus::Staff,
                    },
                },
                Kind::Code => {
                    let Some(badge_type) = BadgeType::from_name(&badge_type) else {
                        bail!("unknown badge type {badge_type}");
                    };
                    GeneratorInput::BadgeCode {
                        badge_type,
                        status_code: status_code.map(|c| StatusCode::from_code(&c.to_uppercase())),
                        id: data,
                    }
                }
            };

            let now = chrono::Utc::now();
            let payload = compose_payload(&input, now)?;
            println!("{payload}");

            if save {
                let store = DirectoryMediaStore::new(output_dir.unwrap_or(cfg.qr_output_dir));
                let path = store.save(&render_png(&payload)?, &suggested_filename(now))?;
                println!("saved {}", path.display());
            }
        }
    }

    Ok(())
}

fn session(cfg: &AppConfig) -> ScannerSession {
    let service = CheckInService::new(qriva::build_gateway(cfg));
    let mut session = ScannerSession::new(service, Arc::new(TracingFeedback));
    session.set_permission(PermissionState::Granted);
    session
}

async fn run_scan(cfg: &AppConfig) -> Result<()> {
    let mut session = session(cfg);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    tracing::info!("scanner ready, reading decoded codes from stdin");

    while let Some(line) = lines.next_line().await? {
        let raw = line.trim_end_matches(['\r', '\n']);
        if raw.trim().is_empty() {
            continue;
        }
        // Reading the next code is the user's dismissal of the previous notice.
        session.dismiss();
        if let Some(state) = session.handle_decode(raw).await {
            print_state(state)?;
        }
    }

    Ok(())
}

fn print_state(state: &ScanState) -> Result<()> {
    println!("{}", serde_json::to_string(state)?);
    Ok(())
}
