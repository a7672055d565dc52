use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use parkhouse::transport::{ServerConfig, serve};
use parkhouse::{GarageLayout, ParkingManager, ParkingService, ReservationPolicy};

mod menu;

#[derive(Debug, Parser)]
#[command(name = "parkhouse", version, about = "City parking spot allocator")]
struct Cli {
    /// Garage layout as JSON (zone name -> floors, spots_per_floor, spot_kinds, reserved_spots).
    /// Uses the built-in North/South garage when omitted.
    #[arg(long, global = true, env = "PARKHOUSE_LAYOUT")]
    layout: Option<PathBuf>,

    /// Keep reserved spots away from ordinary vehicles.
    #[arg(long, global = true)]
    isolate_reserved: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive console menu (default)
    Menu,
    /// Serve the parking commands over HTTP
    Serve {
        #[arg(long, env = "PARKHOUSE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PARKHOUSE_PORT", default_value_t = 5000)]
        port: u16,
    },
}

/// Initialize tracing with PARKHOUSE_LOG and LOG_FORMAT support.
///
/// Logs go to stderr so the menu on stdout stays readable.
fn init_tracing() {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match std::env::var("PARKHOUSE_LOG").as_deref() {
            Ok("debug") => "debug",
            Ok("warn") | Ok("warning") => "warn",
            Ok("error") => "error",
            _ => "info",
        };
        EnvFilter::new(format!("parkhouse={level},parkhouse_cli={level}"))
    };

    let use_json = std::env::var("LOG_FORMAT").as_deref() == Ok("json");

    if use_json {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr));
        let _ = subscriber.try_init();
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr));
        let _ = subscriber.try_init();
    }
}

fn load_layout(path: Option<&PathBuf>) -> anyhow::Result<GarageLayout> {
    match path {
        Some(path) => GarageLayout::from_path(path)
            .with_context(|| format!("loading layout from {}", path.display())),
        None => Ok(GarageLayout::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    info!("parkhouse {}", parkhouse::PARKHOUSE_VERSION);

    let layout = load_layout(cli.layout.as_ref())?;
    let policy = if cli.isolate_reserved {
        ReservationPolicy::Isolated
    } else {
        ReservationPolicy::Shared
    };
    let manager = ParkingManager::new(&layout)?.with_policy(policy);
    let service = Arc::new(ParkingService::new(manager));

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            menu::run(&service, stdin.lock(), stdout.lock())?;
        }
        Command::Serve { host, port } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve(ServerConfig { host, port }, service))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_menu() {
        let cli = Cli::try_parse_from(["parkhouse"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.isolate_reserved);
    }

    #[test]
    fn cli_parses_serve_options() {
        let cli = Cli::try_parse_from([
            "parkhouse",
            "--isolate-reserved",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
        ])
        .unwrap();

        assert!(cli.isolate_reserved);
        match cli.command {
            Some(Command::Serve { host, port }) => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8080);
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn missing_layout_file_is_reported() {
        let path = PathBuf::from("/nonexistent/garage.json");
        let err = load_layout(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("garage.json"));
    }
}
