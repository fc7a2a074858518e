use badge_reader::adapters::console::{stop_on_ctrl_c, CliConsole};
use badge_reader::adapters::feedback::ConsoleFeedback;
use badge_reader::adapters::http::BadgeServerClient;
use badge_reader::adapters::serial::{list_reader_ports, SerialOpener};
use badge_reader::domain::model::OperatorAction;
use badge_reader::utils::error::ErrorSeverity;
use badge_reader::utils::logger::{self, LogFormat};
use badge_reader::{BadgeError, BadgeServer, CliConfig, JsonLocationStore, PollLoop, Session};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    let format = if config.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Console
    };
    logger::init(format, config.verbose);
    tracing::info!("Starting badge-reader {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: CliConfig) -> Result<(), BadgeError> {
    if config.list_ports {
        let ports = list_reader_ports()?;
        for port in &ports {
            println!("{}", port);
        }
        return Ok(());
    }

    let ports = list_reader_ports().unwrap_or_else(|e| {
        tracing::warn!("Cannot enumerate serial ports: {}", e);
        Vec::new()
    });

    let settings = config.resolve_settings()?;
    let client = BadgeServerClient::new(
        &settings.server.base_url,
        &settings.server.api_key,
        settings.request_timeout(),
    )?;

    if config.list_locations {
        let directory = client.try_fetch_locations().await?;
        for tag in directory.tags() {
            println!("{}\t{}", tag, directory.name(tag).unwrap_or_default());
        }
        return Ok(());
    }

    let store = JsonLocationStore::open(config.location_file(&settings))?;
    let session = Session::new(store)?;
    let poll_loop = PollLoop::new(client.clone(), Box::new(SerialOpener));
    let mut server = BadgeServer::new(session, poll_loop, ConsoleFeedback::default());

    server.configure(&client, &ports).await;
    if let Some(port) = &config.port {
        server.handle(OperatorAction::SelectPort(port.clone()))?;
    }
    if let Some(tag) = &config.location {
        server.handle(OperatorAction::SelectLocation(tag.clone()))?;
    }
    server.handle(OperatorAction::Start)?;

    let (mut console, tx) = CliConsole::channel();
    stop_on_ctrl_c(tx);
    server.run(&mut console).await
}
