use color_eyre::{eyre::eyre, Result};
use dpad::controller::{ChannelObserver, DirectionEvent, PadHandle};
use dpad::input::InputEvent;
use dpad::PadSettings;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

// Scripted driver for the pad: one input event per stdin line, e.g.
//
//   touch start up
//   wait 250
//   touch end up
//   quit
#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let settings = PadSettings::load_default().await?;
    info!("Initializing direction pad");

    let (observer, events) = ChannelObserver::channel(settings.event_buffer.max(1));
    let mut pad = PadHandle::spawn(Some(settings), Some(Box::new(observer)))
        .map_err(|e| eyre!("Failed to spawn direction pad: {}", e))?;

    let printer = tokio::spawn(print_events(events));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line == "quit" {
            break;
        }

        if let Some(millis) = line.strip_prefix("wait ") {
            match millis.trim().parse::<u64>() {
                Ok(millis) => tokio::time::sleep(tokio::time::Duration::from_millis(millis)).await,
                Err(e) => warn!("Invalid wait '{}': {}", millis, e),
            }
            continue;
        }

        match line.parse::<InputEvent>() {
            Ok(event) => {
                debug!("Input: {:?}", event);
                pad.send_input(event)
                    .await
                    .map_err(|e| eyre!("Failed to deliver input: {}", e))?;
            }
            Err(e) => warn!("{}", e),
        }
    }

    info!("Input finished, tearing down pad");
    pad.teardown().await;

    // The observer is dropped with the pad loop, which closes the event channel
    printer
        .await
        .map_err(|e| eyre!("Event printer failed: {}", e))?;

    Ok(())
}

async fn print_events(mut events: mpsc::Receiver<DirectionEvent>) {
    while let Some(event) = events.recv().await {
        let direction = event
            .direction
            .map(|d| d.to_string())
            .unwrap_or_else(|| "none".to_string());
        info!(
            "{} {} ({:?})",
            event.timestamp.format("%H:%M:%S.%3f"),
            direction,
            event.kind
        );
    }
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
