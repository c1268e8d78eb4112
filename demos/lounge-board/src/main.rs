//! Terminal demo of the Embertrack board.
//!
//! Runs a full board against a JSON snapshot in the working directory,
//! with the countdown shortened to 10 seconds so the whole
//! available → active → alert → charcoal-change cycle is watchable.
//! Alerts ring the terminal bell.
//!
//! ```text
//! cargo run -p lounge-board
//! ```

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use embertrack::{
    format_remaining, AlertSink, Board, BoardConfig, BoardError, JsonFileStore, NotifyError,
    SessionConfig, Table, TableNumber, TableStatus,
};
use tracing_subscriber::EnvFilter;

/// Rings the terminal bell.
struct BellSink;

impl AlertSink for BellSink {
    fn notify(&self) -> Result<(), NotifyError> {
        print!("\x07");
        std::io::stdout()
            .flush()
            .map_err(|err| NotifyError::new(err.to_string()))
    }
}

fn render(tables: &[Table]) {
    let now = Utc::now();
    print!("\x1b[2J\x1b[H"); // clear screen, cursor home
    println!("lounge board — live view, ^C to quit\n");
    for row in tables.chunks(5) {
        for table in row {
            let cell = match table.session.status {
                TableStatus::Available => format!("[{:>2}   --  ]", table.table_number.0),
                TableStatus::Active => {
                    let left = table.session.remaining_secs(now).unwrap_or(0);
                    format!("[{:>2} {} ]", table.table_number.0, format_remaining(left))
                }
                TableStatus::Alert => format!("[{:>2} ALERT!]", table.table_number.0),
            };
            print!(" {cell}");
        }
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<(), BoardError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = BoardConfig {
        session: SessionConfig {
            timer_secs: 10,
            ..SessionConfig::default()
        },
        ..BoardConfig::default()
    };
    let store = Arc::new(JsonFileStore::new("lounge-tables.json"));
    let board = Board::spawn(config, store, Arc::new(BellSink));
    tracing::info!(snapshot = "lounge-tables.json", "lounge board demo started");

    // Seat a few parties so there's something to watch.
    board.activate(TableNumber(3)).await?;
    board.activate(TableNumber(8)).await?;
    board.activate(TableNumber(14)).await?;
    board.transfer(TableNumber(14), TableNumber(21)).await?;

    let mut floor = board.subscribe();
    let mut redraw = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = redraw.tick() => render(&floor.borrow_and_update()),
            changed = floor.changed() => {
                if changed.is_err() {
                    break;
                }
                render(&floor.borrow_and_update());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                board.shutdown().await?;
                break;
            }
        }
    }
    Ok(())
}
