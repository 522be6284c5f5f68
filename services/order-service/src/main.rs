use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use order_service::config::{LogFormat, LogLevel, ServiceConfig};
use order_service::{io, OrderBookService};

/// Command line arguments for the batch run
#[derive(Parser, Debug)]
#[command(author, version, about = "Batch limit-order matching engine", long_about = None)]
struct Args {
    /// Path to the input command document
    #[arg(short, long, default_value = "orders.json")]
    input: PathBuf,

    /// Path for the final order book document
    #[arg(long, default_value = "orderbook.json")]
    book_output: PathBuf,

    /// Path for the trades document
    #[arg(long, default_value = "trades.json")]
    trades_output: PathBuf,

    /// Log verbosity
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

impl Args {
    fn into_config(self) -> ServiceConfig {
        ServiceConfig {
            input: self.input,
            book_output: self.book_output,
            trades_output: self.trades_output,
            log_level: self.log_level,
            log_format: self.log_format,
        }
    }
}

fn init_tracing(config: &ServiceConfig) {
    let builder = tracing_subscriber::fmt().with_max_level(config.log_level.as_level());
    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn main() -> Result<(), anyhow::Error> {
    let config = Args::parse().into_config();
    init_tracing(&config);

    info!(input = %config.input.display(), "starting batch run");

    let commands = io::read_commands(&config.input)?;
    let mut service = OrderBookService::new();
    let summary = service.process_all(&commands)?;

    info!(
        commands = summary.commands,
        trades = summary.trades,
        books = summary.books,
        "batch complete"
    );

    io::write_book_document(&config.book_output, &service.book_snapshots())?;
    io::write_trades_document(&config.trades_output, service.trades())?;

    info!(
        book_output = %config.book_output.display(),
        trades_output = %config.trades_output.display(),
        "documents written"
    );

    Ok(())
}
