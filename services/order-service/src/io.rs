//! Document I/O
//!
//! Reads the input command document and writes the two result documents.
//! All JSON crosses this boundary; nothing inside the engine touches the
//! filesystem.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use serde::Serialize;
use types::order::OrderCommand;
use types::trade::Trade;

use crate::snapshot::BookSnapshot;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read the input document: a JSON array of raw order commands.
///
/// Array order defines ingestion order.
pub fn read_commands(path: &Path) -> Result<Vec<OrderCommand>, IoError> {
    let file = File::open(path)?;
    let commands = serde_json::from_reader(BufReader::new(file))?;
    Ok(commands)
}

/// Write the final order book document, keyed by pair.
pub fn write_book_document(
    path: &Path,
    books: &BTreeMap<String, BookSnapshot>,
) -> Result<(), IoError> {
    write_json(path, books)
}

/// Write the trades document in emission order.
pub fn write_trades_document(path: &Path, trades: &[Trade]) -> Result<(), IoError> {
    write_json(path, &trades)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
