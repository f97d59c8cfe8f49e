//! Block header records as printed by `riecoin-cli getblock`
//!
//! Accepts a bare `getblock` object, a JSON-RPC response wrapping one in
//! `result`, a JSON array of either, or a stream of concatenated /
//! newline-delimited objects. Fields other than the PoW header fields are
//! ignored.

use serde::Deserialize;
use std::io::Read;
use thiserror::Error;

use riepow_core::BlockHeader;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid block record: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("No block record in input")]
    Empty,

    #[error("Expected one block record, found {0}")]
    TooMany(usize),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Record {
    Rpc { result: BlockHeader },
    Bare(BlockHeader),
}

impl From<Record> for BlockHeader {
    fn from(record: Record) -> Self {
        match record {
            Record::Rpc { result } => result,
            Record::Bare(header) => header,
        }
    }
}

/// Parse every header record in `input`
pub fn parse_headers(input: &str) -> Result<Vec<BlockHeader>, RecordError> {
    let trimmed = input.trim_start();
    let records: Vec<Record> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)?
    } else {
        serde_json::Deserializer::from_str(trimmed)
            .into_iter::<Record>()
            .collect::<Result<_, _>>()?
    };

    if records.is_empty() {
        return Err(RecordError::Empty);
    }
    Ok(records.into_iter().map(BlockHeader::from).collect())
}

/// Read every header record from `reader`
pub fn read_headers<R: Read>(mut reader: R) -> Result<Vec<BlockHeader>, RecordError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_headers(&input)
}

/// Read exactly one header record from `reader`
pub fn read_header<R: Read>(reader: R) -> Result<BlockHeader, RecordError> {
    let mut headers = read_headers(reader)?;
    match headers.len() {
        1 => Ok(headers.remove(0)),
        n => Err(RecordError::TooMany(n)),
    }
}
