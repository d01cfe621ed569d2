//! Single-line transfer strings for sharing board layouts.
//!
//! The format is `board:v1:<tiles>x<structures>:<payload>`, where the payload
//! is the JSON layout encoded as unpadded standard base64.

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};

use crate::layout::BoardLayout;

const SNAPSHOT_DOMAIN: &str = "board";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "board:v1";
/// Delimiter used to separate the prefix, record counts and payload.
const FIELD_DELIMITER: char = ':';

impl BoardLayout {
    /// Encodes the layout into a single-line string suitable for clipboard transfer.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let json = serde_json::to_vec(self).map_err(LayoutTransferError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{SNAPSHOT_HEADER}:{}x{}:{encoded}",
            self.tiles.len(),
            self.structures.len()
        ))
    }

    /// Decodes a layout from the provided transfer string.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let counts = parts.next().ok_or(LayoutTransferError::MissingCounts)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (tiles, structures) = parse_counts(counts)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let layout: BoardLayout =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        if layout.tiles.len() != tiles || layout.structures.len() != structures {
            return Err(LayoutTransferError::CountMismatch {
                expected: (tiles, structures),
                found: (layout.tiles.len(), layout.structures.len()),
            });
        }

        Ok(layout)
    }
}

/// Errors that can occur while encoding or decoding layout transfer strings.
#[derive(Debug)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    MissingVersion,
    /// The encoded snapshot did not include the record counts.
    MissingCounts,
    /// The encoded snapshot did not include the payload segment.
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The record counts could not be parsed.
    InvalidCounts(String),
    /// The decoded payload holds a different number of records than announced.
    CountMismatch {
        /// Tile and structure counts announced in the header.
        expected: (usize, usize),
        /// Tile and structure counts found in the payload.
        found: (usize, usize),
    },
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The payload could not be serialised or deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for LayoutTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "layout string was empty"),
            Self::MissingPrefix => write!(f, "layout string is missing the prefix"),
            Self::MissingVersion => write!(f, "layout string is missing the version"),
            Self::MissingCounts => write!(f, "layout string is missing the record counts"),
            Self::MissingPayload => write!(f, "layout string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "layout prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "layout version '{version}' is not supported")
            }
            Self::InvalidCounts(counts) => {
                write!(f, "could not parse record counts '{counts}'")
            }
            Self::CountMismatch { expected, found } => write!(
                f,
                "layout announces {}x{} records but holds {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode layout payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not process layout payload: {error}")
            }
        }
    }
}

impl Error for LayoutTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_counts(counts: &str) -> Result<(usize, usize), LayoutTransferError> {
    let invalid = || LayoutTransferError::InvalidCounts(counts.to_owned());
    let (tiles, structures) = counts.split_once(['x', 'X']).ok_or_else(invalid)?;

    let tiles = tiles.trim().parse::<usize>().map_err(|_| invalid())?;
    let structures = structures.trim().parse::<usize>().map_err(|_| invalid())?;

    Ok((tiles, structures))
}
