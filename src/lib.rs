//! Convert a Sweet Markers array into a Tuntematon Fire Support target
//! reference point (TRP) array.
//!
//! Both notations look like nested bracketed arrays, but neither is strict
//! enough to be handled by a real parser. The source text is flattened
//! (all whitespace removed) and split heuristically into entries. Every
//! named entry becomes a [`TargetReferencePoint`] whose coordinates are
//! truncated to their integer part and zero-padded to five digits.
//!
//! The reverse direction is not implemented yet, see [`tun_to_sweet`].
//!
//! You can optionally get serde 1 support by enabling the `serde` feature.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod error;
pub mod files;

use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::error::Error;

/// Minimum number of digits in a padded coordinate string.
pub const PADDED_WIDTH: usize = 5;

/// The name token of entries that cannot be referenced (usually lines).
const EMPTY_NAME: &str = "\"\"";

/// Separator between two adjacent entries in the flattened source text.
const ENTRY_SEPARATOR: &str = "],[";

/// A `CoordinatePair` consists of an x and y coordinate.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinatePair {
    pub x: f64,
    pub y: f64,
}

impl CoordinatePair {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for CoordinatePair {
    fn from(val: (f64, f64)) -> Self {
        Self { x: val.0, y: val.1 }
    }
}

/// One entry of the Tuntematon Fire Support TRP array.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetReferencePoint {
    /// The quoted name, copied verbatim from the source.
    pub name: String,
    /// Original x token.
    pub x_raw: String,
    /// Original y token.
    pub y_raw: String,
    /// Padded x coordinate as written to the output.
    pub x_coord: String,
    /// Padded y coordinate as written to the output.
    pub y_coord: String,
    pub coords: CoordinatePair,
}

impl TargetReferencePoint {
    /// Build a TRP from its source tokens. The padded representations are
    /// derived from the raw tokens.
    pub fn new(name: &str, x_raw: &str, y_raw: &str, coords: CoordinatePair) -> Self {
        Self {
            name: name.to_string(),
            x_raw: x_raw.to_string(),
            y_raw: y_raw.to_string(),
            x_coord: pad_coordinate(x_raw),
            y_coord: pad_coordinate(y_raw),
            coords,
        }
    }
}

/// Layout of the entries in the destination array.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutputFormat {
    /// `[name,x,y]`
    #[default]
    Padded,
    /// `[name,x,y,[xf,yf]]`, with the parsed coordinates appended.
    PaddedWithCoords,
}

/// Remove one pair of surrounding quotes, if present.
fn unquote(token: &str) -> &str {
    let token = token.strip_prefix('"').unwrap_or(token);
    token.strip_suffix('"').unwrap_or(token)
}

/// Truncate a coordinate token to its integer part and left-pad it with
/// zeroes to [`PADDED_WIDTH`] digits. A sign stays in front of the padding.
///
/// Tokens without a decimal point are returned unchanged. Padding never
/// removes digits.
pub fn pad_coordinate(token: &str) -> String {
    let dot = match token.find('.') {
        Some(dot) => dot,
        None => return token.to_string(),
    };
    let int_part = unquote(&token[..dot]);
    let (sign, digits) = if int_part.starts_with('-') || int_part.starts_with('+') {
        int_part.split_at(1)
    } else {
        ("", int_part)
    };
    let pad = "0".repeat(PADDED_WIDTH.saturating_sub(digits.len()));
    format!("\"{}{}{}\"", sign, pad, digits)
}

fn parse_coordinate(entry: usize, token: &str) -> Result<f64, Error> {
    unquote(token)
        .parse::<f64>()
        .map_err(|source| Error::InvalidCoordinate {
            entry,
            token: token.to_string(),
            source,
        })
}

/// Split flattened source text into candidate entries.
///
/// This is a plain textual split on `],[`. It assumes that no entry contains
/// nested brackets of its own.
fn split_entries(flat: &str) -> impl Iterator<Item = &str> {
    flat.split(ENTRY_SEPARATOR)
}

/// Parse a Sweet Markers array into a list of TRPs, in source order.
///
/// Whitespace anywhere in the text is ignored. Entries named `""` are
/// skipped. Fields after the third one are ignored.
pub fn parse_entries(text: &str) -> Result<Vec<TargetReferencePoint>, Error> {
    trace!("parse_entries");

    let flat: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let mut trps = Vec::new();
    for (idx, candidate) in split_entries(&flat).enumerate() {
        let entry: String = candidate.chars().filter(|&c| c != '[' && c != ']').collect();
        if entry.is_empty() {
            trace!("parse_entries: Candidate {} is empty", idx);
            continue;
        }

        let fields: Vec<&str> = entry.split(',').collect();
        if fields[0] == EMPTY_NAME {
            debug!("parse_entries: Skipping unnamed entry {}", idx);
            continue;
        }

        let field = |index: usize| {
            fields
                .get(index)
                .copied()
                .ok_or(Error::MissingField { entry: idx, index })
        };
        let x_raw = field(1)?;
        let y_raw = field(2)?;
        let coords = CoordinatePair::new(
            parse_coordinate(idx, x_raw)?,
            parse_coordinate(idx, y_raw)?,
        );

        trace!("parse_entries: Entry {} is {} at {:?}", idx, fields[0], coords);
        trps.push(TargetReferencePoint::new(fields[0], x_raw, y_raw, coords));
    }

    trace!("parse_entries: Return {} TRPs", trps.len());
    Ok(trps)
}

/// Serialize TRPs into a Tuntematon Fire Support array.
///
/// The first element of the outer array is always empty. The second one
/// holds the TRPs.
pub fn serialize(trps: &[TargetReferencePoint], format: OutputFormat) -> String {
    let mut out = String::from("[[],[");
    for trp in trps {
        out.push('[');
        out.push_str(&trp.name);
        out.push(',');
        out.push_str(&trp.x_coord);
        out.push(',');
        out.push_str(&trp.y_coord);
        if format == OutputFormat::PaddedWithCoords {
            out.push_str(&format!(",[{},{}]", trp.coords.x, trp.coords.y));
        }
        out.push_str("],");
    }
    if out.ends_with(',') {
        out.pop();
    }
    out.push_str("]]");
    out
}

/// Convert a Sweet Markers array into a Tuntematon Fire Support TRP array.
///
/// A single malformed entry fails the whole conversion.
pub fn convert(text: &str, format: OutputFormat) -> Result<String, Error> {
    let trps = parse_entries(text)?;
    debug!("convert: {} TRPs as {:?}", trps.len(), format);
    Ok(serialize(&trps, format))
}

/// Convert a Tuntematon Fire Support TRP array back into Sweet Markers.
///
/// There is no agreed layout for the resulting markers, so this always fails
/// with [`Error::Unsupported`].
pub fn tun_to_sweet(_text: &str) -> Result<String, Error> {
    Err(Error::Unsupported(
        "conversion from Tuntematon Fire Support to Sweet Markers",
    ))
}
