//! Pretty-printed JSON output of decoded records.
//!
//! Plain pass-through of the record's `Serialize` impl, so absent optional
//! values come out as `null` and present numbers with two decimals.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;

const INDENT: &[u8] = b" ";

/// Writes `item` to `writer` as indented JSON.
pub fn dump_json<W: Write, T: Serialize + ?Sized>(writer: W, item: &T) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    item.serialize(&mut serializer)?;
    Ok(())
}

pub fn to_pretty_json<T: Serialize + ?Sized>(item: &T) -> Result<String> {
    let mut buffer = Vec::new();
    dump_json(&mut buffer, item)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Creates (or truncates) `path` and dumps `item` into it.
pub fn dump_json_to_file<T: Serialize + ?Sized>(path: impl AsRef<Path>, item: &T) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    dump_json(&mut writer, item)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::info!("Wrote JSON dump to {}", path.display());
    Ok(())
}
