//! Live Tile Payload Parser
//!
//! Parses the XML payload an application sends to update its live tile,
//! validates it against the tile schema and picks the binding to draw for a
//! given tile size.
//!
//! # Features
//!
//! - Typed element model: tile, visual, binding, group, subgroup, text, image
//! - Diagnostics with severity, element, attribute and source line
//! - Host capability table to widen or narrow accepted enum values
//! - `{placeholder}` detection for renderer-side data binding
//! - Generic object model projection with JSON output
//!
//! # Basic Usage
//!
//! ```rust
//! use tilec::{parse_tile, select_binding, TileSize};
//!
//! let result = parse_tile(
//!     r#"<tile><visual><binding template="TileMedium"><text>Hi</text></binding></visual></tile>"#,
//! );
//! assert!(result.is_ok_for_render());
//!
//! let tile = result.tile().unwrap();
//! let binding = select_binding(&tile.visual, TileSize::Medium).unwrap();
//! assert_eq!(binding.texts().count(), 1);
//! ```
//!
//! # Parsing Pipeline
//!
//! 1. **Phase 1**: XML reader - Build an owned element tree, reject malformed input
//! 2. **Phase 2**: Template parser - Map tags to element variants, consume attributes
//! 3. **Phase 3**: Selection - Pick the binding for a tile size and resolve branding

pub mod attributes;
pub mod coercion;
pub mod context;
pub mod diagnostics;
pub mod elements;
pub mod error;
pub mod object_model;
pub mod parser;
pub mod presentation;
pub mod selector;
pub mod types;
pub mod updater;
pub mod xml;
pub mod cli;

use std::fs;
use std::path::Path;

// Re-export commonly used types and functions
pub use context::{Capabilities, ParseContext};
pub use diagnostics::{ParseIssue, ParseResult, Severity};
pub use elements::{
    Binding, BindingChild, ElementVariant, Group, ImageField, Subgroup, SubgroupChild, TextField,
    Tile, Visual,
};
pub use error::{Result, TileError};
pub use object_model::{ObjectNode, PropertyValue, Scalar, Value};
pub use parser::parse;
pub use presentation::{resolve_presentation, Presentation, TileDefaults};
pub use selector::select_binding;
pub use types::*;
pub use updater::TileUpdater;
pub use cli::TilecCli;

/// Parser version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Parse a tile payload with no host capabilities.
pub fn parse_tile(xml: &str) -> ParseResult {
    parse(xml, &ParseContext::tile())
}

/// Read a payload file and decode it to text.
pub fn read_payload(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TileError::FileNotFound { path: display.clone() }
        } else {
            TileError::Io(e)
        }
    })?;

    log::debug!("Read {} ({} bytes)", display, bytes.len());
    xml::decode_document(&bytes, &display)
}

/// Read and parse a payload file.
///
/// Only reading and decoding the file can fail; payload problems end up in
/// the returned [`ParseResult`].
pub fn parse_file(path: impl AsRef<Path>, context: &ParseContext) -> Result<ParseResult> {
    let xml = read_payload(path)?;
    Ok(parse(&xml, context))
}
