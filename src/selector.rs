//! Binding selection by tile size

use crate::elements::{Binding, Visual};
use crate::types::TileSize;

/// First binding in document order whose template fits `size`.
///
/// Later bindings for the same size are never considered.
pub fn select_binding(visual: &Visual, size: TileSize) -> Option<&Binding> {
    let valid = size.valid_templates();
    let selected = visual
        .bindings
        .iter()
        .find(|binding| binding.template.is_some_and(|t| valid.contains(&t)));

    if selected.is_none() {
        log::debug!("No binding for {} tiles among {}", size, visual.bindings.len());
    }
    selected
}
