//! Keeps the active tile of one live tile surface

use crate::context::ParseContext;
use crate::diagnostics::ParseResult;
use crate::elements::Tile;
use crate::parser::parse;
use std::sync::Arc;

/// Owns the tile currently on display and swaps it on accepted updates.
///
/// A payload that is not ready for render leaves the previous tile in
/// place. Readers get an [`Arc`] and never observe a half-built tree.
#[derive(Debug, Default)]
pub struct TileUpdater {
    context: ParseContext,
    current: Option<Arc<Tile>>,
    accepted: usize,
    rejected: usize,
}

impl TileUpdater {
    pub fn new(context: ParseContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Parse `xml` and make it the active tile if it can be rendered.
    pub fn update(&mut self, xml: &str) -> ParseResult {
        let result = parse(xml, &self.context);

        match result.shared_tile() {
            Some(tile) if result.is_ok_for_render() => {
                self.accepted += 1;
                log::info!(
                    "Tile update #{} accepted ({} warning(s))",
                    self.accepted,
                    result.warning_count()
                );
                self.current = Some(tile);
            }
            _ => {
                self.rejected += 1;
                log::warn!(
                    "Tile update rejected with {} error(s); keeping the previous tile",
                    result.error_count()
                );
            }
        }

        result
    }

    /// Drop the active tile so the host shows its default content.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            log::info!("Tile cleared");
        }
    }

    pub fn current(&self) -> Option<Arc<Tile>> {
        self.current.clone()
    }

    /// `(accepted, rejected)` update counts
    pub fn stats(&self) -> (usize, usize) {
        (self.accepted, self.rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"<tile><visual displayName="One"><binding template="TileMedium"><text>1</text></binding></visual></tile>"#;
    const OTHER: &str = r#"<tile><visual displayName="Two"><binding template="TileMedium"><text>2</text></binding></visual></tile>"#;

    #[test]
    fn test_accepted_update_replaces_tile() {
        let mut updater = TileUpdater::new(ParseContext::tile());
        assert!(updater.current().is_none());

        assert!(updater.update(GOOD).is_ok_for_render());
        let first = updater.current().unwrap();
        assert_eq!(first.visual.display_name.as_deref(), Some("One"));

        updater.update(OTHER);
        assert_eq!(
            updater.current().unwrap().visual.display_name.as_deref(),
            Some("Two")
        );
        // Earlier handles stay valid
        assert_eq!(first.visual.display_name.as_deref(), Some("One"));
        assert_eq!(updater.stats(), (2, 0));
    }

    #[test]
    fn test_rejected_update_keeps_previous_tile() {
        let mut updater = TileUpdater::new(ParseContext::tile());
        updater.update(GOOD);

        let result = updater.update("<tile><visual>");
        assert!(result.has_errors());
        assert_eq!(
            updater.current().unwrap().visual.display_name.as_deref(),
            Some("One")
        );
        assert_eq!(updater.stats(), (1, 1));
    }

    #[test]
    fn test_clear() {
        let mut updater = TileUpdater::new(ParseContext::tile());
        updater.update(GOOD);
        updater.clear();
        assert!(updater.current().is_none());
    }

    #[test]
    fn test_tile_is_shareable_across_threads() {
        let mut updater = TileUpdater::new(ParseContext::tile());
        updater.update(GOOD);
        let tile = updater.current().unwrap();

        let handle = std::thread::spawn(move || tile.visual.bindings.len());
        assert_eq!(handle.join().unwrap(), 1);
    }
}
