//! What the tile chrome shows around the selected binding
//!
//! A renderer needs more than the binding: the display name and whether the
//! name and the corner logo are visible depend on branding, which cascades
//! from the binding to the visual to the host's defaults.

use crate::elements::{Binding, Tile};
use crate::selector::select_binding;
use crate::types::{Branding, TileSize};

/// Host-side values used when the payload does not say otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDefaults {
    pub display_name: String,
    pub show_name_on_medium: bool,
    pub show_name_on_wide: bool,
    pub show_name_on_large: bool,
}

impl Default for TileDefaults {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            show_name_on_medium: true,
            show_name_on_wide: true,
            show_name_on_large: true,
        }
    }
}

impl TileDefaults {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Small tiles never show the name.
    pub fn shows_name(&self, size: TileSize) -> bool {
        match size {
            TileSize::Small => false,
            TileSize::Medium => self.show_name_on_medium,
            TileSize::Wide => self.show_name_on_wide,
            TileSize::Large => self.show_name_on_large,
        }
    }
}

/// Resolved chrome for one tile size.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation<'a> {
    /// `None` means the host shows its default content
    pub binding: Option<&'a Binding>,
    pub display_name: String,
    pub show_name: bool,
    pub show_corner_logo: bool,
    /// Whether the strip holding badge, name and logo is drawn at all
    pub branding_visible: bool,
}

pub fn resolve_presentation<'a>(
    tile: Option<&'a Tile>,
    size: TileSize,
    defaults: &TileDefaults,
    has_badge: bool,
) -> Presentation<'a> {
    let selected = tile.and_then(|tile| {
        select_binding(&tile.visual, size).map(|binding| (tile, binding))
    });

    let Some((tile, binding)) = selected else {
        return finish(None, defaults.display_name.clone(), defaults.shows_name(size), false, has_badge);
    };

    let visual = &tile.visual;
    let display_name = binding
        .display_name
        .as_ref()
        .or(visual.display_name.as_ref())
        .unwrap_or(&defaults.display_name)
        .clone();

    let (show_name, show_corner_logo) = match binding.branding.or(visual.branding) {
        Some(branding) => {
            let (name, logo) = match branding {
                Branding::None => (false, false),
                Branding::Name => (true, false),
                Branding::Logo => (false, true),
                Branding::NameAndLogo => (true, true),
            };
            (name && size != TileSize::Small, logo)
        }
        None => (defaults.shows_name(size), false),
    };

    finish(Some(binding), display_name, show_name, show_corner_logo, has_badge)
}

fn finish(
    binding: Option<&Binding>,
    display_name: String,
    show_name: bool,
    show_corner_logo: bool,
    has_badge: bool,
) -> Presentation<'_> {
    Presentation {
        binding,
        display_name,
        show_name,
        show_corner_logo,
        branding_visible: has_badge || show_name || show_corner_logo,
    }
}
