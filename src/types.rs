//! Core enumerations shared by the parser, the element model and the selector

use crate::error::{Result, TileError};
use std::fmt;
use std::str::FromStr;

/// Closed enumeration that can appear as an attribute value in a payload.
pub trait AttributeEnum: Copy + PartialEq + fmt::Debug + 'static {
    const KIND: EnumKind;
    const VARIANTS: &'static [Self];

    /// Spelling used in payload XML
    fn as_str(self) -> &'static str;

    /// Spelling used in the object model
    fn object_name(self) -> &'static str;

    /// Case-insensitive lookup of an attribute value.
    fn from_attribute(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(value))
    }
}

macro_rules! attribute_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $xml:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl AttributeEnum for $name {
            const KIND: EnumKind = EnumKind::$kind;
            const VARIANTS: &'static [Self] = &[$( Self::$variant ),+];

            fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $xml ),+
                }
            }

            fn object_name(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant) ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Identifies an enum type independently of its Rust type, used as half of
/// the capability table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    Template,
    Branding,
    HintStyle,
    HintAlign,
    TextPlacement,
    ImagePlacement,
    HintCrop,
    ImageAlign,
    TextStacking,
}

impl EnumKind {
    pub const ALL: &'static [EnumKind] = &[
        EnumKind::Template,
        EnumKind::Branding,
        EnumKind::HintStyle,
        EnumKind::HintAlign,
        EnumKind::TextPlacement,
        EnumKind::ImagePlacement,
        EnumKind::HintCrop,
        EnumKind::ImageAlign,
        EnumKind::TextStacking,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EnumKind::Template => "template",
            EnumKind::Branding => "branding",
            EnumKind::HintStyle => "hint-style",
            EnumKind::HintAlign => "hint-align",
            EnumKind::TextPlacement => "text-placement",
            EnumKind::ImagePlacement => "image-placement",
            EnumKind::HintCrop => "hint-crop",
            EnumKind::ImageAlign => "image-align",
            EnumKind::TextStacking => "text-stacking",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key().eq_ignore_ascii_case(key))
    }

    /// Payload spellings of every member of the enum
    pub fn spellings(self) -> Vec<&'static str> {
        fn names<E: AttributeEnum>() -> Vec<&'static str> {
            E::VARIANTS.iter().map(|v| v.as_str()).collect()
        }
        match self {
            EnumKind::Template => names::<Template>(),
            EnumKind::Branding => names::<Branding>(),
            EnumKind::HintStyle => names::<HintStyle>(),
            EnumKind::HintAlign => names::<HintAlign>(),
            EnumKind::TextPlacement => names::<TextPlacement>(),
            EnumKind::ImagePlacement => names::<ImagePlacement>(),
            EnumKind::HintCrop => names::<HintCrop>(),
            EnumKind::ImageAlign => names::<ImageAlign>(),
            EnumKind::TextStacking => names::<TextStacking>(),
        }
    }
}

/// Element kinds known to the template parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Tile,
    Toast,
    Visual,
    Binding,
    Group,
    Subgroup,
    Text,
    Image,
}

impl ElementKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "tile" => Some(Self::Tile),
            "toast" => Some(Self::Toast),
            "visual" => Some(Self::Visual),
            "binding" => Some(Self::Binding),
            "group" => Some(Self::Group),
            "subgroup" => Some(Self::Subgroup),
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Tile => "tile",
            Self::Toast => "toast",
            Self::Visual => "visual",
            Self::Binding => "binding",
            Self::Group => "group",
            Self::Subgroup => "subgroup",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kind of notification a payload is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationType {
    #[default]
    Tile,
    Toast,
}

impl NotificationType {
    pub fn root_kind(self) -> ElementKind {
        match self {
            Self::Tile => ElementKind::Tile,
            Self::Toast => ElementKind::Toast,
        }
    }

    pub fn supported_templates(self) -> &'static [Template] {
        match self {
            Self::Tile => &[
                Template::TileSmall,
                Template::TileMedium,
                Template::TileWide,
                Template::TileLarge,
            ],
            Self::Toast => &[Template::ToastGeneric],
        }
    }
}

impl FromStr for NotificationType {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tile" => Ok(Self::Tile),
            "toast" => Ok(Self::Toast),
            other => Err(TileError::invalid_format(format!(
                "Unknown notification type '{}'. Expected tile or toast.",
                other
            ))),
        }
    }
}

/// Size class of the tile being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileSize {
    Small,
    #[default]
    Medium,
    Wide,
    Large,
}

impl TileSize {
    pub const ALL: &'static [TileSize] =
        &[TileSize::Small, TileSize::Medium, TileSize::Wide, TileSize::Large];

    /// Templates a binding may declare to be shown at this size.
    pub fn valid_templates(self) -> &'static [Template] {
        match self {
            TileSize::Small => &[Template::TileSmall],
            TileSize::Medium => &[Template::TileMedium],
            TileSize::Wide => &[Template::TileWide],
            TileSize::Large => &[Template::TileLarge],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TileSize::Small => "small",
            TileSize::Medium => "medium",
            TileSize::Wide => "wide",
            TileSize::Large => "large",
        }
    }
}

impl FromStr for TileSize {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self> {
        TileSize::ALL
            .iter()
            .copied()
            .find(|size| size.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                TileError::invalid_format(format!(
                    "Unknown tile size '{}'. Expected small, medium, wide or large.",
                    s
                ))
            })
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

attribute_enum! {
    /// Size category a binding targets
    pub enum Template: Template {
        TileSmall => "TileSmall",
        TileMedium => "TileMedium",
        TileWide => "TileWide",
        TileLarge => "TileLarge",
        ToastGeneric => "ToastGeneric",
    }
}

attribute_enum! {
    /// Controls display name and corner logo visibility
    pub enum Branding: Branding {
        None => "none",
        Logo => "logo",
        Name => "name",
        NameAndLogo => "nameAndLogo",
    }
}

attribute_enum! {
    #[derive(Default)]
    pub enum HintStyle: HintStyle {
        #[default]
        Default => "default",
        Caption => "caption",
        CaptionSubtle => "captionSubtle",
        Body => "body",
        BodySubtle => "bodySubtle",
        Base => "base",
        BaseSubtle => "baseSubtle",
        Subtitle => "subtitle",
        SubtitleSubtle => "subtitleSubtle",
        Title => "title",
        TitleSubtle => "titleSubtle",
        TitleNumeral => "titleNumeral",
        Subheader => "subheader",
        SubheaderSubtle => "subheaderSubtle",
        SubheaderNumeral => "subheaderNumeral",
        Header => "header",
        HeaderSubtle => "headerSubtle",
        HeaderNumeral => "headerNumeral",
    }
}

attribute_enum! {
    /// Horizontal alignment of a text field
    #[derive(Default)]
    pub enum HintAlign: HintAlign {
        #[default]
        Default => "default",
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

attribute_enum! {
    #[derive(Default)]
    pub enum TextPlacement: TextPlacement {
        #[default]
        Inline => "inline",
        Attribution => "attribution",
    }
}

attribute_enum! {
    #[derive(Default)]
    pub enum ImagePlacement: ImagePlacement {
        #[default]
        Inline => "inline",
        Background => "background",
        Peek => "peek",
    }
}

attribute_enum! {
    #[derive(Default)]
    pub enum HintCrop: HintCrop {
        #[default]
        Default => "default",
        None => "none",
        Circle => "circle",
    }
}

attribute_enum! {
    /// Horizontal alignment of an image
    #[derive(Default)]
    pub enum ImageAlign: ImageAlign {
        #[default]
        Default => "default",
        Stretch => "stretch",
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

attribute_enum! {
    /// Vertical stacking of the content of a binding or subgroup
    #[derive(Default)]
    pub enum TextStacking: TextStacking {
        #[default]
        Default => "default",
        Top => "top",
        Center => "center",
        Bottom => "bottom",
    }
}
