//! Frame color palette and sticker themes.
//!
//! Both are fixed tables compiled into the crate. Names are lowercase and
//! round-trip through [`std::str::FromStr`] / [`std::fmt::Display`] so the
//! host can read them from configuration.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Border and label color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameColor {
    #[default]
    Black,
    Navy,
    Pink,
    Green,
    Blue,
    Yellow,
    Purple,
    Red,
}

impl FrameColor {
    /// Every palette entry, in swatch order.
    pub const ALL: [FrameColor; 8] = [
        FrameColor::Black,
        FrameColor::Navy,
        FrameColor::Pink,
        FrameColor::Green,
        FrameColor::Blue,
        FrameColor::Yellow,
        FrameColor::Purple,
        FrameColor::Red,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FrameColor::Black => "black",
            FrameColor::Navy => "navy",
            FrameColor::Pink => "pink",
            FrameColor::Green => "green",
            FrameColor::Blue => "blue",
            FrameColor::Yellow => "yellow",
            FrameColor::Purple => "purple",
            FrameColor::Red => "red",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            FrameColor::Black => "#000000",
            FrameColor::Navy => "#001F3F",
            FrameColor::Pink => "#FF69B4",
            FrameColor::Green => "#4CAF50",
            FrameColor::Blue => "#2196F3",
            FrameColor::Yellow => "#FFEB3B",
            FrameColor::Purple => "#9C27B0",
            FrameColor::Red => "#F44336",
        }
    }

    /// Opaque RGBA value of [`FrameColor::hex`], decoded from the hex string.
    pub fn rgba(self) -> Rgba<u8> {
        let digits = self.hex().as_bytes();
        let byte = |i: usize| (hex_nibble(digits[i]) << 4) | hex_nibble(digits[i + 1]);
        Rgba([byte(1), byte(3), byte(5), 255])
    }
}

fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

impl fmt::Display for FrameColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrameColor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        FrameColor::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| ParseError::FrameColor(s.to_string()))
    }
}

/// Template for one sticker of a theme.
///
/// Offsets are fractions of the surface size and locate the sticker's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySpec {
    pub image: &'static str,
    pub offset_x: f32,
    pub offset_y: f32,
}

const fn spec(image: &'static str, offset_x: f32, offset_y: f32) -> OverlaySpec {
    OverlaySpec {
        image,
        offset_x,
        offset_y,
    }
}

const GIRLYPOP: &[OverlaySpec] = &[
    spec("placeholder/60/60", 0.1, 0.1),
    spec("placeholder/50/50", 0.8, 0.2),
    spec("placeholder/70/70", 0.5, 0.8),
];

const CUTE: &[OverlaySpec] = &[
    spec("placeholder/50/50", 0.2, 0.2),
    spec("placeholder/60/60", 0.7, 0.3),
    spec("placeholder/40/40", 0.5, 0.7),
];

const PARTY: &[OverlaySpec] = &[
    spec("placeholder/70/70", 0.8, 0.1),
    spec("placeholder/60/60", 0.2, 0.8),
    spec("placeholder/50/50", 0.5, 0.5),
];

/// Sticker theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    None,
    Girlypop,
    Cute,
    Party,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::None, Theme::Girlypop, Theme::Cute, Theme::Party];

    pub fn name(self) -> &'static str {
        match self {
            Theme::None => "none",
            Theme::Girlypop => "girlypop",
            Theme::Cute => "cute",
            Theme::Party => "party",
        }
    }

    /// Stickers of this theme in placement order. Empty for [`Theme::None`].
    pub fn overlay_specs(self) -> &'static [OverlaySpec] {
        match self {
            Theme::None => &[],
            Theme::Girlypop => GIRLYPOP,
            Theme::Cute => CUTE,
            Theme::Party => PARTY,
        }
    }

    pub fn is_none(self) -> bool {
        self == Theme::None
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| ParseError::Theme(s.to_string()))
    }
}
