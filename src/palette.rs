//! Color tables for party entities
//!
//! Loaded once as `const` data and shared by reference.

use rand::Rng;

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 (transparent) to 1.0 (opaque)
    pub a: f32,
}

impl Color {
    /// Opaque color from `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// CSS color string: `#rrggbb` when opaque, `rgba(...)` otherwise
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    /// Normalized RGBA for vertex buffers
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a.clamp(0.0, 1.0),
        ]
    }
}

/// Front/back face colors of a two-sided entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    pub front: Color,
    pub back: Color,
}

impl ColorPair {
    pub const fn new(front: Color, back: Color) -> Self {
        Self { front, back }
    }
}

pub const WHITE_STRING: Color = Color::rgba(255, 255, 255, 0.7);
pub const WHITE_HIGHLIGHT: Color = Color::rgba(255, 255, 255, 0.2);

/// Single colors (balloons)
pub const COLORS: [Color; 7] = [
    Color::hex(0x3260c7), // Blue
    Color::hex(0x70bb06), // Green
    Color::hex(0xf28d18), // Orange
    Color::hex(0xf24981), // Pink
    Color::hex(0x9e40cc), // Purple
    Color::hex(0xef4f1a), // Red
    Color::hex(0x00a4b3), // Teal
];

/// Two-sided colors (confetti, ribbons)
pub const COLOR_PAIRS: [ColorPair; 7] = [
    ColorPair::new(Color::hex(0x104da1), Color::hex(0x3260c7)), // Blue
    ColorPair::new(Color::hex(0x70bb06), Color::hex(0xabdb65)), // Green
    ColorPair::new(Color::hex(0xf28d18), Color::hex(0xffd38c)), // Orange
    ColorPair::new(Color::hex(0xf24981), Color::hex(0xff73a2)), // Pink
    ColorPair::new(Color::hex(0x9e40cc), Color::hex(0xb96fe0)), // Purple
    ColorPair::new(Color::hex(0xef4f1a), Color::hex(0xff6c4f)), // Red
    ColorPair::new(Color::hex(0x00a4b3), Color::hex(0x6cd0d9)), // Teal
];

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    COLORS[rng.random_range(0..COLORS.len())]
}

pub fn random_pair<R: Rng + ?Sized>(rng: &mut R) -> ColorPair {
    COLOR_PAIRS[rng.random_range(0..COLOR_PAIRS.len())]
}
