//! Depth colour palettes and the 256-entry lookup built from them.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{Result, TrailError};
use crate::gfx::surface::Color;

/// Colour palette indexed by depth byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Palette {
    /// White with opacity rising with depth (default).
    #[default]
    Alpha,

    /// Grayscale ramp, black to white.
    Gray,

    /// A single fixed red.
    Red,

    /// Four 64-step bands: red to yellow, yellow to green, green to cyan,
    /// cyan to blue.
    Rainbow,

    /// Random RGB per entry, redrawn every time the table is built.
    Chaos,
}

impl Palette {
    pub const CATEGORY: &'static str = "palette";

    pub const ALL: [Palette; 5] = [
        Palette::Alpha,
        Palette::Gray,
        Palette::Red,
        Palette::Rainbow,
        Palette::Chaos,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Palette::Alpha => "alpha",
            Palette::Gray => "gray",
            Palette::Red => "red",
            Palette::Rainbow => "rainbow",
            Palette::Chaos => "chaos",
        }
    }

    /// Whether building the table twice yields the same colours.
    pub fn is_deterministic(self) -> bool {
        !matches!(self, Palette::Chaos)
    }

    /// Colour for depth byte `c`.
    pub fn color<R: Rng>(self, c: u8, rng: &mut R) -> Color {
        match self {
            Palette::Alpha => Color::WHITE.with_alpha(c as f32 / 256.0),
            Palette::Gray => Color::rgb(c, c, c),
            Palette::Red => Color::RED,
            Palette::Rainbow => rainbow(c),
            Palette::Chaos => {
                let mut channel = || rng.random_range(0..255u8);
                Color::rgb(channel(), channel(), channel())
            }
        }
    }
}

fn rainbow(c: u8) -> Color {
    // Each band ramps one channel by 4 per step
    let step = (c % 64) * 4;
    match c {
        0..=63 => Color::rgb(255, step, 0),
        64..=127 => Color::rgb(255 - step, 255, 0),
        128..=191 => Color::rgb(0, 255, step),
        _ => Color::rgb(0, 255 - step, 255),
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self> {
        Palette::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| TrailError::UnknownStrategy {
                category: Self::CATEGORY,
                name: s.to_string(),
            })
    }
}

/// Precomputed colour for every depth byte.
///
/// Has to be rebuilt whenever the palette changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    palette: Palette,
    colors: Box<[Color; 256]>,
}

impl ColorTable {
    pub fn build<R: Rng>(palette: Palette, rng: &mut R) -> Self {
        let mut colors = Box::new([Color::WHITE; 256]);
        for (c, slot) in (0..=u8::MAX).zip(colors.iter_mut()) {
            *slot = palette.color(c, rng);
        }
        Self { palette, colors }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    #[inline]
    pub fn get(&self, depth: u8) -> Color {
        self.colors[depth as usize]
    }

    pub fn colors(&self) -> &[Color; 256] {
        &self.colors
    }
}
