//! Depth-driven stroke effects.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TrailError};
use crate::gfx::palette::ColorTable;
use crate::gfx::surface::StrokeStyle;

/// How the depth byte of a segment changes the stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthEffect {
    /// Leave the stroke as it is
    None,
    /// Width proportional to depth
    Width,
    /// Colour looked up from the palette table
    Color,
    /// Both width and colour
    #[default]
    WidthColor,
}

impl DepthEffect {
    pub const CATEGORY: &'static str = "depth effect";

    pub const ALL: [DepthEffect; 4] = [
        DepthEffect::None,
        DepthEffect::Width,
        DepthEffect::Color,
        DepthEffect::WidthColor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DepthEffect::None => "none",
            DepthEffect::Width => "width",
            DepthEffect::Color => "color",
            DepthEffect::WidthColor => "width+color",
        }
    }

    pub fn affects_width(self) -> bool {
        matches!(self, DepthEffect::Width | DepthEffect::WidthColor)
    }

    pub fn affects_color(self) -> bool {
        matches!(self, DepthEffect::Color | DepthEffect::WidthColor)
    }

    /// Updates `style` for a segment at `depth`.
    ///
    /// Fields this effect does not touch keep whatever the previous segment
    /// left in them.
    pub fn apply(self, depth: u8, width_factor: f64, table: &ColorTable, style: &mut StrokeStyle) {
        if self.affects_width() {
            style.width = depth as f64 / width_factor;
        }
        if self.affects_color() {
            style.color = table.get(depth);
        }
    }
}

impl fmt::Display for DepthEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DepthEffect {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self> {
        DepthEffect::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| TrailError::UnknownStrategy {
                category: Self::CATEGORY,
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::palette::Palette;
    use crate::gfx::surface::Color;
    use rand::{rngs::StdRng, SeedableRng};

    fn gray_table() -> ColorTable {
        ColorTable::build(Palette::Gray, &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn test_none_leaves_style() {
        let mut style = StrokeStyle::default();
        DepthEffect::None.apply(100, 50.0, &gray_table(), &mut style);
        assert_eq!(style, StrokeStyle::default());
    }

    #[test]
    fn test_width() {
        let mut style = StrokeStyle::default();
        DepthEffect::Width.apply(255, 50.0, &gray_table(), &mut style);
        assert!((style.width - 5.1).abs() < 1e-12);
        assert_eq!(style.color, Color::WHITE);
    }

    #[test]
    fn test_color() {
        let mut style = StrokeStyle::default();
        DepthEffect::Color.apply(40, 50.0, &gray_table(), &mut style);
        assert_eq!(style.color, Color::rgb(40, 40, 40));
        assert_eq!(style.width, 1.0);
    }

    #[test]
    fn test_width_and_color() {
        let mut style = StrokeStyle::default();
        DepthEffect::WidthColor.apply(100, 50.0, &gray_table(), &mut style);
        assert_eq!(style.width, 2.0);
        assert_eq!(style.color, Color::rgb(100, 100, 100));
    }

    #[test]
    fn test_names_round_trip() {
        for effect in DepthEffect::ALL {
            assert_eq!(effect.name().parse::<DepthEffect>().unwrap(), effect);
        }
        assert_eq!(DepthEffect::default(), DepthEffect::WidthColor);
    }
}
