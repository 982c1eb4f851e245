use eframe::egui::Color32;
use palette::{Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed UI colours
// ---------------------------------------------------------------------------

/// Bar colour for the earliest year on screen.
pub const OLDEST_BAR: Color32 = Color32::from_rgb(0x09, 0x84, 0xe3);
/// Bar colour for the latest year on screen.
pub const NEWEST_BAR: Color32 = Color32::from_rgb(0x00, 0xb8, 0x94);
/// Outline of the hovered bar.
pub const HIGHLIGHT_STROKE: Color32 = Color32::from_rgb(0x2d, 0x34, 0x36);
/// Axis labels and placeholder text.
pub const MUTED_TEXT: Color32 = Color32::from_rgb(0x63, 0x6e, 0x72);

fn to_srgb(c: Color32) -> Srgb<f32> {
    Srgb::new(c.r(), c.g(), c.b()).into_format()
}

fn to_color32(c: Srgb<f32>) -> Color32 {
    let c: Srgb<u8> = c.into_format();
    Color32::from_rgb(c.red, c.green, c.blue)
}

// ---------------------------------------------------------------------------
// Year gradient: release year → bar colour
// ---------------------------------------------------------------------------

/// Linear colour scale over a year span, interpolated in sRGB space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearGradient {
    min: i32,
    max: i32,
    start: Color32,
    end: Color32,
}

impl YearGradient {
    pub fn new(min: i32, max: i32) -> Self {
        YearGradient {
            min,
            max,
            start: OLDEST_BAR,
            end: NEWEST_BAR,
        }
    }

    /// Gradient spanning the years that occur in `years`; `None` when empty.
    pub fn spanning(years: impl IntoIterator<Item = i32>) -> Option<Self> {
        let mut years = years.into_iter();
        let first = years.next()?;
        let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Some(YearGradient::new(min, max))
    }

    /// Position of `year` in the span; a single-year span sits in the middle.
    pub fn position(&self, year: i32) -> f32 {
        if self.max == self.min {
            return 0.5;
        }
        (year - self.min) as f32 / (self.max - self.min) as f32
    }

    pub fn color_for(&self, year: i32) -> Color32 {
        let t = self.position(year).clamp(0.0, 1.0);
        to_color32(to_srgb(self.start).mix(to_srgb(self.end), t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_fixed_colours() {
        let g = YearGradient::new(1990, 2020);
        assert_eq!(g.color_for(1990), OLDEST_BAR);
        assert_eq!(g.color_for(2020), NEWEST_BAR);
    }

    #[test]
    fn midpoint_is_between_endpoints() {
        let g = YearGradient::new(2000, 2010);
        let mid = g.color_for(2005);
        assert_eq!(g.position(2005), 0.5);
        assert!(mid.r() <= OLDEST_BAR.r() && mid.r() >= NEWEST_BAR.r());
        assert!(mid.g() >= OLDEST_BAR.g() && mid.g() <= NEWEST_BAR.g());
        assert_ne!(mid, OLDEST_BAR);
        assert_ne!(mid, NEWEST_BAR);
    }

    #[test]
    fn single_year_span_uses_middle() {
        let g = YearGradient::spanning([2001, 2001]).unwrap();
        assert_eq!(g.position(2001), 0.5);
        assert!(YearGradient::spanning(std::iter::empty()).is_none());
    }
}
