use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Theme – per-call visual configuration
// ---------------------------------------------------------------------------

/// Colors used by one chart. Themes are plain values threaded through the
/// render calls; nothing here is process-global.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub grid: RGBColor,
    /// Primary data series.
    pub series: RGBColor,
    /// Moving-average overlay.
    pub overlay: RGBColor,
}

/// Convert an HSL color to the RGB type plotters draws with.
fn hue_color(hue: f32, saturation: f32, lightness: f32) -> RGBColor {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    RGBColor(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

impl Theme {
    /// The built-in light theme.
    pub fn default_theme() -> Theme {
        Theme {
            name: "default",
            background: RGBColor(255, 255, 255),
            foreground: RGBColor(40, 40, 40),
            grid: RGBColor(160, 160, 160),
            series: hue_color(210.0, 0.75, 0.45),
            overlay: hue_color(10.0, 0.80, 0.50),
        }
    }

    pub fn dark() -> Theme {
        Theme {
            name: "dark",
            background: RGBColor(24, 26, 32),
            foreground: RGBColor(222, 222, 222),
            grid: RGBColor(110, 110, 110),
            series: hue_color(185.0, 0.70, 0.60),
            overlay: hue_color(40.0, 0.90, 0.60),
        }
    }

    pub fn grayscale() -> Theme {
        Theme {
            name: "grayscale",
            background: RGBColor(255, 255, 255),
            foreground: RGBColor(20, 20, 20),
            grid: RGBColor(150, 150, 150),
            series: RGBColor(60, 60, 60),
            overlay: RGBColor(150, 150, 150),
        }
    }

    /// Look up a theme by name (case-insensitive).
    pub fn named(name: &str) -> Option<Theme> {
        let candidates = [Theme::default_theme(), Theme::dark(), Theme::grayscale()];
        candidates
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Resolve an optional style name, falling back to the default theme
    /// when the name is unknown.
    pub fn resolve(style: Option<&str>) -> Theme {
        match style {
            None => Theme::default_theme(),
            Some(name) => Theme::named(name).unwrap_or_else(|| {
                log::warn!("unknown style '{name}', using default theme");
                Theme::default_theme()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_lookup_is_case_insensitive() {
        assert_eq!(Theme::named("Dark").unwrap().name, "dark");
        assert_eq!(Theme::named("GRAYSCALE").unwrap().name, "grayscale");
    }

    #[test]
    fn unknown_style_falls_back_to_default() {
        let t = Theme::resolve(Some("no-such-theme"));
        assert_eq!(t, Theme::default_theme());
    }

    #[test]
    fn missing_style_is_default() {
        assert_eq!(Theme::resolve(None), Theme::default_theme());
    }
}
