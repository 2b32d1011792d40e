// File: crates/dash-render-skia/src/theme.rs
// Summary: Backend colours that are not part of the scene: page background, highlight
// ring, tooltip box, and an optional text colour override for dark pages.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    /// Replaces the fill of every text mark when set.
    pub text: Option<skia::Color>,
    pub highlight: skia::Color,
    pub tooltip_fill: skia::Color,
    pub tooltip_border: skia::Color,
    pub tooltip_text: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            text: None,
            highlight: skia::Color::from_argb(255, 0xe3, 0x1a, 0x1c),
            tooltip_fill: skia::Color::from_argb(235, 255, 255, 255),
            tooltip_border: skia::Color::from_argb(255, 0x77, 0x77, 0x77),
            tooltip_text: skia::Color::from_argb(255, 20, 20, 30),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            text: Some(skia::Color::from_argb(255, 235, 235, 245)),
            highlight: skia::Color::from_argb(255, 255, 230, 70),
            tooltip_fill: skia::Color::from_argb(235, 40, 40, 45),
            tooltip_border: skia::Color::from_argb(255, 150, 150, 160),
            tooltip_text: skia::Color::from_argb(255, 235, 235, 245),
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: skia::Color::from_argb(255, 0xfd, 0xf6, 0xe3), // base3
            text: Some(skia::Color::from_argb(255, 0x58, 0x6e, 0x75)), // base01
            highlight: skia::Color::from_argb(255, 0xcb, 0x4b, 0x16),  // orange
            tooltip_fill: skia::Color::from_argb(235, 0xee, 0xe8, 0xd5), // base2
            tooltip_border: skia::Color::from_argb(255, 0x93, 0xa1, 0xa1),
            tooltip_text: skia::Color::from_argb(255, 0x00, 0x2b, 0x36),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            text: Some(skia::Color::from_argb(255, 0xff, 0xff, 0xff)),
            highlight: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
            tooltip_fill: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            tooltip_border: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            tooltip_text: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Built-in presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::solarized_light(), Theme::high_contrast_dark()]
}

/// Find a theme by `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name)).unwrap_or_default()
}
