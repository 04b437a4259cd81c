//! Vertica theme
//!
//! Cinema red on near-black, gold for ratings and selection markers.
//! Every palette entry is an RGB color so contrast can be checked.

use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// #0a0a0a
    pub const BACKGROUND: Color = Color::Rgb(0x0a, 0x0a, 0x0a);
    /// #181818, panels and the status bar
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x18, 0x18, 0x18);

    /// #e50914
    pub const PRIMARY: Color = Color::Rgb(0xe5, 0x09, 0x14);
    pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0x3d, 0x47);
    pub const SECONDARY: Color = Color::Rgb(0xb3, 0xb3, 0xb3);
    /// #f5c518, gold
    pub const ACCENT: Color = Color::Rgb(0xf5, 0xc5, 0x18);

    pub const TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
    pub const DIM: Color = Color::Rgb(0x6b, 0x6b, 0x6b);

    pub const SUCCESS: Color = Color::Rgb(0x46, 0xd3, 0x69);
    pub const WARNING: Color = Color::Rgb(0xf5, 0xa6, 0x23);
    pub const ERROR: Color = Color::Rgb(0xff, 0x4d, 0x4d);

    pub const BORDER: Color = Color::Rgb(0x3a, 0x3a, 0x3a);
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    fn fg(color: Color) -> Style {
        Style::default().fg(color)
    }

    fn bold(color: Color) -> Style {
        Self::fg(color).add_modifier(Modifier::BOLD)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // TEXT
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Self::fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn secondary() -> Style {
        Self::fg(Self::SECONDARY)
    }

    pub fn dimmed() -> Style {
        Self::fg(Self::DIM)
    }

    /// Section and screen titles
    pub fn title() -> Style {
        Self::bold(Self::PRIMARY)
    }

    pub fn accent() -> Style {
        Self::bold(Self::ACCENT)
    }

    /// Search result under the cursor
    pub fn highlighted() -> Style {
        Self::bold(Self::TEXT).bg(Self::PRIMARY)
    }

    pub fn success() -> Style {
        Self::bold(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Self::bold(Self::WARNING)
    }

    pub fn error() -> Style {
        Self::bold(Self::ERROR)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CHROME
    // ═══════════════════════════════════════════════════════════════════════

    pub fn border() -> Style {
        Self::fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Self::bold(Self::BORDER_FOCUSED)
    }

    pub fn list_item_selected() -> Style {
        Self::highlighted()
    }

    pub fn input() -> Style {
        Self::fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn status_bar() -> Style {
        Self::input()
    }

    /// `[Enter]`-style key hints
    pub fn keybind() -> Style {
        Self::fg(Self::ACCENT)
    }

    pub fn loading() -> Style {
        Self::bold(Self::PRIMARY)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // METADATA
    // ═══════════════════════════════════════════════════════════════════════

    pub fn year() -> Style {
        Self::secondary()
    }

    pub fn genre() -> Style {
        Self::dimmed().add_modifier(Modifier::ITALIC)
    }

    pub fn duration() -> Style {
        Self::dimmed()
    }

    /// Score out of ten; the selected row always uses the accent
    pub fn rating(score: f32, is_selected: bool) -> Style {
        match score {
            _ if is_selected => Self::accent(),
            s if s >= 7.5 => Self::success(),
            s if s >= 6.0 => Self::warning(),
            s if s >= 4.0 => Self::dimmed(),
            _ => Self::error(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTRAST
// ═══════════════════════════════════════════════════════════════════════════

/// RGB components of a palette color; named and indexed colors have none
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

/// WCAG 2.0 relative luminance of an sRGB triple
pub fn relative_luminance((r, g, b): (u8, u8, u8)) -> f64 {
    let linear = |c: u8| {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// Contrast between two palette colors, 1.0 to 21.0
///
/// Non-RGB colors have no defined luminance and score 1.0.
pub fn contrast_ratio(fg: Color, bg: Color) -> f64 {
    let (Some(fg), Some(bg)) = (color_to_rgb(fg), color_to_rgb(bg)) else {
        return 1.0;
    };
    let a = relative_luminance(fg);
    let b = relative_luminance(bg);
    (a.max(b) + 0.05) / (a.min(b) + 0.05)
}

/// 4.5:1, body text
pub fn meets_wcag_aa(fg: Color, bg: Color) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// 3:1, titles and bold text
pub fn meets_wcag_aa_large(fg: Color, bg: Color) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}
