//! Greyscale theme for scribe
//! A high-contrast monochrome palette with a few accents for file kinds
//! and conversation roles

use crate::files::FileIcon;
use ratatui::style::{Color, Modifier, Style};

/// The color palette
pub struct Theme;

impl Theme {
    // ─────────────────────────────────────────────────────────────────────
    // Core greyscale palette - from brightest to darkest
    // ─────────────────────────────────────────────────────────────────────

    /// Pure white - maximum emphasis
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Bright grey - primary text
    pub const GREY_100: Color = Color::Rgb(220, 220, 220);

    /// Light grey - secondary text, active elements
    pub const GREY_200: Color = Color::Rgb(180, 180, 180);

    /// Medium grey - muted text
    pub const GREY_300: Color = Color::Rgb(140, 140, 140);

    /// Dark grey - subtle elements, inactive tabs
    pub const GREY_400: Color = Color::Rgb(100, 100, 100);

    /// Darker grey - borders, separators
    pub const GREY_500: Color = Color::Rgb(70, 70, 70);

    /// Very dark grey - inactive borders
    pub const GREY_600: Color = Color::Rgb(45, 45, 45);

    /// Dark grey - overlay and selection backgrounds
    pub const GREY_700: Color = Color::Rgb(35, 35, 35);

    /// Near black - code block background
    pub const GREY_800: Color = Color::Rgb(28, 28, 28);

    /// True black - deepest background
    pub const GREY_900: Color = Color::Rgb(18, 18, 18);

    /// Background color alias
    pub const BG: Color = Self::GREY_900;

    // ─────────────────────────────────────────────────────────────────────
    // Accents
    // ─────────────────────────────────────────────────────────────────────

    pub const GREEN: Color = Color::Rgb(100, 200, 100);
    pub const RED: Color = Color::Rgb(200, 100, 100);
    pub const YELLOW: Color = Color::Rgb(220, 190, 90);
    pub const BLUE: Color = Color::Rgb(110, 150, 230);
    pub const ORANGE: Color = Color::Rgb(230, 150, 80);
    pub const PURPLE: Color = Color::Rgb(170, 130, 230);

    pub const LOGO: &'static str = "s c r i b e";

    /// Spinner frames - braille pattern
    pub const SPINNER: [&'static str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

    // ─────────────────────────────────────────────────────────────────────
    // Pre-built styles
    // ─────────────────────────────────────────────────────────────────────

    /// Primary text style
    pub fn text() -> Style {
        Style::default().fg(Self::GREY_100)
    }

    /// Dimmed text for less important items
    pub fn text_dim() -> Style {
        Style::default().fg(Self::GREY_400)
    }

    /// Border for the focused panel
    pub fn border_active() -> Style {
        Style::default().fg(Self::GREY_300)
    }

    /// Border for the other panels
    pub fn border() -> Style {
        Style::default().fg(Self::GREY_600)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    /// Keybinding badge in the footer
    pub fn key_badge() -> Style {
        Style::default().fg(Self::GREY_900).bg(Self::GREY_500)
    }

    /// Icon color by file kind
    pub fn icon_color(icon: FileIcon) -> Color {
        match icon {
            FileIcon::Folder { .. } => Self::BLUE,
            FileIcon::Json => Self::ORANGE,
            FileIcon::Markdown => Self::PURPLE,
            FileIcon::Yaml => Self::GREEN,
            FileIcon::Generic => Self::GREY_300,
        }
    }
}
