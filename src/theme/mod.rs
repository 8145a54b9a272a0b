use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod palette;

pub use palette::{dim_color, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub header_logo: Style,
    pub header_page: Style,
    pub header_active: Style,
    pub header_item: Style,
    pub header: Style,

    pub footer_segment_key: Style,
    pub footer_segment_val: Style,
    pub footer: Style,

    pub status_info: Style,
    pub status_warn: Style,
    pub status_error: Style,

    pub list_selected: Style,
    pub list_item: Style,
    pub list_icon: Style,
    pub dimmed: Style,

    pub editor_text: Style,
    pub editor_cursor: Style,
    pub editor_cursor_line: Style,
    pub editor_selection: Style,

    pub income: Style,
    pub expense: Style,
    pub free_cash: Style,
    pub free_cash_negative: Style,
    pub pending: Style,
    pub group_title: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum PaletteType {
    #[default]
    #[serde(rename = "catppuccin")]
    CatppuccinMocha,
    #[serde(rename = "nord")]
    Nord,
}

impl PaletteType {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaletteType::CatppuccinMocha => "Catppuccin (Mocha)",
            PaletteType::Nord => "Nord",
        }
    }
}

impl Theme {
    #[must_use]
    pub fn from_palette_type(t: PaletteType) -> Self {
        match t {
            PaletteType::CatppuccinMocha => Self::from_palette(&palette::CATPPUCCIN_MOCHA),
            PaletteType::Nord => Self::from_palette(&palette::NORD),
        }
    }

    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            border: Style::default().fg(p.surface2),
            border_focus: Style::default().fg(p.blue),

            header_logo: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_page: Style::default()
                .bg(p.surface1)
                .fg(p.text)
                .add_modifier(Modifier::BOLD),
            header_active: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_item: Style::default().bg(p.surface0).fg(p.text),
            header: Style::default().bg(p.base).fg(p.text),

            footer_segment_key: Style::default()
                .bg(p.surface0)
                .fg(p.blue)
                .add_modifier(Modifier::BOLD),
            footer_segment_val: Style::default().bg(p.crust).fg(p.subtext0),
            footer: Style::default().bg(p.crust).fg(p.subtext0),

            status_info: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_warn: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_error: Style::default()
                .bg(p.red)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),

            list_selected: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            list_item: Style::default().fg(p.text),
            list_icon: Style::default().fg(p.mauve),
            dimmed: Style::default().fg(p.overlay0).add_modifier(Modifier::DIM),

            editor_text: Style::default().fg(p.text).bg(p.base),
            editor_cursor: Style::default().bg(p.text).fg(p.base),
            editor_cursor_line: Style::default().bg(p.mantle),
            editor_selection: Style::default().bg(dim_color(p.teal, 0.35)),

            income: Style::default().fg(p.green),
            expense: Style::default().fg(p.peach),
            free_cash: Style::default().fg(p.teal).add_modifier(Modifier::BOLD),
            free_cash_negative: Style::default().fg(p.red).add_modifier(Modifier::BOLD),
            pending: Style::default().fg(p.overlay0).add_modifier(Modifier::ITALIC),
            group_title: Style::default().fg(p.mauve).add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette_type(PaletteType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        theme: PaletteType,
    }

    #[test]
    fn test_palette_names_in_config() {
        let w: Wrapper = toml::from_str("theme = \"catppuccin\"").unwrap();
        assert_eq!(w.theme, PaletteType::CatppuccinMocha);
        let w: Wrapper = toml::from_str("theme = \"nord\"").unwrap();
        assert_eq!(w.theme, PaletteType::Nord);
    }

    #[test]
    fn test_themes_differ() {
        assert_ne!(
            Theme::from_palette_type(PaletteType::Nord),
            Theme::from_palette_type(PaletteType::CatppuccinMocha)
        );
    }
}
