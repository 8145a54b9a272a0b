use crate::domain::models::PageMeta;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use std::ops::{Deref, DerefMut};
use tui_textarea::TextArea;

/// `TextArea` with the comparisons and cloning `AppState` needs.
#[derive(Default)]
pub struct AppTextArea<'a>(pub TextArea<'a>);

impl AppTextArea<'_> {
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let lines: Vec<String> = if body.is_empty() {
            vec![String::new()]
        } else {
            body.lines().map(str::to_string).collect()
        };
        Self(TextArea::new(lines))
    }

    #[must_use]
    pub fn body(&self) -> String {
        let mut body = self.0.lines().join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        body
    }
}

impl Clone for AppTextArea<'_> {
    fn clone(&self) -> Self {
        let mut area = TextArea::new(self.0.lines().to_vec());
        let (row, col) = self.0.cursor();
        area.move_cursor(crate::app::editor::jump(row, col));
        Self(area)
    }
}

impl std::fmt::Debug for AppTextArea<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTextArea")
            .field("lines", &self.0.lines())
            .field("cursor", &self.0.cursor())
            .finish()
    }
}

impl PartialEq for AppTextArea<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.lines() == other.0.lines() && self.0.cursor() == other.0.cursor()
    }
}

impl<'a> Deref for AppTextArea<'a> {
    type Target = TextArea<'a>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AppTextArea<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Widget for &AppTextArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.0, area, buf);
    }
}

/// The page open in the editor pane.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState<'a> {
    pub text_area: AppTextArea<'a>,
    pub page: Option<PageMeta>,
    pub dirty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_round_trips_lines() {
        let area = AppTextArea::from_body("# Nov\n+100 salary\n");
        assert_eq!(area.lines(), ["# Nov", "+100 salary"]);
        assert_eq!(area.body(), "# Nov\n+100 salary\n");
    }

    #[test]
    fn test_empty_body_has_one_line() {
        let area = AppTextArea::from_body("");
        assert_eq!(area.lines().len(), 1);
        assert_eq!(area.body(), "");
    }
}
