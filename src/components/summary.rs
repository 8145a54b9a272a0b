use crate::domain::currency::CurrencyFormat;
use crate::domain::models::Summary;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

/// Groups listed while the panel is collapsed.
const COLLAPSED_GROUPS: usize = 2;

/// Totals for the open page; `summary` is `None` until a page is loaded.
pub struct SummaryPanel<'a> {
    pub summary: Option<&'a Summary>,
    pub currency: &'a CurrencyFormat,
    pub expanded: bool,
    pub theme: &'a Theme,
}

impl SummaryPanel<'_> {
    fn row(&self, label: &str, value: String, style: Style) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!(" {label:<10}"), self.theme.list_item),
            Span::styled(value, style),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let theme = self.theme;
        let totals = self.summary.map(|s| s.totals);
        let value_style = |style: Style| if totals.is_some() { style } else { theme.pending };

        let free_style = match totals {
            Some(t) if t.free_cash < 0 => theme.free_cash_negative,
            _ => theme.free_cash,
        };

        let mut lines = vec![
            self.row(
                "Income",
                self.currency.display(totals.map(|t| t.total_income)),
                value_style(theme.income),
            ),
            self.row(
                "Expenses",
                self.currency.display(totals.map(|t| t.total_expense)),
                value_style(theme.expense),
            ),
            self.row(
                "Free cash",
                self.currency.display(totals.map(|t| t.free_cash)),
                value_style(free_style),
            ),
        ];

        let Some(summary) = self.summary else {
            return lines;
        };

        let shown = if self.expanded {
            summary.groups.len()
        } else {
            COLLAPSED_GROUPS
        };
        for group in summary.groups.iter().take(shown) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" {}", group.title),
                theme.group_title,
            )));
            if group.income_total != 0 {
                lines.push(self.row(
                    "  in",
                    self.currency.format(group.income_total),
                    theme.income,
                ));
            }
            if group.expense_total != 0 || group.income_total == 0 {
                lines.push(self.row(
                    "  out",
                    self.currency.format(group.expense_total),
                    theme.expense,
                ));
            }
        }

        let hidden = summary.groups.len().saturating_sub(shown);
        if hidden > 0 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" +{hidden} more (^E)"),
                theme.dimmed,
            )));
        }
        lines
    }
}

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.expanded { "SUMMARY ▾" } else { "SUMMARY ▸" };
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title, self.theme.header_item),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{EntryKind, LineItem};
    use crate::domain::summary::summarize;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(panel: SummaryPanel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(36, 14)).unwrap();
        terminal
            .draw(|f| f.render_widget(panel, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_pending_summary_shows_placeholders() {
        let theme = Theme::default();
        let currency = CurrencyFormat::default();
        let text = render(SummaryPanel {
            summary: None,
            currency: &currency,
            expanded: true,
            theme: &theme,
        });
        assert_eq!(text.matches("waiting..").count(), 3);
    }

    #[test]
    fn test_collapsed_panel_lists_first_groups() {
        let theme = Theme::default();
        let currency = CurrencyFormat::default();
        let summary = summarize(&[
            LineItem::new("Salary", 1_500_000, EntryKind::Income),
            LineItem::new("Food", 40_000, EntryKind::Expense),
            LineItem::new("Rent", 300_000, EntryKind::Expense),
        ]);

        let collapsed = render(SummaryPanel {
            summary: Some(&summary),
            currency: &currency,
            expanded: false,
            theme: &theme,
        });
        assert!(collapsed.contains("Rp 1.160.000"));
        assert!(collapsed.contains("Food"));
        assert!(!collapsed.contains("Rent"));
        assert!(collapsed.contains("+1 more"));

        let expanded = render(SummaryPanel {
            summary: Some(&summary),
            currency: &currency,
            expanded: true,
            theme: &theme,
        });
        assert!(expanded.contains("Rent"));
        assert!(expanded.contains("Rp 300.000"));
        assert!(!expanded.contains("more"));
    }
}
