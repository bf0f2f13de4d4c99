//! Summary and detail cards for the active phase.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

use crate::catalog::PhaseView;
use crate::theme::{blend, colors, styles};

/// Apply the reveal dimming to a style
fn reveal(style: Style, dimmed: bool) -> Style {
    if dimmed {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

/// Left card: phase label, title and illustration
pub struct SummaryCardWidget {
    view: PhaseView,
    dimmed: bool,
}

impl SummaryCardWidget {
    pub fn new(view: PhaseView) -> Self {
        Self {
            view,
            dimmed: false,
        }
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn render_illustration(&self, area: Rect, buf: &mut Buffer) {
        let frame = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::FG_ON_ACCENT_DIM))
            .style(Style::default().bg(colors::ACCENT));
        let inner = frame.inner(area);
        frame.render(area, buf);

        let text = vec![
            Line::from(Span::styled(
                format!("▣ {}", self.view.illustration()),
                reveal(styles::text(), self.dimmed),
            )),
            Line::from(Span::styled(
                self.view.illustration_alt(),
                reveal(styles::summary_label(), self.dimmed)
                    .remove_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::ITALIC),
            )),
        ];
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

impl Widget for SummaryCardWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let surface = if self.dimmed {
            blend(colors::BG_DARK, colors::BG_SUMMARY, 0.6)
        } else {
            colors::BG_SUMMARY
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(surface))
            .style(Style::default().bg(surface));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // Text on the upper half, illustration from halfway down
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let mut lines = vec![
            Line::from(Span::styled(
                self.view.label().to_uppercase(),
                reveal(styles::summary_label(), self.dimmed),
            )),
            Line::from(""),
        ];
        lines.extend(self.view.title_lines().into_iter().map(|line| {
            Line::from(Span::styled(line, reveal(styles::section_title(), self.dimmed)))
        }));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        if chunks[1].height >= 3 {
            self.render_illustration(chunks[1], buf);
        }
    }
}

/// Right card: section header and bullets separated by rules
pub struct DetailCardWidget {
    view: PhaseView,
    dimmed: bool,
}

impl DetailCardWidget {
    pub fn new(view: PhaseView) -> Self {
        Self {
            view,
            dimmed: false,
        }
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }
}

impl Widget for DetailCardWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border_dim())
            .style(Style::default().bg(colors::BG_CARD));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width == 0 {
            return;
        }

        let header_area = Rect::new(inner.x, inner.y, inner.width, 2);
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!(" {}", self.view.section_header()),
                reveal(styles::section_title(), self.dimmed),
            )),
            Line::from(Span::styled(
                "─".repeat(inner.width as usize),
                styles::divider(),
            )),
        ])
        .render(header_area, buf);

        let body = Rect::new(
            inner.x,
            inner.y + 2,
            inner.width,
            inner.height.saturating_sub(2),
        );
        let bullets = self.view.bullets();
        if bullets.is_empty() || body.height == 0 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Fill(1); bullets.len()])
            .split(body);

        let last = bullets.len() - 1;
        for (index, (bullet, row)) in bullets.iter().zip(rows.iter()).enumerate() {
            let (text_area, rule_row) = if index != last && row.height > 1 {
                (
                    Rect::new(row.x, row.y, row.width, row.height - 1),
                    Some(row.y + row.height - 1),
                )
            } else {
                (*row, None)
            };

            Paragraph::new(Line::from(Span::styled(
                bullet.clone(),
                reveal(styles::text_muted(), self.dimmed),
            )))
            .wrap(Wrap { trim: true })
            .block(Block::default().padding(Padding::horizontal(1)))
            .render(text_area, buf);

            if let Some(y) = rule_row {
                buf.set_string(row.x, y, "─".repeat(row.width as usize), styles::divider());
            }
        }
    }
}
