//! UI rendering module.
//!
//! Draws the scrolling document (intro, sticky roadmap panel, outro) plus
//! the header, log panel, status line and help overlay.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::{App, LogLevel};
use crate::cards::{DetailCardWidget, SummaryCardWidget};
use crate::catalog;
use crate::theme::{colors, styles};
use crate::timeline::{PhaseTimelineWidget, TimelineStatusWidget, TIMELINE_WIDTH};

const HEADER_HEIGHT: u16 = 3;
const LOG_HEIGHT: u16 = 5;
const STATUS_HEIGHT: u16 = 1;

/// Split the screen into header, document, log and status rows
fn screen_layout(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Rows available to the scrolling document on a screen of `area`
pub fn document_viewport_height(area: Rect) -> u16 {
    screen_layout(area)[1].height
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, area);

    let [header, document, logs, status] = screen_layout(area);

    render_header(frame, app, header);
    render_document(frame.buffer_mut(), app, document);
    render_logs(frame, app, logs);
    render_status(frame, app, status);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Roadmap ")
        .title_style(styles::title())
        .borders(Borders::ALL)
        .border_style(styles::border_dim())
        .style(Style::default().bg(colors::BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(
        TimelineStatusWidget::new(
            app.active_index(),
            app.controller.phase_count(),
            app.controller.config().bucket_policy,
            app.controller.subscriber_count(),
        ),
        inner,
    );
}

/// Draw `draw` into an off-screen buffer the size of `area` and copy the
/// rows that land inside `area` when shifted down by `offset`.
fn blit_section<F>(buf: &mut Buffer, area: Rect, offset: i64, draw: F)
where
    F: FnOnce(Rect, &mut Buffer),
{
    let height = area.height as i64;
    if offset >= height || offset + height <= 0 {
        return;
    }

    let local = Rect::new(0, 0, area.width, area.height);
    let mut scratch = Buffer::empty(local);
    draw(local, &mut scratch);

    for row in 0..area.height {
        let screen_row = offset + row as i64;
        if !(0..height).contains(&screen_row) {
            continue;
        }
        for col in 0..area.width {
            let source = scratch[(col, row)].clone();
            if let Some(target) = buf.cell_mut((area.x + col, area.y + screen_row as u16)) {
                *target = source;
            }
        }
    }
}

fn render_document(buf: &mut Buffer, app: &App, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let viewport = &app.viewport;
    blit_section(buf, area, viewport.intro_offset(), render_intro);
    blit_section(buf, area, viewport.panel_offset(), |rect, scratch| {
        render_roadmap_panel(scratch, app, rect)
    });
    blit_section(buf, area, viewport.outro_offset(), render_outro);
}

fn render_intro(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("ROADMAP", styles::eyebrow())),
        Line::from(""),
        Line::from(Span::styled("Building the platform, one phase at a time", styles::section_title())),
        Line::from(""),
        Line::from(Span::styled("scroll ↓  (j / wheel / PgDn)", styles::text_hint())),
    ];
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, area.y + top, area.width, area.height - top), buf);
}

fn render_outro(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("That's the roadmap.", styles::section_title())),
        Line::from(""),
        Line::from(Span::styled("g / Home to go back to the top", styles::text_hint())),
    ];
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, area.y + top, area.width, area.height - top), buf);
}

/// The sticky roadmap panel: heading, timeline, both cards, button
fn render_roadmap_panel(buf: &mut Buffer, app: &App, area: Rect) {
    Block::default()
        .style(Style::default().bg(colors::BG_DARK))
        .render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Heading
            Constraint::Min(6),    // Timeline + cards
            Constraint::Length(3), // Whitepaper button
        ])
        .split(area);

    let heading = vec![
        Line::from(Span::styled("PRODUCT ROADMAP", styles::eyebrow())),
        Line::from(Span::styled("Engineering Updates &", styles::section_title())),
        Line::from(Span::styled("Development Phase", styles::section_title())),
    ];
    Paragraph::new(heading)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(TIMELINE_WIDTH),
            Constraint::Length(2),
            Constraint::Percentage(30),
            Constraint::Length(2),
            Constraint::Min(20),
        ])
        .horizontal_margin(2)
        .split(chunks[1]);

    let active = app.active_index();
    let view = catalog::resolve(active);
    let dimmed = app.reveal.is_revealing();

    PhaseTimelineWidget::new(catalog::phase_count(), active)
        .fill(app.fill.value())
        .render(body[0], buf);
    SummaryCardWidget::new(view).dimmed(dimmed).render(body[2], buf);
    DetailCardWidget::new(view).dimmed(dimmed).render(body[4], buf);

    render_whitepaper_button(buf, chunks[2]);
}

/// Inert call to action
fn render_whitepaper_button(buf: &mut Buffer, area: Rect) {
    let label = " Read Whitepaper ↗ ";
    let width = label.chars().count() as u16;
    if area.height == 0 || area.width < width {
        return;
    }
    let x = area.x + (area.width - width) / 2;
    let y = area.y + area.height / 2;
    buf.set_string(x, y, label, styles::button());
}

fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .logs
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| {
            let (prefix, style) = match entry.level {
                LogLevel::Info => ("i", styles::info()),
                LogLevel::Success => ("+", styles::success()),
                LogLevel::Warning => ("!", styles::warning()),
            };

            ListItem::new(Line::from(vec![
                Span::styled(entry.timestamp.format("%H:%M:%S ").to_string(), styles::text_hint()),
                Span::styled(format!("[{}] ", prefix), style),
                Span::styled(entry.message.as_str(), styles::text_muted()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" System Log ")
            .title_style(Style::default().fg(colors::FG_MUTED))
            .borders(Borders::ALL)
            .border_style(styles::border_dim())
            .style(Style::default().bg(colors::BG_DARK)),
    );

    frame.render_widget(list, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(Line::from(Span::styled(app.status_text(), styles::text_hint())))
        .style(Style::default().bg(colors::BG_DIM));
    frame.render_widget(status, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 16, area);
    frame.render_widget(Clear, popup_area);

    let key = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<16}", keys), Style::default().fg(colors::ACCENT_SOFT)),
            Span::raw(action),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(colors::ACCENT_SOFT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        key("j/k, Up/Down", "Scroll one row"),
        key("Wheel", "Scroll three rows"),
        key("Space/PgDn, PgUp", "Scroll half a screen"),
        key("g/Home, G/End", "Top / bottom"),
        key("n / p", "Next / previous phase"),
        key("m", "Mount / unmount roadmap"),
        key("?", "Toggle this help"),
        key("q/Esc", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Press ? or Esc to close", styles::text_hint())),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Help ")
                .title_style(styles::title())
                .borders(Borders::ALL)
                .border_style(styles::border())
                .style(Style::default().bg(colors::BG_CARD)),
        );

    frame.render_widget(help, popup_area);
}

/// Center a fixed-size popup inside `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
