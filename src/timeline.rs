//! Vertical progress timeline for the roadmap panel.
//!
//! A rail with one marker per phase. The rail fills from the top down to
//! the active phase; markers above the active phase render as completed
//! dots, the active one as a numbered badge, the rest as dim dots.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::controller::{classify, BucketPolicy, PhaseStatus};
use crate::theme::{colors, styles};

const RAIL: char = '│';
const RAIL_HEAVY: char = '┃';
const DOT: char = '●';
const DOT_SMALL: char = '•';

/// Width the widget wants for itself
pub const TIMELINE_WIDTH: u16 = 5;

/// Row of each marker inside a rail of `height` rows
pub fn marker_rows(phase_count: usize, height: u16) -> Vec<u16> {
    match phase_count {
        0 => Vec::new(),
        1 => vec![height / 2],
        n => {
            let span = height.saturating_sub(1) as usize;
            (0..n)
                .map(|i| (i * span / (n - 1)) as u16)
                .collect()
        }
    }
}

/// Timeline rail widget
pub struct PhaseTimelineWidget {
    phase_count: usize,
    active: usize,
    /// Filled fraction of the rail in `[0, 1]`
    fill: f64,
}

impl PhaseTimelineWidget {
    pub fn new(phase_count: usize, active: usize) -> Self {
        Self {
            phase_count,
            active,
            fill: crate::controller::fill_ratio(active, phase_count),
        }
    }

    /// Override the fill, e.g. with an eased value
    pub fn fill(mut self, fill: f64) -> Self {
        self.fill = fill.clamp(0.0, 1.0);
        self
    }

    fn render_rail(&self, area: Rect, buf: &mut Buffer, x: u16, rows: &[u16]) {
        let (Some(&first), Some(&last)) = (rows.first(), rows.last()) else {
            return;
        };
        let length = last.saturating_sub(first);
        let filled_until = first + (self.fill * length as f64).round() as u16;

        for row in first..=last {
            let filled = row <= filled_until && self.fill > 0.0;
            let (symbol, color) = if filled {
                (RAIL_HEAVY, colors::ACCENT)
            } else {
                (RAIL, colors::RAIL)
            };
            if let Some(cell) = buf.cell_mut((x, area.y + row)) {
                cell.set_char(symbol);
                cell.set_style(Style::default().fg(color));
            }
        }
    }

    fn render_marker(&self, buf: &mut Buffer, x: u16, y: u16, position: usize) {
        match classify(position, self.active) {
            PhaseStatus::Completed => {
                buf.set_string(x, y, DOT_SMALL.to_string(), Style::default().fg(colors::ACCENT));
            }
            PhaseStatus::Current => {
                let badge = format!("({})", position + 1);
                let start = x.saturating_sub(badge.chars().count() as u16 / 2);
                buf.set_string(
                    start,
                    y,
                    badge,
                    Style::default()
                        .fg(colors::FG_PRIMARY)
                        .bg(colors::ACCENT)
                        .add_modifier(Modifier::BOLD),
                );
            }
            PhaseStatus::Upcoming => {
                buf.set_string(x, y, DOT.to_string(), Style::default().fg(colors::RAIL));
            }
        }
    }
}

impl Widget for PhaseTimelineWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height == 0 || self.phase_count == 0 {
            return;
        }

        let x = area.x + area.width / 2;
        let rows = marker_rows(self.phase_count, area.height);

        self.render_rail(area, buf, x, &rows);
        for (position, row) in rows.iter().enumerate() {
            self.render_marker(buf, x, area.y + row, position);
        }
    }
}

/// One-line summary of the controller state for the status bar
pub struct TimelineStatusWidget {
    active: usize,
    phase_count: usize,
    policy: BucketPolicy,
    listeners: usize,
}

impl TimelineStatusWidget {
    pub fn new(active: usize, phase_count: usize, policy: BucketPolicy, listeners: usize) -> Self {
        Self {
            active,
            phase_count,
            policy,
            listeners,
        }
    }
}

impl Widget for TimelineStatusWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fill = crate::controller::fill_ratio(self.active, self.phase_count) * 100.0;
        let phase = if self.active < self.phase_count {
            format!("Phase {}/{}", self.active + 1, self.phase_count)
        } else {
            format!("Phase {}/{} (placeholder)", self.active + 1, self.phase_count)
        };
        let listener = match self.listeners {
            0 => "detached".to_string(),
            n => format!("{} listener{}", n, if n == 1 { "" } else { "s" }),
        };
        let status = format!("{}  {:.0}%  {}  {}", phase, fill, self.policy.name(), listener);

        buf.set_stringn(area.x, area.y, &status, area.width as usize, styles::text_muted());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_marker_rows_span_height() {
        assert_eq!(marker_rows(6, 11), vec![0, 2, 4, 6, 8, 10]);
        assert_eq!(marker_rows(1, 10), vec![5]);
        assert!(marker_rows(0, 10).is_empty());
    }

    #[test]
    fn test_marker_states() {
        let area = Rect::new(0, 0, TIMELINE_WIDTH, 11);
        let mut buf = Buffer::empty(area);
        PhaseTimelineWidget::new(6, 2).render(area, &mut buf);

        assert!(row_text(&buf, 0).contains(DOT_SMALL));
        assert!(row_text(&buf, 2).contains(DOT_SMALL));
        assert!(row_text(&buf, 4).contains("(3)"));
        assert!(row_text(&buf, 6).contains(DOT));
        assert!(row_text(&buf, 10).contains(DOT));
    }

    #[test]
    fn test_rail_fill_stops_at_active_marker() {
        let area = Rect::new(0, 0, TIMELINE_WIDTH, 11);
        let mut buf = Buffer::empty(area);
        PhaseTimelineWidget::new(6, 2).render(area, &mut buf);

        let x = TIMELINE_WIDTH / 2;
        assert_eq!(buf[(x, 3)].symbol(), RAIL_HEAVY.to_string());
        assert_eq!(buf[(x, 5)].symbol(), RAIL.to_string());
    }

    #[test]
    fn test_placeholder_index_completes_every_marker() {
        let area = Rect::new(0, 0, TIMELINE_WIDTH, 11);
        let mut buf = Buffer::empty(area);
        PhaseTimelineWidget::new(6, 6).render(area, &mut buf);

        for row in marker_rows(6, 11) {
            assert!(row_text(&buf, row).contains(DOT_SMALL));
        }
    }

    #[test]
    fn test_status_line() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        TimelineStatusWidget::new(4, 6, BucketPolicy::Skewed, 1).render(area, &mut buf);
        let text = row_text(&buf, 0);
        assert!(text.contains("Phase 5/6"));
        assert!(text.contains("80%"));
        assert!(text.contains("1 listener"));
    }
}
