//! Application state and event handling.
//!
//! Elm-style: one `App` struct holds all state, input handlers mutate it,
//! and `ui::render` draws it. Every change of the scroll offset is a scroll
//! signal for the controller while the roadmap is mounted.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::catalog;
use crate::config::Config;
use crate::controller::{PhaseChange, PhaseReceiver, ScrollController};
use crate::motion::{CardReveal, FillTween};
use crate::viewport::Viewport;

/// Rows moved per wheel notch
const WHEEL_STEP: i64 = 3;

/// Log entry for the message area
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

impl LogEntry {
    fn with_level(message: impl Into<String>, level: LogLevel) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, LogLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, LogLevel::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, LogLevel::Warning)
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Document scroll state
    pub viewport: Viewport,

    /// Active phase state machine
    pub controller: ScrollController,

    /// Change subscription, present while the roadmap is mounted
    subscription: Option<PhaseReceiver>,

    /// Eased timeline fill
    pub fill: FillTween,

    /// Card fade-in after a phase change
    pub reveal: CardReveal,

    /// Log messages
    pub logs: Vec<LogEntry>,
    /// Maximum number of log entries to keep
    max_logs: usize,

    /// Frame counter for animations
    pub frame_count: u64,

    /// Show help overlay
    pub show_help: bool,
}

impl App {
    /// Create the app and mount the roadmap
    pub fn new(config: &Config, viewport_height: u16) -> Self {
        let controller = ScrollController::new(catalog::phase_count(), config.controller);
        let mut app = Self {
            should_quit: false,
            viewport: Viewport::new(viewport_height, config.section_screens),
            controller,
            subscription: None,
            fill: FillTween::new(0.0),
            reveal: CardReveal::default(),
            logs: Vec::new(),
            max_logs: 100,
            frame_count: 0,
            show_help: false,
        };

        app.log(LogEntry::info(format!(
            "Roadmap loaded: {} phases, {} buckets",
            catalog::phase_count(),
            config.controller.bucket_policy.name()
        )));
        app.mount();
        app
    }

    /// Add a log entry
    pub fn log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn active_index(&self) -> usize {
        self.controller.active_index()
    }

    /// Subscribe to phase changes and establish the initial state
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }
        self.subscription = Some(self.controller.subscribe());
        tracing::info!("roadmap mounted");
        self.log(LogEntry::success("Scroll listener attached"));
        self.scroll_signal();
    }

    /// Release the subscription; later scroll events are ignored
    pub fn unmount(&mut self) {
        if self.subscription.take().is_none() {
            return;
        }
        self.controller.reset();
        tracing::info!("roadmap unmounted");
        self.log(LogEntry::warning("Scroll listener detached"));
    }

    /// Recompute the active phase from the current geometry
    pub fn scroll_signal(&mut self) -> Option<PhaseChange> {
        if !self.is_mounted() {
            return None;
        }
        self.controller.on_scroll(&self.viewport)
    }

    /// Scroll by `delta` rows and signal if the offset moved
    pub fn scroll_by(&mut self, delta: i64) {
        if self.viewport.scroll_by(delta) {
            self.scroll_signal();
        }
    }

    fn scroll_to(&mut self, y: u32) {
        if self.viewport.scroll_to(y) {
            self.scroll_signal();
        }
    }

    /// Scroll so that the phase after (or before) the active one activates
    pub fn jump_phase(&mut self, forward: bool) {
        let active = self.active_index();
        let last = self.controller.phase_count().saturating_sub(1);
        let target = if forward {
            if active >= last {
                return;
            }
            active + 1
        } else {
            active.saturating_sub(1).min(last)
        };
        if target == active {
            return;
        }

        let y = self.controller.activation_scroll(
            target,
            self.viewport.container_top() as f64,
            self.viewport.container_height() as f64,
            self.viewport.viewport_height() as f64,
        );
        self.scroll_to(y.max(0.0) as u32);
    }

    /// Terminal resized; geometry changed so recompute
    pub fn handle_resize(&mut self, viewport_height: u16) {
        self.viewport.set_viewport_height(viewport_height);
        self.scroll_signal();
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                self.show_help = false;
            }
            return;
        }

        let half_page = (self.viewport.viewport_height() / 2).max(1) as i64;

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(half_page),
            KeyCode::PageUp => self.scroll_by(-half_page),
            KeyCode::Char('g') | KeyCode::Home => {
                if self.viewport.scroll_to_top() {
                    self.scroll_signal();
                }
            }
            KeyCode::Char('G') | KeyCode::End => {
                if self.viewport.scroll_to_bottom() {
                    self.scroll_signal();
                }
            }
            KeyCode::Char('n') => self.jump_phase(true),
            KeyCode::Char('p') => self.jump_phase(false),
            KeyCode::Char('m') => {
                if self.is_mounted() {
                    self.unmount();
                } else {
                    self.mount();
                }
            }
            _ => {}
        }
    }

    /// Handle mouse wheel events
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP),
            _ => {}
        }
    }

    /// Update animations and drain change notifications (called every frame)
    pub fn tick(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);

        let change = self
            .subscription
            .as_mut()
            .and_then(|subscription| subscription.take_change());
        if let Some(index) = change {
            self.on_phase_changed(index);
        }

        self.fill.set_target(crate::controller::fill_ratio(
            self.active_index(),
            self.controller.phase_count(),
        ));
        self.fill.tick();
        self.reveal.tick();
    }

    fn on_phase_changed(&mut self, index: usize) {
        let view = catalog::resolve(index);
        let title = view.title().replace('\n', " ");
        tracing::info!(
            index,
            phase = view.id(),
            placeholder = view.is_placeholder(),
            "phase displayed"
        );

        if view.is_placeholder() {
            self.log(LogEntry::warning(format!(
                "Index {} is past the catalog, showing placeholder",
                index
            )));
        } else {
            self.log(LogEntry::info(format!("{} {}", view.label(), title)));
        }
        self.reveal.start();
    }

    /// Get the status bar text
    pub fn status_text(&self) -> String {
        format!(
            "row {}/{} ({:.0}%) | ?: Help | j/k: Scroll | n/p: Phase | m: Mount | q: Quit",
            self.viewport.scroll_y(),
            self.viewport.max_scroll(),
            self.viewport.document_progress() * 100.0
        )
    }
}
