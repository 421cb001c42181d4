//! The preview application and its run loop.

use std::time::{Duration, Instant};

use plaudit_carousel::{CarouselEvent, DotSlot};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
};
use tracing::debug;

use crate::{
    event::{MAX_POLL, Message, event_to_message, poll_event},
    layout::{CONTROLS_HEIGHT, HEADER_HEIGHT, MIN_HEIGHT, MIN_WIDTH, STATUS_HEIGHT, columns_to_px},
    state::PreviewState,
    terminal::PreviewTerminal,
    widgets::{
        CardContext, render_controls, render_header, render_help_overlay, render_review_modal,
        render_status_bar, render_track,
    },
};

/// The terminal preview.
#[derive(Debug)]
pub struct App {
    state: PreviewState,
    should_quit: bool,
    /// Where the track was drawn last, for pointer hit-testing.
    track_area: Rect,
}

impl App {
    /// Creates the application around a preview state.
    #[must_use]
    pub fn new(state: PreviewState) -> Self {
        Self {
            state,
            should_quit: false,
            track_area: Rect::default(),
        }
    }

    /// The preview state.
    #[must_use]
    pub const fn state(&self) -> &PreviewState {
        &self.state
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies a message.
    ///
    /// Overlays capture input: while help is shown any key dismisses it,
    /// and while the modal is open only `Esc` and quitting do anything.
    pub fn update(&mut self, msg: Message, now: Instant) {
        if msg == Message::Quit {
            self.should_quit = true;
            return;
        }
        if let Message::Resize { width, .. } = msg {
            self.state.resize(width, now);
            return;
        }

        if self.state.help_visible {
            if !matches!(msg, Message::Hover { .. } | Message::PointerMove { .. }) {
                self.state.help_visible = false;
            }
            return;
        }
        if self.state.modal.is_open() {
            if msg == Message::Escape {
                self.state.escape();
            }
            return;
        }

        let event = match msg {
            Message::Prev => CarouselEvent::Prev,
            Message::Next => CarouselEvent::Next,
            Message::DotPrev => CarouselEvent::Dot(DotSlot::Previous),
            Message::DotNext => CarouselEvent::Dot(DotSlot::Next),
            Message::PointerDown { column } => CarouselEvent::PointerDown {
                x: self.pointer_x(column),
            },
            Message::PointerMove { column } => CarouselEvent::PointerMove {
                x: self.pointer_x(column),
            },
            Message::PointerUp { column } => CarouselEvent::PointerUp {
                x: self.pointer_x(column),
            },
            Message::Hover { column, row } => {
                let inside = self.track_area.contains(Position::new(column, row));
                self.state.set_hovered(inside, now);
                return;
            }
            Message::OpenModal => {
                self.state.open_first_visible();
                return;
            }
            Message::Escape => {
                self.state.escape();
                return;
            }
            Message::ToggleHelp => {
                self.state.toggle_help();
                return;
            }
            Message::Quit | Message::Resize { .. } => return,
        };
        let view = self.state.handle(event, now);
        debug!(index = view.index, ?event, "carousel updated");
    }

    /// Advances autoplay if a tick is due. Returns `true` if it moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.state.engine.tick(now).is_some()
    }

    /// How long the run loop may wait for input before the next tick.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.state
            .engine
            .next_tick()
            .map_or(MAX_POLL, |deadline| {
                deadline.saturating_duration_since(now).min(MAX_POLL)
            })
    }

    fn pointer_x(&self, column: u16) -> f32 {
        columns_to_px(column.saturating_sub(self.track_area.x))
    }

    /// Draws the preview.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let message = format!(
                "Terminal too small ({}×{})\nMinimum: {MIN_WIDTH}×{MIN_HEIGHT} (w×h)",
                area.width, area.height
            );
            frame.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: false }),
                area,
            );
            return;
        }

        let [header_area, track_area, controls_area, status_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(CONTROLS_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .areas(area);
        self.track_area = track_area;

        let state = &self.state;
        let view = state.view();
        let buf = frame.buffer_mut();
        render_header(
            state.business_name.as_deref(),
            &state.aggregate,
            state.total_review_count,
            header_area,
            buf,
        );
        render_track(state, track_area, buf);
        render_controls(&view, controls_area, buf);
        render_status_bar(state.engine.autoplay(), status_area, buf);

        if let Some(review) = state.modal.current() {
            let ctx = CardContext {
                config: &state.config,
                hints: &state.hints,
                now: state.now,
            };
            render_review_modal(review, &ctx, area, buf);
        }
        if state.help_visible {
            render_help_overlay(area, buf);
        }
    }

    /// Runs until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or reading the terminal fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Instant;
    /// use chrono::Utc;
    /// use plaudit_config::WidgetConfig;
    /// use plaudit_protocol::dummy::sample_payload;
    /// use plaudit_tui::{App, PreviewState, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     terminal::install_panic_hook();
    ///     let mut terminal = terminal::TerminalGuard::new()?;
    ///     let width = terminal.size()?.width;
    ///     let state = PreviewState::new(&sample_payload(), WidgetConfig::new("w"), width, Instant::now(), Utc::now());
    ///     App::new(state).run(&mut terminal).await?;
    ///     terminal.restore()?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut PreviewTerminal) -> anyhow::Result<()> {
        let width = terminal.size()?.width;
        self.state.resize(width, Instant::now());

        while !self.should_quit {
            terminal.draw(|frame| self.view(frame))?;

            let timeout = self.poll_timeout(Instant::now());
            if let Some(event) = poll_event(timeout)?
                && let Some(msg) = event_to_message(&event)
            {
                self.update(msg, Instant::now());
            }
            self.tick(Instant::now());
            tokio::task::yield_now().await;
        }
        Ok(())
    }
}
