//! Terminal events and key mappings.
//!
//! Crossterm events become [`Message`]s; the [`App`](crate::App) applies
//! them to the preview.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};

/// Longest time the run loop waits for input before redrawing.
pub const MAX_POLL: Duration = Duration::from_millis(100);

/// Something the preview should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Leave the preview.
    Quit,
    /// Previous slide.
    Prev,
    /// Next slide.
    Next,
    /// The left dot.
    DotPrev,
    /// The right dot.
    DotNext,
    /// Open the detail modal for the first visible review.
    OpenModal,
    /// Close the modal, or the help overlay.
    Escape,
    /// Show or hide the key bindings.
    ToggleHelp,
    /// Left button pressed at a column.
    PointerDown {
        /// Terminal column.
        column: u16,
    },
    /// Pointer dragged to a column.
    PointerMove {
        /// Terminal column.
        column: u16,
    },
    /// Left button released at a column.
    PointerUp {
        /// Terminal column.
        column: u16,
    },
    /// The pointer moved without a button, at a cell.
    Hover {
        /// Terminal column.
        column: u16,
        /// Terminal row.
        row: u16,
    },
    /// The terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

/// Waits up to `timeout` for a terminal event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts a terminal event to a message, if it maps to one.
#[must_use]
pub fn event_to_message(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) => key_to_message(*key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Message::PointerDown {
                column: mouse.column,
            }),
            MouseEventKind::Drag(MouseButton::Left) => Some(Message::PointerMove {
                column: mouse.column,
            }),
            MouseEventKind::Up(MouseButton::Left) => Some(Message::PointerUp {
                column: mouse.column,
            }),
            MouseEventKind::Moved => Some(Message::Hover {
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        Event::Resize(width, height) => Some(Message::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

/// Converts a key press to a message.
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C`, `q` | Quit |
/// | `←` / `→` | Previous / next slide |
/// | `[` / `]` | Left / right dot |
/// | `Enter` | Open the first visible review |
/// | `Esc` | Close the modal or help |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Left => Some(Message::Prev),
        KeyCode::Right => Some(Message::Next),
        KeyCode::Char('[') => Some(Message::DotPrev),
        KeyCode::Char(']') => Some(Message::DotNext),
        KeyCode::Enter => Some(Message::OpenModal),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        _ => None,
    }
}
