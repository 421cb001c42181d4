//! Terminal setup and teardown.
//!
//! The preview runs in raw mode on the alternate screen with mouse capture
//! on, so drags reach the carousel. [`TerminalGuard`] undoes all of that
//! when it goes out of scope, and [`install_panic_hook`] does the same when
//! the preview panics.

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

/// The terminal type the preview draws on.
pub type PreviewTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Error type for terminal operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Failed to initialize the terminal.
    #[error("failed to set up terminal: {0}")]
    Setup(#[source] io::Error),

    /// Failed to restore the terminal.
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
}

/// Enters raw mode and the alternate screen, with mouse capture.
///
/// # Errors
///
/// Returns [`TerminalError::Setup`] if any terminal operation fails.
pub fn setup_terminal() -> Result<PreviewTerminal, TerminalError> {
    enable_raw_mode().map_err(TerminalError::Setup)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(TerminalError::Setup)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(TerminalError::Setup)
}

/// Leaves raw mode and the alternate screen and shows the cursor.
///
/// # Errors
///
/// Returns [`TerminalError::Restore`] if any terminal operation fails.
pub fn restore_terminal(terminal: &mut PreviewTerminal) -> Result<(), TerminalError> {
    disable_raw_mode().map_err(TerminalError::Restore)?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .map_err(TerminalError::Restore)?;
    terminal.show_cursor().map_err(TerminalError::Restore)
}

/// Installs a panic hook that restores the terminal first.
///
/// Call it once, before [`setup_terminal`]. The previous hook still runs
/// afterwards, so the panic message lands on the normal screen.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// A set-up terminal that restores itself on drop.
///
/// # Examples
///
/// ```no_run
/// use plaudit_tui::terminal::TerminalGuard;
///
/// # fn main() -> anyhow::Result<()> {
/// let mut terminal = TerminalGuard::new()?;
/// terminal.draw(|frame| frame.render_widget("hello", frame.area()))?;
/// terminal.restore()?;
/// # Ok(())
/// # }
/// ```
pub struct TerminalGuard {
    terminal: PreviewTerminal,
    restored: bool,
}

impl TerminalGuard {
    /// Sets the terminal up.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Setup`] if any terminal operation fails.
    pub fn new() -> Result<Self, TerminalError> {
        Ok(Self {
            terminal: setup_terminal()?,
            restored: false,
        })
    }

    /// Restores the terminal now, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Restore`] if any terminal operation fails.
    pub fn restore(&mut self) -> Result<(), TerminalError> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        restore_terminal(&mut self.terminal)
    }
}

impl Deref for TerminalGuard {
    type Target = PreviewTerminal;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(error = %err, "terminal left in a modified state");
        }
    }
}
