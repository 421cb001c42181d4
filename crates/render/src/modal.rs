//! The review detail modal.
//!
//! A page has at most one open modal. [`ModalManager`] owns it: opening a
//! review while another is open replaces it, and the close button, a click
//! on the overlay and the Escape key all close it.

use plaudit_protocol::ReviewRecord;
use tracing::debug;

use crate::components::{avatar, review_rating};
use crate::context::RenderContext;
use crate::markup::Element;

/// Key name that closes the modal.
pub const ESCAPE_KEY: &str = "Escape";

/// Id suffix of the modal overlay.
pub const MODAL_ID: &str = "modal";

/// An interaction with the open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent<'a> {
    /// The close button was clicked.
    CloseButton,
    /// The overlay around the dialog was clicked.
    OverlayClick,
    /// A key was pressed, named as in `KeyboardEvent.key`.
    Key(&'a str),
}

/// Owns the single detail modal.
///
/// # Examples
///
/// ```
/// use plaudit_protocol::ReviewRecord;
/// use plaudit_render::{ModalEvent, ModalManager};
///
/// let mut modal = ModalManager::default();
/// modal.open(ReviewRecord::new("Ada", 5.0, "First"));
/// modal.open(ReviewRecord::new("Bob", 4.0, "Second"));
/// assert_eq!(modal.current().map(|r| r.author.as_str()), Some("Bob"));
///
/// assert!(!modal.handle(ModalEvent::Key("Enter")));
/// assert!(modal.handle(ModalEvent::Key("Escape")));
/// assert!(!modal.is_open());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModalManager {
    open: Option<ReviewRecord>,
}

impl ModalManager {
    /// Opens `review`, replacing any open modal.
    pub fn open(&mut self, review: ReviewRecord) {
        if self.open.is_some() {
            debug!("replacing open modal");
        }
        self.open = Some(review);
    }

    /// Closes the modal. Returns `true` if one was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Handles an interaction. Returns `true` if the modal closed.
    pub fn handle(&mut self, event: ModalEvent<'_>) -> bool {
        match event {
            ModalEvent::CloseButton | ModalEvent::OverlayClick => self.close(),
            ModalEvent::Key(key) => self.handle_key(key),
        }
    }

    /// Closes the modal on Escape. Returns `true` if it closed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        (key == ESCAPE_KEY || key == "Esc") && self.close()
    }

    /// Returns `true` while a modal is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The review shown in the open modal.
    #[must_use]
    pub const fn current(&self) -> Option<&ReviewRecord> {
        self.open.as_ref()
    }

    /// Renders the open modal with the full review body.
    #[must_use]
    pub fn render(&self, ctx: &RenderContext) -> Option<Element> {
        let review = self.open.as_ref()?;
        let config = &ctx.config;
        let source = review.resolve_source(&ctx.hints);

        let mut dialog = Element::new("div")
            .class("plaudit-modal")
            .attr("role", "dialog")
            .attr("aria-modal", "true")
            .attr("aria-label", format!("Review by {}", review.author))
            .child(
                Element::new("button")
                    .class("plaudit-modal-close")
                    .attr("type", "button")
                    .attr("data-action", "close-modal")
                    .attr("aria-label", "Close")
                    .text("×"),
            );

        let mut heading = Element::new("div").class("plaudit-modal-header");
        if config.show_avatars {
            heading = heading.child(avatar(review));
        }
        heading = heading.child(Element::new("span").class("plaudit-author").text(review.author.as_str()));
        if config.show_dates
            && let Some(posted) = &review.posted_at
        {
            heading = heading.child(Element::new("span").class("plaudit-date").text(posted.display(ctx.now)));
        }
        dialog = dialog.child(heading);
        if config.show_ratings
            && let Some(rating) = review_rating(review, source)
        {
            dialog = dialog.child(rating);
        }
        dialog = dialog.child(Element::new("p").class("plaudit-modal-body").text(review.body()));

        Some(
            Element::new("div")
                .id(ctx.id(MODAL_ID))
                .class("plaudit-modal-overlay")
                .attr("data-action", "close-modal")
                .child(dialog),
        )
    }
}
