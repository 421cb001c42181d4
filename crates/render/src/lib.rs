//! Renderer for plaudit widgets.
//!
//! Layout variants turn a widget payload into a [`markup`] tree. Nothing in
//! this crate touches a live document: hosts serialize the tree to HTML or
//! walk it, and apply incremental updates by replacing subtrees.
//!
//! # Overview
//!
//! - [`markup`]: the [`Node`]/[`Element`] tree
//! - [`render`]: [`render_widget`] and [`render_error`]
//! - [`variants`]: carousel, grid, list, bar, badge and masonry bodies
//! - [`components`]: cards, stars, header, empty and error states
//! - [`modal`]: the single detail [`ModalManager`]
//! - [`pagination`]: [`WidgetRuntimeState`] and "Load More"
//! - [`context`]: [`RenderContext`]

pub mod components;
pub mod context;
pub mod markup;
pub mod modal;
pub mod pagination;
pub mod render;
pub mod variants;

pub use context::{DEFAULT_VIEWPORT_WIDTH, RenderContext};
pub use markup::{Element, Node};
pub use modal::{ModalEvent, ModalManager};
pub use pagination::{
    LoadMoreButton, LoadMoreOutcome, LoadStep, PageRequest, ShowLessOutcome, WidgetRuntimeState,
    load_more, show_less, show_more,
};
pub use render::{Rendered, render_error, render_widget};
