//! The seam between the runtime and the page it runs in.
//!
//! A browser host implements these traits over the live document. The
//! [`StaticPage`] implementation keeps everything in memory; the CLI uses it
//! to render HTML and tests use it to observe what the runtime did.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, PoisonError};

use futures::FutureExt;
use futures::future::BoxFuture;
use plaudit_render::Element;
use tracing::debug;

use crate::registry::ModuleRegistry;

/// Script injection and global exports.
pub trait ScriptHost: Send + Sync {
    /// Appends `<script src=url>` to the page. The future resolves when the
    /// script fires `load`, or with the reason when it fires `error`.
    fn inject_script<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<(), String>>;

    /// Returns `true` if a global named `export` exists.
    fn has_export(&self, export: &str) -> bool;
}

/// Containers and geometry of the host page.
pub trait HostPage: Send + Sync {
    /// Returns `true` if an element with `id` exists.
    fn has_container(&self, id: &str) -> bool;

    /// Creates an empty container right after the loader script tag.
    fn insert_container_after_script(&self, id: &str);

    /// Replaces the content of container `id` with `content`'s children.
    fn update_container(&self, id: &str, content: &Element);

    /// Shows `overlay` above the page, or removes the overlay.
    fn set_overlay(&self, overlay: Option<&Element>);

    /// Scrolls container `id` into view.
    fn scroll_into_view(&self, id: &str);

    /// Current viewport width in pixels.
    fn viewport_width(&self) -> f32;

    /// Width of container `id` in pixels.
    fn container_width(&self, id: &str) -> f32;

    /// `src` of the script currently executing, when the host knows it.
    fn current_script_src(&self) -> Option<String>;

    /// `src` of every `<script>` on the page, in document order.
    fn script_srcs(&self) -> Vec<String>;
}

/// An in-memory page.
///
/// Injected scripts "load" immediately and register the export their
/// module declares in the [`ModuleRegistry`], the way a built variant
/// bundle self-registers.
///
/// # Examples
///
/// ```
/// use plaudit_render::Element;
/// use plaudit_runtime::{HostPage, StaticPage};
///
/// let page = StaticPage::new(1280.0);
/// page.add_container("reviews");
/// page.update_container("reviews", &Element::new("div").text("hi"));
/// assert_eq!(page.container_html("reviews").as_deref(), Some(r#"<div id="reviews">hi</div>"#));
/// ```
#[derive(Debug)]
pub struct StaticPage {
    viewport_width: f32,
    registry: Option<ModuleRegistry>,
    loader_script: Option<String>,
    page_scripts: Mutex<Vec<String>>,
    containers: Mutex<BTreeMap<String, Element>>,
    exports: Mutex<HashSet<String>>,
    injected: Mutex<Vec<String>>,
    overlay: Mutex<Option<Element>>,
    scrolled: Mutex<Vec<String>>,
}

impl StaticPage {
    /// Creates an empty page with the given viewport width.
    #[must_use]
    pub fn new(viewport_width: f32) -> Self {
        Self {
            viewport_width,
            registry: None,
            loader_script: None,
            page_scripts: Mutex::new(Vec::new()),
            containers: Mutex::new(BTreeMap::new()),
            exports: Mutex::new(HashSet::new()),
            injected: Mutex::new(Vec::new()),
            overlay: Mutex::new(None),
            scrolled: Mutex::new(Vec::new()),
        }
    }

    /// Lets injected module scripts register their exports.
    #[must_use]
    pub fn with_modules(mut self, registry: ModuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Runs the page as if the loader was included as `<script src=src>`.
    #[must_use]
    pub fn with_loader_script(mut self, src: impl Into<String>) -> Self {
        self.loader_script = Some(src.into());
        self
    }

    /// Adds a `<script src=src>` tag that was on the page before the loader.
    pub fn add_script(&self, src: &str) {
        lock(&self.page_scripts).push(src.to_string());
    }

    /// Adds an empty container.
    pub fn add_container(&self, id: &str) {
        lock(&self.containers).insert(id.to_string(), Element::new("div").id(id));
    }

    /// Registers a global export directly.
    pub fn register_export(&self, export: &str) {
        lock(&self.exports).insert(export.to_string());
    }

    /// The container element `id`.
    #[must_use]
    pub fn container(&self, id: &str) -> Option<Element> {
        lock(&self.containers).get(id).cloned()
    }

    /// Serializes container `id`.
    #[must_use]
    pub fn container_html(&self, id: &str) -> Option<String> {
        self.container(id).map(|container| container.to_html())
    }

    /// Ids of every container, in order.
    #[must_use]
    pub fn container_ids(&self) -> Vec<String> {
        lock(&self.containers).keys().cloned().collect()
    }

    /// Script URLs injected so far.
    #[must_use]
    pub fn injected_scripts(&self) -> Vec<String> {
        lock(&self.injected).clone()
    }

    /// The current overlay.
    #[must_use]
    pub fn overlay(&self) -> Option<Element> {
        lock(&self.overlay).clone()
    }

    /// Containers scrolled into view so far.
    #[must_use]
    pub fn scrolled(&self) -> Vec<String> {
        lock(&self.scrolled).clone()
    }
}

impl ScriptHost for StaticPage {
    fn inject_script<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<(), String>> {
        lock(&self.injected).push(url.to_string());
        let export = self
            .registry
            .as_ref()
            .and_then(|registry| registry.layout_for_url(url).and_then(|l| registry.spec(l)))
            .map(|spec| spec.export_name);
        if let Some(export) = export {
            debug!(url, export, "module registered");
            self.register_export(export);
        }
        futures::future::ready(Ok(())).boxed()
    }

    fn has_export(&self, export: &str) -> bool {
        lock(&self.exports).contains(export)
    }
}

impl HostPage for StaticPage {
    fn has_container(&self, id: &str) -> bool {
        lock(&self.containers).contains_key(id)
    }

    fn insert_container_after_script(&self, id: &str) {
        self.add_container(id);
    }

    fn update_container(&self, id: &str, content: &Element) {
        if let Some(container) = lock(&self.containers).get_mut(id) {
            container.children.clone_from(&content.children);
        }
    }

    fn set_overlay(&self, overlay: Option<&Element>) {
        *lock(&self.overlay) = overlay.cloned();
    }

    fn scroll_into_view(&self, id: &str) {
        lock(&self.scrolled).push(id.to_string());
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn container_width(&self, _id: &str) -> f32 {
        self.viewport_width
    }

    fn current_script_src(&self) -> Option<String> {
        self.loader_script.clone()
    }

    fn script_srcs(&self) -> Vec<String> {
        let mut srcs = lock(&self.page_scripts).clone();
        srcs.extend(self.loader_script.iter().cloned());
        srcs.extend(lock(&self.injected).iter().cloned());
        srcs
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
