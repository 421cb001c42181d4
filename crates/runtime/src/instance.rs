//! A widget bound to one container.
//!
//! Every rendered widget gets its own [`WidgetInstance`]: runtime state,
//! carousel engine and autoplay task are never shared between widgets on
//! the same page. Only the detail modal is page-wide.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use plaudit_carousel::{CarouselEngine, CarouselEvent, CarouselView};
use plaudit_fetch::WidgetDataClient;
use plaudit_protocol::Layout;
use plaudit_render::variants::carousel;
use plaudit_render::variants::list::REVIEWS_ID;
use plaudit_render::{
    Element, LoadMoreOutcome, ModalEvent, ModalManager, RenderContext, WidgetRuntimeState,
};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::error::{Result, RuntimeError};
use crate::host::HostPage;

/// The runtime clock. Reads tokio's clock so paused-time tests drive
/// autoplay deterministically.
pub(crate) fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Inner {
    page: Arc<dyn HostPage>,
    client: Arc<WidgetDataClient>,
    modal: Arc<Mutex<ModalManager>>,
    ctx: RenderContext,
    state: Mutex<WidgetRuntimeState>,
    carousel: Option<Mutex<CarouselEngine>>,
    markup: Mutex<Element>,
    wake: Notify,
    destroyed: AtomicBool,
}

impl Inner {
    fn publish(&self, markup: &Element) {
        self.page.update_container(&self.ctx.container_id, markup);
    }

    /// Patches the carousel markup to the engine's view and publishes it.
    fn sync_carousel(&self, engine: &CarouselEngine) -> CarouselView {
        let view = engine.view();
        let mut markup = lock(&self.markup);
        carousel::apply_view(&mut markup, &self.ctx, &view, engine.height_sync().as_ref());
        self.publish(&markup);
        view
    }

    fn with_engine<T>(&self, f: impl FnOnce(&mut CarouselEngine) -> T) -> Option<T> {
        if self.destroyed.load(Ordering::Acquire) {
            return None;
        }
        let mut engine = lock(self.carousel.as_ref()?);
        let result = f(&mut engine);
        self.sync_carousel(&engine);
        self.wake.notify_one();
        Some(result)
    }

    fn next_tick(&self) -> Option<Instant> {
        lock(self.carousel.as_ref()?).next_tick()
    }

    fn autoplay_tick(&self) {
        let Some(carousel) = self.carousel.as_ref() else {
            return;
        };
        let mut engine = lock(carousel);
        if engine.tick(now()).is_some() {
            trace!(container = %self.ctx.container_id, "autoplay advanced");
            self.sync_carousel(&engine);
        }
    }
}

/// A rendered widget and its interaction state.
///
/// Dropping the instance (or calling [`destroy`](Self::destroy)) stops its
/// autoplay task.
pub struct WidgetInstance {
    inner: Arc<Inner>,
    autoplay: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for WidgetInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetInstance")
            .field("container_id", &self.inner.ctx.container_id)
            .field("layout", &self.layout())
            .field("autoplay_task", &self.autoplay.is_some())
            .finish_non_exhaustive()
    }
}

impl WidgetInstance {
    /// Binds rendered markup to a container and starts interaction.
    ///
    /// Must be called inside a tokio runtime when the layout is a carousel,
    /// since the autoplay task is spawned here.
    pub(crate) fn mount(
        page: Arc<dyn HostPage>,
        client: Arc<WidgetDataClient>,
        modal: Arc<Mutex<ModalManager>>,
        ctx: RenderContext,
        state: WidgetRuntimeState,
        markup: Element,
    ) -> Self {
        let carousel = (state.layout == Layout::Carousel).then(|| {
            let container_width = page.container_width(&ctx.container_id);
            Mutex::new(CarouselEngine::new(
                state.displayable_reviews().len(),
                &ctx.config,
                page.viewport_width(),
                container_width,
                now(),
            ))
        });

        let inner = Arc::new(Inner {
            page,
            client,
            modal,
            ctx,
            state: Mutex::new(state),
            carousel,
            markup: Mutex::new(markup),
            wake: Notify::new(),
            destroyed: AtomicBool::new(false),
        });

        match &inner.carousel {
            Some(engine) => {
                inner.sync_carousel(&lock(engine));
            }
            None => inner.publish(&lock(&inner.markup)),
        }

        let autoplay = inner
            .carousel
            .is_some()
            .then(|| tokio::spawn(autoplay_loop(Arc::clone(&inner))));
        debug!(container = %inner.ctx.container_id, "widget mounted");

        Self { inner, autoplay }
    }

    /// Id of the container the widget lives in.
    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.inner.ctx.container_id
    }

    /// The rendered layout.
    #[must_use]
    pub fn layout(&self) -> Layout {
        lock(&self.inner.state).layout
    }

    /// A copy of the container markup.
    #[must_use]
    pub fn markup(&self) -> Element {
        lock(&self.inner.markup).clone()
    }

    /// The container markup as HTML.
    #[must_use]
    pub fn html(&self) -> String {
        lock(&self.inner.markup).to_html()
    }

    /// A snapshot of the load-more state.
    #[must_use]
    pub fn runtime_state(&self) -> WidgetRuntimeState {
        lock(&self.inner.state).clone()
    }

    /// The current carousel view, for carousel widgets.
    #[must_use]
    pub fn carousel_view(&self) -> Option<CarouselView> {
        Some(lock(self.inner.carousel.as_ref()?).view())
    }

    /// Feeds a pointer, arrow or dot event to the carousel.
    pub fn carousel_event(&self, event: CarouselEvent) -> Option<CarouselView> {
        self.inner.with_engine(|engine| engine.handle(event, now()))
    }

    /// The pointer entered the carousel; autoplay pauses.
    pub fn pointer_enter(&self) {
        self.inner.with_engine(CarouselEngine::pointer_enter);
    }

    /// The pointer left the carousel; autoplay resumes after a grace period.
    pub fn pointer_leave(&self) {
        self.inner.with_engine(|engine| engine.pointer_leave(now()));
    }

    /// The viewport or container was resized.
    pub fn resize(&self, viewport_width: f32, container_width: f32) -> Option<CarouselView> {
        self.inner
            .with_engine(|engine| engine.resize(viewport_width, container_width, now()))
    }

    /// Reports the rendered height of every slide, for height sync.
    pub fn set_measured_heights(&self, heights: Vec<f32>) {
        self.inner
            .with_engine(|engine| engine.set_measured_heights(heights));
    }

    /// Opens the detail modal for the review behind card `index`.
    ///
    /// Returns `false` if there is no such review.
    pub fn open_review(&self, index: usize) -> bool {
        let review = {
            let state = lock(&self.inner.state);
            state.displayable_reviews().get(index).map(|review| (*review).clone())
        };
        let Some(review) = review else {
            return false;
        };

        let mut modal = lock(&self.inner.modal);
        modal.open(review);
        self.inner.page.set_overlay(modal.render(&self.inner.ctx).as_ref());
        true
    }

    /// Forwards an interaction to the modal. Returns `true` if it closed.
    pub fn modal_event(&self, event: ModalEvent<'_>) -> bool {
        let closed = lock(&self.inner.modal).handle(event);
        if closed {
            self.inner.page.set_overlay(None);
        }
        closed
    }

    /// Loads the next page and re-renders the reviews list.
    ///
    /// Returns `false` when nothing changed (a load is already in flight or
    /// every review is loaded).
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Fetch`] when the page cannot be fetched, or
    /// [`RuntimeError::Destroyed`] after [`destroy`](Self::destroy).
    pub async fn load_more(&self) -> Result<bool> {
        if self.inner.destroyed.load(Ordering::Acquire) {
            return Err(RuntimeError::Destroyed);
        }
        let outcome =
            plaudit_render::load_more(&self.inner.state, &self.inner.client, &self.inner.ctx)
                .await?;
        match outcome {
            LoadMoreOutcome::Updated(subtree) => {
                self.replace_reviews(subtree);
                Ok(true)
            }
            LoadMoreOutcome::Unchanged => Ok(false),
        }
    }

    /// Re-displays reviews hidden by [`show_less`](Self::show_less).
    /// Returns `false` if none were hidden.
    pub fn show_more(&self) -> bool {
        match plaudit_render::show_more(&self.inner.state, &self.inner.ctx) {
            Some(subtree) => {
                self.replace_reviews(subtree);
                true
            }
            None => false,
        }
    }

    /// Collapses the reviews list and scrolls the widget into view.
    pub fn show_less(&self) {
        let outcome = plaudit_render::show_less(&self.inner.state, &self.inner.ctx);
        self.replace_reviews(outcome.subtree);
        self.inner.page.scroll_into_view(&outcome.scroll_to);
    }

    /// Stops autoplay and detaches the instance from the page.
    pub fn destroy(&mut self) {
        self.inner.destroyed.store(true, Ordering::Release);
        if let Some(task) = self.autoplay.take() {
            task.abort();
        }
        debug!(container = %self.inner.ctx.container_id, "widget destroyed");
    }

    /// Returns `true` once [`destroy`](Self::destroy) was called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.load(Ordering::Acquire)
    }

    fn replace_reviews(&self, subtree: Element) {
        let mut markup = lock(&self.inner.markup);
        if markup.replace_by_id(&self.inner.ctx.id(REVIEWS_ID), subtree) {
            self.inner.publish(&markup);
        }
    }
}

impl Drop for WidgetInstance {
    fn drop(&mut self) {
        if let Some(task) = self.autoplay.take() {
            task.abort();
        }
    }
}

async fn autoplay_loop(inner: Arc<Inner>) {
    loop {
        let woken = inner.wake.notified();
        match inner.next_tick() {
            Some(deadline) => {
                tokio::select! {
                    () = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => {
                        inner.autoplay_tick();
                    }
                    () = woken => {}
                }
            }
            None => woken.await,
        }
    }
}
