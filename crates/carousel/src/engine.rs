//! A carousel instance: state, autoplay and height sync together.

use std::time::{Duration, Instant};

use plaudit_config::{CardsPerBreakpoint, WidgetConfig};
use tracing::{debug, trace};

use crate::autoplay::AutoplayController;
use crate::height::HeightSync;
use crate::state::{CarouselEvent, CarouselState};
use crate::view::CarouselView;
use crate::visible::visible_slides;

/// Drives one carousel.
///
/// The engine owns a [`CarouselState`] and feeds it events, pauses and
/// resumes autoplay around interactions, and keeps the measured slide
/// heights used for [`HeightSync`].
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use plaudit_carousel::{CarouselEngine, CarouselEvent};
/// use plaudit_config::WidgetConfig;
///
/// let start = Instant::now();
/// let config = WidgetConfig::new("w_1");
/// // 1100px is a laptop viewport: three 300px slides.
/// let mut engine = CarouselEngine::new(8, &config, 1100.0, 900.0, start);
/// assert_eq!(engine.state().visible_slides, 3);
///
/// let view = engine.handle(CarouselEvent::Next, start);
/// assert_eq!(view.index, 1);
/// assert_eq!(view.visible, 1..4);
///
/// // Autoplay restarted on the click, so it fires one delay later.
/// assert!(engine.tick(start + Duration::from_secs(5)).is_some());
/// assert_eq!(engine.state().current_index, 2);
/// ```
#[derive(Debug, Clone)]
pub struct CarouselEngine {
    state: CarouselState,
    cards: CardsPerBreakpoint,
    autoplay: AutoplayController,
    heights: Vec<f32>,
    hovered: bool,
}

impl CarouselEngine {
    /// Creates an engine for `slide_count` slides laid out in a container
    /// `container_width` pixels wide on a `viewport_width` viewport.
    #[must_use]
    pub fn new(
        slide_count: usize,
        config: &WidgetConfig,
        viewport_width: f32,
        container_width: f32,
        now: Instant,
    ) -> Self {
        let visible = visible_slides(viewport_width, &config.cards, slide_count);
        let state = CarouselState::new(
            slide_count,
            visible,
            slide_width(container_width, visible),
            config.loop_slides,
        );
        let mut autoplay = AutoplayController::new(
            Duration::from_millis(config.autoplay_delay_ms),
            config.autoplay,
        );
        autoplay.set_eligible(autoplay_eligible(&state), now);
        debug!(slide_count, visible, autoplay = autoplay.is_running(), "carousel created");

        Self {
            state,
            cards: config.cards,
            autoplay,
            heights: Vec::new(),
            hovered: false,
        }
    }

    /// Replaces the autoplay resume grace period.
    #[must_use]
    pub fn with_resume_grace(mut self, grace: Duration) -> Self {
        self.autoplay = self.autoplay.with_resume_grace(grace);
        self
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &CarouselState {
        &self.state
    }

    /// The autoplay controller.
    #[must_use]
    pub const fn autoplay(&self) -> &AutoplayController {
        &self.autoplay
    }

    /// The current view.
    #[must_use]
    pub fn view(&self) -> CarouselView {
        CarouselView::from(&self.state)
    }

    /// Applies a user event and returns the resulting view.
    ///
    /// Pressing the track pauses autoplay; releasing it resumes autoplay
    /// after the grace period (unless the pointer still hovers the
    /// carousel). Arrow and dot clicks restart the autoplay delay.
    pub fn handle(&mut self, event: CarouselEvent, now: Instant) -> CarouselView {
        let before = self.state;
        self.state = before.apply(event);

        let was_pressed = before.pointer_start_x.is_some();
        let is_pressed = self.state.pointer_start_x.is_some();
        if !was_pressed && is_pressed {
            trace!("pointer pressed");
            self.autoplay.pause();
        } else if was_pressed && !is_pressed {
            trace!(index = self.state.current_index, dragged = before.is_dragging, "pointer released");
            if !self.hovered {
                self.autoplay.resume_after(now);
            }
        } else if event.is_navigation() {
            self.autoplay.restart(now);
        }

        self.sync_eligibility(now);
        self.view()
    }

    /// Advances one slide if autoplay is due at `now`.
    ///
    /// Returns the new view when the carousel moved. A carousel without
    /// `loop_slides` stops autoplay once it reaches its last page.
    pub fn tick(&mut self, now: Instant) -> Option<CarouselView> {
        if !self.autoplay.poll(now) {
            return None;
        }
        self.state = self.state.apply(CarouselEvent::AutoplayTick);
        trace!(index = self.state.current_index, "autoplay tick");
        self.sync_eligibility(now);
        Some(self.view())
    }

    /// When the next autoplay tick is due.
    #[must_use]
    pub const fn next_tick(&self) -> Option<Instant> {
        self.autoplay.next_deadline()
    }

    /// The pointer entered the carousel.
    pub fn pointer_enter(&mut self) {
        self.hovered = true;
        self.autoplay.pause();
    }

    /// The pointer left the carousel.
    pub fn pointer_leave(&mut self, now: Instant) {
        self.hovered = false;
        if !self.state.is_dragging {
            self.autoplay.resume_after(now);
        }
    }

    /// Recomputes the visible slide count and slide width.
    pub fn resize(&mut self, viewport_width: f32, container_width: f32, now: Instant) -> CarouselView {
        let visible = visible_slides(viewport_width, &self.cards, self.state.slide_count);
        self.state = self.state.apply(CarouselEvent::Resize {
            visible_slides: visible,
            slide_width_px: slide_width(container_width, visible),
        });
        debug!(visible, index = self.state.current_index, "carousel resized");
        self.sync_eligibility(now);
        self.view()
    }

    /// Changes the number of slides, keeping the slide width.
    pub fn set_slide_count(&mut self, slide_count: usize, viewport_width: f32, now: Instant) -> CarouselView {
        let container_width = self.state.slide_width_px * self.state.visible_slides as f32;
        self.state = self.state.apply(CarouselEvent::SlideCountChanged(slide_count));
        self.heights.truncate(slide_count);
        self.resize(viewport_width, container_width, now)
    }

    /// Records the rendered height of every slide.
    pub fn set_measured_heights(&mut self, heights: Vec<f32>) {
        self.heights = heights;
    }

    /// The min-height to apply to the visible slides.
    #[must_use]
    pub fn height_sync(&self) -> Option<HeightSync> {
        HeightSync::compute(self.view().visible, &self.heights)
    }

    fn sync_eligibility(&mut self, now: Instant) {
        self.autoplay.set_eligible(autoplay_eligible(&self.state), now);
    }
}

/// More slides than fit, and somewhere left to go.
fn autoplay_eligible(state: &CarouselState) -> bool {
    state.slide_count > state.visible_slides && (state.loop_slides || state.can_go_next())
}

fn slide_width(container_width: f32, visible: usize) -> f32 {
    if container_width.is_finite() && container_width > 0.0 {
        container_width / visible.max(1) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(5);

    fn engine(slides: usize, now: Instant) -> CarouselEngine {
        // A 500px viewport is mobile: one slide.
        CarouselEngine::new(slides, &WidgetConfig::new("w"), 500.0, 400.0, now)
    }

    #[test]
    fn hover_pauses_and_leave_resumes_after_grace() {
        let now = Instant::now();
        let mut engine = engine(5, now);
        engine.pointer_enter();
        assert!(engine.tick(now + DELAY * 3).is_none());

        engine.pointer_leave(now + DELAY);
        assert_eq!(
            engine.next_tick(),
            Some(now + DELAY + Duration::from_secs(3) + DELAY)
        );
    }

    #[test]
    fn drag_pauses_autoplay_until_release() {
        let now = Instant::now();
        let mut engine = engine(5, now);
        engine.handle(CarouselEvent::PointerDown { x: 300.0 }, now);
        assert!(engine.autoplay().is_paused());

        engine.handle(CarouselEvent::PointerMove { x: 200.0 }, now);
        assert!(engine.autoplay().is_paused());

        let view = engine.handle(CarouselEvent::PointerUp { x: 200.0 }, now);
        assert_eq!(view.index, 1);
        assert!(!engine.autoplay().is_paused());
        assert!(engine.autoplay().is_running());
    }

    #[test]
    fn press_survives_a_due_tick() {
        let now = Instant::now();
        let mut engine = engine(5, now);
        engine.handle(CarouselEvent::PointerDown { x: 300.0 }, now);
        assert!(engine.tick(now + DELAY).is_none());

        engine.handle(CarouselEvent::PointerMove { x: 150.0 }, now + DELAY);
        assert!(engine.state().is_dragging);
        assert_eq!(engine.state().pointer_start_x, Some(300.0));
        let view = engine.handle(CarouselEvent::PointerUp { x: 150.0 }, now + DELAY);
        assert_eq!(view.index, 1);
    }

    #[test]
    fn click_resumes_after_grace() {
        let now = Instant::now();
        let mut engine = engine(5, now);
        engine.handle(CarouselEvent::PointerDown { x: 300.0 }, now);
        engine.handle(CarouselEvent::PointerUp { x: 302.0 }, now);
        assert_eq!(engine.state().current_index, 0);
        assert_eq!(engine.next_tick(), Some(now + Duration::from_secs(3) + DELAY));
    }

    #[test]
    fn non_looping_autoplay_stops_at_the_end() {
        let now = Instant::now();
        let mut config = WidgetConfig::new("w");
        config.loop_slides = false;
        let mut engine = CarouselEngine::new(3, &config, 500.0, 400.0, now);

        assert!(engine.tick(now + DELAY).is_some());
        assert!(engine.tick(now + DELAY * 2).is_some());
        assert_eq!(engine.state().current_index, 2);
        assert!(!engine.autoplay().is_running());
        assert!(engine.tick(now + DELAY * 10).is_none());

        // Going back gives autoplay somewhere to go again.
        engine.handle(CarouselEvent::Prev, now + DELAY * 10);
        assert_eq!(engine.next_tick(), Some(now + DELAY * 11));
    }

    #[test]
    fn autoplay_disabled_when_everything_fits() {
        let now = Instant::now();
        let mut engine = CarouselEngine::new(3, &WidgetConfig::new("w"), 1600.0, 1500.0, now);
        assert_eq!(engine.state().visible_slides, 3);
        assert!(!engine.autoplay().is_running());

        engine.resize(500.0, 400.0, now);
        assert!(engine.autoplay().is_running());
    }

    #[test]
    fn config_can_disable_autoplay() {
        let now = Instant::now();
        let mut config = WidgetConfig::new("w");
        config.autoplay = false;
        let mut engine = CarouselEngine::new(9, &config, 500.0, 400.0, now);
        assert!(engine.tick(now + DELAY * 10).is_none());
    }

    #[test]
    fn height_sync_follows_index() {
        let now = Instant::now();
        let mut engine = CarouselEngine::new(4, &WidgetConfig::new("w"), 700.0, 600.0, now);
        engine.set_measured_heights(vec![100.0, 300.0, 200.0, 50.0]);
        assert_eq!(engine.height_sync().map(|s| s.min_height_px), Some(300.0));

        engine.handle(CarouselEvent::GoTo(2), now);
        let sync = engine.height_sync().unwrap();
        assert_eq!(sync.range, 2..4);
        assert_eq!(sync.min_height_px, 200.0);
    }

    #[test]
    fn fewer_slides_clamp_index() {
        let now = Instant::now();
        let mut engine = engine(6, now);
        engine.handle(CarouselEvent::GoTo(5), now);
        let view = engine.set_slide_count(3, 500.0, now);
        assert_eq!(view.index, 2);
        assert_eq!(engine.state().slide_width_px, 400.0);
    }
}
