//! Everything that reacts to the vertical scroll offset. Each behavior owns
//! its own elements and reads only the snapshot, so the order they run in is
//! not observable.

use crate::config::ScrollThresholds;
use crate::counter::{CounterGroup, ViewportBounds};
use crate::schedule::Scheduler;
use crate::sink::DisplaySink;
use std::rc::Rc;

const SCROLLED_CLASS: &str = "scrolled";
const ACTIVE_CLASS: &str = "active";
const SHOW_CLASS: &str = "show";
const PARALLAX_SPEED: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct SectionPosition {
    pub id: String,
    pub top: f64,
}

/// Geometry read from the document at the moment of one scroll event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub scroll_height: f64,
    /// Height of the root element's visible area, used for progress.
    pub client_height: f64,
    /// Window inner height, used for visibility checks.
    pub inner_height: f64,
    /// In document order.
    pub sections: Vec<SectionPosition>,
    pub stats_bounds: Option<ViewportBounds>,
}

pub fn navbar_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Last section, in document order, whose top minus `offset` has been
/// scrolled past.
pub fn current_section(sections: &[SectionPosition], scroll_y: f64, offset: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|section| scroll_y >= section.top - offset)
        .last()
        .map(|section| section.id.as_str())
}

/// Scroll progress in `[0, 100]`. Documents that cannot scroll report 0.
pub fn progress_percent(scroll_y: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if !scrollable.is_finite() || scrollable <= 0.0 {
        return 0.0;
    }

    let percent = 100.0 * scroll_y / scrollable;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub fn parallax_transform(scroll_y: f64) -> String {
    format!("translateY({}px)", scroll_y * PARALLAX_SPEED)
}

pub struct NavLink<S> {
    pub href: String,
    pub sink: S,
}

impl<S> NavLink<S> {
    fn targets(&self, section_id: &str) -> bool {
        self.href
            .strip_prefix('#')
            .is_some_and(|anchor| anchor == section_id)
    }
}

/// Elements the reactor writes to. Absent elements are simply skipped.
pub struct ScrollTargets<S: DisplaySink> {
    pub navbar: Option<S>,
    pub nav_links: Vec<NavLink<S>>,
    pub progress_bar: Option<S>,
    pub back_to_top: Option<S>,
    pub parallax_layers: Vec<S>,
    pub counters: CounterGroup<S>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollOutcome {
    pub counters_started: bool,
}

pub struct ScrollReactor<S: DisplaySink> {
    thresholds: ScrollThresholds,
    targets: ScrollTargets<S>,
    scheduler: Rc<dyn Scheduler>,
}

impl<S: DisplaySink + 'static> ScrollReactor<S> {
    pub fn new(
        thresholds: ScrollThresholds,
        targets: ScrollTargets<S>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            thresholds,
            targets,
            scheduler,
        }
    }

    pub fn counters_armed(&self) -> bool {
        self.targets.counters.is_armed()
    }

    pub fn on_scroll(&mut self, snapshot: &ScrollSnapshot) -> ScrollOutcome {
        let scroll_y = snapshot.scroll_y;

        if let Some(navbar) = &self.targets.navbar {
            navbar.set_class(
                SCROLLED_CLASS,
                navbar_scrolled(scroll_y, self.thresholds.navbar_px),
            );
        }

        let current = current_section(
            &snapshot.sections,
            scroll_y,
            self.thresholds.section_offset_px,
        );
        for link in &self.targets.nav_links {
            let active = current.is_some_and(|id| link.targets(id));
            link.sink.set_class(ACTIVE_CLASS, active);
        }

        if let Some(bar) = &self.targets.progress_bar {
            let percent = progress_percent(scroll_y, snapshot.scroll_height, snapshot.client_height);
            bar.set_style("width", &format!("{percent}%"));
        }

        if let Some(button) = &self.targets.back_to_top {
            button.set_class(
                SHOW_CLASS,
                back_to_top_visible(scroll_y, self.thresholds.back_to_top_px),
            );
        }

        let transform = parallax_transform(scroll_y);
        for layer in &self.targets.parallax_layers {
            layer.set_style("transform", &transform);
        }

        let counters_started = self.targets.counters.check_visibility(
            snapshot.stats_bounds,
            snapshot.inner_height,
            &self.scheduler,
        );

        ScrollOutcome { counters_started }
    }
}
