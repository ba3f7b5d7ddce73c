//! One-shot statistic counters that ramp from zero to their target once the
//! stats block first scrolls into view.

use crate::config::CounterTimings;
use crate::schedule::Scheduler;
use crate::sink::DisplaySink;
use std::rc::Rc;

/// Vertical extent of an element relative to the viewport top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBounds {
    pub top: f64,
    pub bottom: f64,
}

impl ViewportBounds {
    pub fn intersects_viewport(self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom >= 0.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub done: bool,
}

#[derive(Clone, Debug)]
pub struct Counter {
    target: u64,
    current: f64,
    increment: f64,
}

impl Counter {
    pub fn new(target: u64, timings: CounterTimings) -> Self {
        let frames = f64::from(timings.duration_ms) / f64::from(timings.frame_ms.max(1));
        Self {
            target,
            current: 0.0,
            increment: target as f64 / frames,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn step(&mut self) -> CounterFrame {
        let target = self.target as f64;
        self.current += self.increment;

        if self.current < target {
            CounterFrame {
                text: format_counter(self.current.floor() as u64, self.target),
                done: false,
            }
        } else {
            self.current = target;
            CounterFrame {
                text: format_counter(self.target, self.target),
                done: true,
            }
        }
    }
}

/// Large figures read as "N+", small ones as percentages.
pub fn format_counter(value: u64, target: u64) -> String {
    let suffix = if target < 1_000 { '%' } else { '+' };
    format!("{value}{suffix}")
}

/// Reads a `data-target` attribute value from its leading digits, so
/// `"95%"` reads as 95.
pub fn parse_target(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim_start();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u64>().ok()
}

pub struct CounterGroup<S: DisplaySink> {
    pending: Vec<(Counter, S)>,
    armed: bool,
}

impl<S: DisplaySink + 'static> CounterGroup<S> {
    pub fn new(counters: Vec<(u64, S)>, timings: CounterTimings) -> Self {
        Self {
            pending: counters
                .into_iter()
                .map(|(target, sink)| (Counter::new(target, timings), sink))
                .collect(),
            armed: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Starts every counter the first time `bounds` intersects the viewport.
    /// Returns whether this call started them; a group with no counters never
    /// starts.
    pub fn check_visibility(
        &mut self,
        bounds: Option<ViewportBounds>,
        viewport_height: f64,
        scheduler: &Rc<dyn Scheduler>,
    ) -> bool {
        if self.armed || self.pending.is_empty() {
            return false;
        }

        let Some(bounds) = bounds else {
            return false;
        };

        if !bounds.intersects_viewport(viewport_height) {
            return false;
        }

        self.armed = true;
        for (counter, sink) in self.pending.drain(..) {
            animate(counter, sink, scheduler.clone());
        }
        true
    }
}

fn animate<S: DisplaySink + 'static>(mut counter: Counter, sink: S, scheduler: Rc<dyn Scheduler>) {
    let frame = counter.step();
    sink.set_text(&frame.text);

    if frame.done {
        return;
    }

    let next_scheduler = scheduler.clone();
    scheduler.next_frame(Box::new(move || animate(counter, sink, next_scheduler)));
}
