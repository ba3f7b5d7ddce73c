//! Headless stand-ins for the browser: a virtual-clock scheduler and an
//! element that records what was written to it.

use crate::schedule::{Scheduler, Task};
use crate::sink::DisplaySink;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<u64>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<(u64, u64, Task)>>,
    frames: RefCell<Vec<Task>>,
}

impl ManualScheduler {
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Delay of the earliest pending timer, relative to now.
    pub fn next_timer_delay(&self) -> Option<u64> {
        self.timers
            .borrow()
            .iter()
            .map(|(due, _, _)| due - self.now.get())
            .min()
    }

    /// Jumps to the earliest pending timer and runs it. Returns the delay that
    /// elapsed, or `None` when nothing is pending.
    pub fn run_next_timer(&self) -> Option<u64> {
        let task = {
            let mut timers = self.timers.borrow_mut();
            let position = timers
                .iter()
                .enumerate()
                .min_by_key(|(_, (due, seq, _))| (*due, *seq))
                .map(|(position, _)| position)?;
            timers.remove(position)
        };
        let (due, _, task) = task;
        let elapsed = due - self.now.get();
        self.now.set(due);
        task();
        Some(elapsed)
    }

    /// Runs every frame callback queued before this call.
    pub fn run_frame(&self) -> usize {
        let tasks: Vec<Task> = self.frames.borrow_mut().drain(..).collect();
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn after(&self, delay_ms: u32, task: Task) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        let due = self.now.get() + u64::from(delay_ms);
        self.timers.borrow_mut().push((due, seq, task));
    }

    fn next_frame(&self, task: Task) {
        self.frames.borrow_mut().push(task);
    }
}

#[derive(Default)]
pub struct RecordingSink {
    texts: RefCell<Vec<String>>,
    classes: RefCell<BTreeSet<String>>,
    styles: RefCell<BTreeMap<String, String>>,
}

impl RecordingSink {
    pub fn text(&self) -> Option<String> {
        self.texts.borrow().last().cloned()
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.borrow().clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }
}

impl DisplaySink for RecordingSink {
    fn set_text(&self, text: &str) {
        self.texts.borrow_mut().push(text.to_string());
    }

    fn set_class(&self, class: &str, on: bool) {
        let mut classes = self.classes.borrow_mut();
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_style(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }
}
