//! Deferred execution used by the animations.
//!
//! Both primitives run the task at most once. Tasks that want to repeat
//! reschedule themselves from inside the task body.

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Runs `task` once, no sooner than `delay_ms` from now.
    fn after(&self, delay_ms: u32, task: Task);

    /// Runs `task` once, before the next repaint.
    fn next_frame(&self, task: Task);
}

/// `document.readyState`, as far as startup cares about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Unknown values are treated as `Interactive`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "loading" => Self::Loading,
            "complete" => Self::Complete,
            _ => Self::Interactive,
        }
    }

    pub fn dom_content_loaded_fired(self) -> bool {
        self != Self::Loading
    }

    pub fn load_fired(self) -> bool {
        self == Self::Complete
    }
}
