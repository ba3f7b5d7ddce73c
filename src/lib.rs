//! Client-side motion for the portfolio page: the typewriter headline, the
//! scroll-driven navbar/progress/counter updates and the decorative effects.
//!
//! The state machines only talk to [`schedule::Scheduler`] and
//! [`sink::DisplaySink`], so they run and are tested on the host. The
//! browser bindings live in `frontend`, which only exists on wasm32.

pub mod config;
pub mod contact;
pub mod counter;
pub mod effects;
pub mod log;
pub mod schedule;
pub mod scroll;
pub mod sink;
pub mod typed_text;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(test)]
mod testing;
