//! Typewriter effect: types a phrase one character per tick, holds, erases it,
//! holds again and moves on to the next phrase, forever.

use crate::config::TypingTimings;
use crate::schedule::Scheduler;
use crate::sink::DisplaySink;
use std::cell::RefCell;
use std::rc::Rc;

/// What one tick produced: the text to show and how long to wait before the
/// next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct TypedText {
    phrases: Vec<String>,
    phrase_index: usize,
    char_index: usize,
    deleting: bool,
    timings: TypingTimings,
}

impl TypedText {
    /// Empty phrases are skipped. Returns `None` if nothing is left to type.
    pub fn new(phrases: Vec<String>, timings: TypingTimings) -> Option<Self> {
        let phrases: Vec<String> = phrases
            .into_iter()
            .filter(|phrase| !phrase.is_empty())
            .collect();

        if phrases.is_empty() {
            return None;
        }

        Some(Self {
            phrases,
            phrase_index: 0,
            char_index: 0,
            deleting: false,
            timings,
        })
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.phrase_index]
    }

    pub fn advance(&mut self) -> Frame {
        let len = self.current_phrase().chars().count();

        let mut delay_ms = if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
            self.timings.deleting_ms
        } else {
            self.char_index = (self.char_index + 1).min(len);
            self.timings.typing_ms
        };

        let text: String = self.current_phrase().chars().take(self.char_index).collect();

        if !self.deleting && self.char_index == len {
            self.deleting = true;
            delay_ms = self.timings.hold_full_ms;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            delay_ms = self.timings.hold_empty_ms;
        }

        Frame { text, delay_ms }
    }
}

pub struct TypedTextAnimator<S: DisplaySink> {
    state: TypedText,
    sink: S,
}

impl<S: DisplaySink + 'static> TypedTextAnimator<S> {
    pub fn new(state: TypedText, sink: S) -> Self {
        Self { state, sink }
    }

    pub fn state(&self) -> &TypedText {
        &self.state
    }

    /// Advances one step, renders it and returns the delay until the next.
    pub fn tick(&mut self) -> u32 {
        let frame = self.state.advance();
        self.sink.set_text(&frame.text);
        frame.delay_ms
    }

    /// Hands the animator to `scheduler`; the first tick runs after
    /// `start_delay_ms` and every tick schedules its successor.
    pub fn start(self, scheduler: Rc<dyn Scheduler>, start_delay_ms: u32) -> Rc<RefCell<Self>> {
        let handle = Rc::new(RefCell::new(self));
        schedule_tick(handle.clone(), scheduler, start_delay_ms);
        handle
    }
}

fn schedule_tick<S: DisplaySink + 'static>(
    handle: Rc<RefCell<TypedTextAnimator<S>>>,
    scheduler: Rc<dyn Scheduler>,
    delay_ms: u32,
) {
    let next_scheduler = scheduler.clone();
    scheduler.after(
        delay_ms,
        Box::new(move || {
            let next_delay = handle.borrow_mut().tick();
            schedule_tick(handle, next_scheduler, next_delay);
        }),
    );
}

/// Starts the animator when both a display element and at least one
/// non-empty phrase exist; otherwise does nothing.
pub fn activate<S: DisplaySink + 'static>(
    sink: Option<S>,
    phrases: Vec<String>,
    timings: TypingTimings,
    scheduler: Rc<dyn Scheduler>,
) -> Option<Rc<RefCell<TypedTextAnimator<S>>>> {
    let sink = sink?;
    let state = TypedText::new(phrases, timings)?;
    Some(TypedTextAnimator::new(state, sink).start(scheduler, timings.start_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_phrases;
    use crate::testing::{ManualScheduler, RecordingSink};

    fn phrases(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn typing_takes_one_tick_per_character() {
        let mut state = TypedText::new(phrases(&["Rust"]), TypingTimings::default()).unwrap();

        let frames: Vec<Frame> = (0..4).map(|_| state.advance()).collect();

        let texts: Vec<&str> = frames.iter().map(|frame| frame.text.as_str()).collect();
        assert_eq!(texts, vec!["R", "Ru", "Rus", "Rust"]);
        assert_eq!(frames[0].delay_ms, 100);
        assert_eq!(frames[2].delay_ms, 100);
        assert_eq!(frames[3].delay_ms, 2_000);
        assert!(state.is_deleting());
        assert_eq!(state.char_index(), 4);
    }

    #[test]
    fn erasing_takes_one_tick_per_character_then_holds() {
        let mut state = TypedText::new(phrases(&["abc", "de"]), TypingTimings::default()).unwrap();
        for _ in 0..3 {
            state.advance();
        }

        let frames: Vec<Frame> = (0..3).map(|_| state.advance()).collect();

        assert_eq!(frames[0], Frame { text: "ab".to_string(), delay_ms: 50 });
        assert_eq!(frames[1], Frame { text: "a".to_string(), delay_ms: 50 });
        assert_eq!(frames[2], Frame { text: String::new(), delay_ms: 500 });
        assert!(!state.is_deleting());
        assert_eq!(state.phrase_index(), 1);
        assert_eq!(state.char_index(), 0);
    }

    #[test]
    fn full_cycle_of_every_phrase_returns_to_empty_and_advances_index() {
        let list = default_phrases();
        let mut state = TypedText::new(list.clone(), TypingTimings::default()).unwrap();

        for (index, phrase) in list.iter().enumerate() {
            assert_eq!(state.phrase_index(), index);
            let len = phrase.chars().count();

            let mut last = None;
            for _ in 0..len * 2 {
                let frame = state.advance();
                assert!(state.char_index() <= len);
                last = Some(frame);
            }

            assert_eq!(last.unwrap().text, "");
            assert_eq!(state.phrase_index(), (index + 1) % list.len());
        }
    }

    #[test]
    fn multibyte_phrases_are_cut_on_char_boundaries() {
        let mut state = TypedText::new(phrases(&["héllo"]), TypingTimings::default()).unwrap();

        assert_eq!(state.advance().text, "h");
        assert_eq!(state.advance().text, "hé");
    }

    #[test]
    fn empty_phrase_lists_are_rejected() {
        assert!(TypedText::new(Vec::new(), TypingTimings::default()).is_none());
        assert!(TypedText::new(phrases(&["", ""]), TypingTimings::default()).is_none());

        let state = TypedText::new(phrases(&["", "ok"]), TypingTimings::default()).unwrap();
        assert_eq!(state.current_phrase(), "ok");
    }

    #[test]
    fn animator_waits_for_start_delay_then_follows_timing_policy() {
        let scheduler = Rc::new(ManualScheduler::default());
        let sink = Rc::new(RecordingSink::default());

        activate(
            Some(sink.clone()),
            phrases(&["Hi", "Yo"]),
            TypingTimings::default(),
            scheduler.clone(),
        )
        .expect("animator starts");

        assert_eq!(sink.text(), None);
        assert_eq!(scheduler.next_timer_delay(), Some(1_000));

        let mut delays = Vec::new();
        for _ in 0..5 {
            delays.push(scheduler.run_next_timer().unwrap());
        }

        assert_eq!(delays, vec![1_000, 100, 2_000, 50, 500]);
        assert_eq!(sink.texts(), vec!["H", "Hi", "H", "", "Y"]);
        assert_eq!(scheduler.next_timer_delay(), Some(100));
        assert_eq!(scheduler.pending_timers(), 1);
    }

    #[test]
    fn animator_wraps_around_phrase_list() {
        let scheduler = Rc::new(ManualScheduler::default());
        let sink = Rc::new(RecordingSink::default());
        let handle = activate(
            Some(sink.clone()),
            phrases(&["a", "b"]),
            TypingTimings::default(),
            scheduler.clone(),
        )
        .unwrap();

        // one tick types a single-char phrase, the next erases it
        for _ in 0..4 {
            scheduler.run_next_timer();
        }

        assert_eq!(handle.borrow().state().phrase_index(), 0);
        assert_eq!(sink.texts(), vec!["a", "", "b", ""]);
    }

    #[test]
    fn missing_display_element_is_a_no_op() {
        let scheduler = Rc::new(ManualScheduler::default());

        let handle = activate::<Rc<RecordingSink>>(
            None,
            default_phrases(),
            TypingTimings::default(),
            scheduler.clone(),
        );

        assert!(handle.is_none());
        assert_eq!(scheduler.pending_timers(), 0);
    }
}
