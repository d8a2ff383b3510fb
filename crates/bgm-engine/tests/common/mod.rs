//! Shared test fixtures: a scripted sink over shared state, a recording
//! factory, and a controller fixture driven by a manual clock.

#![allow(dead_code)]

use bgm_core::{AudioSink, EngineConfig, ManualClock, SinkError, SinkFactory};
use bgm_engine::BgmController;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct SinkState {
    pub source: String,
    pub volume: f32,
    pub playing: bool,
    pub position_ms: f64,
    pub looping: bool,
    pub ended: bool,
    pub play_calls: u32,
    pub block_play: bool,
}

/// Test-side view of a sink's state.
#[derive(Clone)]
pub struct SinkHandle(pub Rc<RefCell<SinkState>>);

impl SinkHandle {
    pub fn volume(&self) -> f32 {
        self.0.borrow().volume
    }

    pub fn playing(&self) -> bool {
        self.0.borrow().playing
    }

    pub fn position_ms(&self) -> f64 {
        self.0.borrow().position_ms
    }

    pub fn source(&self) -> String {
        self.0.borrow().source.clone()
    }

    pub fn play_calls(&self) -> u32 {
        self.0.borrow().play_calls
    }

    pub fn set_position_ms(&self, position_ms: f64) {
        self.0.borrow_mut().position_ms = position_ms;
    }

    /// Make subsequent `play()` calls fail like a platform autoplay block.
    pub fn block_play(&self, block: bool) {
        self.0.borrow_mut().block_play = block;
    }

    /// Simulate the sink reaching its natural end of stream.
    pub fn finish_playback(&self) {
        let mut s = self.0.borrow_mut();
        s.playing = false;
        s.position_ms = 0.0;
        s.ended = true;
    }
}

/// Scripted sink; every mutation is visible through the paired handle.
pub struct TestSink(Rc<RefCell<SinkState>>);

pub fn test_sink() -> (TestSink, SinkHandle) {
    let state = Rc::new(RefCell::new(SinkState::default()));
    (TestSink(Rc::clone(&state)), SinkHandle(state))
}

impl AudioSink for TestSink {
    fn play(&mut self) -> Result<(), SinkError> {
        let mut s = self.0.borrow_mut();
        if s.block_play {
            return Err(SinkError::StartBlocked("autoplay policy".to_string()));
        }
        s.playing = true;
        s.play_calls += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().playing = false;
    }

    fn volume(&self) -> f32 {
        self.0.borrow().volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.borrow_mut().volume = volume;
    }

    fn seek_to_start(&mut self) {
        self.0.borrow_mut().position_ms = 0.0;
    }

    fn position_ms(&self) -> f64 {
        self.0.borrow().position_ms
    }

    fn set_source(&mut self, uri: &str) {
        self.0.borrow_mut().source = uri.to_string();
    }

    fn set_looping(&mut self, looping: bool) {
        self.0.borrow_mut().looping = looping;
    }

    fn is_playing(&self) -> bool {
        self.0.borrow().playing
    }

    fn take_ended(&mut self) -> bool {
        std::mem::take(&mut self.0.borrow_mut().ended)
    }
}

/// Factory recording every transient sink it mints, keyed by URI.
pub struct TestFactory {
    created: Rc<RefCell<Vec<(String, SinkHandle)>>>,
}

impl TestFactory {
    pub fn new() -> (Self, Rc<RefCell<Vec<(String, SinkHandle)>>>) {
        let created = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                created: Rc::clone(&created),
            },
            created,
        )
    }
}

impl SinkFactory for TestFactory {
    fn create(&self, uri: &str) -> Box<dyn AudioSink> {
        let (sink, handle) = test_sink();
        handle.0.borrow_mut().source = uri.to_string();
        self.created.borrow_mut().push((uri.to_string(), handle));
        Box::new(sink)
    }
}

pub const BACKGROUND_URI: &str = "music/theme.ogg";
pub const EVENT_URI: &str = "music/pull.ogg";

pub struct Fixture {
    pub controller: BgmController,
    pub clock: ManualClock,
    pub background: SinkHandle,
    pub event: SinkHandle,
    /// Every sink the factory minted (effects), in creation order
    pub minted: Rc<RefCell<Vec<(String, SinkHandle)>>>,
}

pub fn fixture() -> Fixture {
    fixture_with(EngineConfig::default())
}

pub fn fixture_with(config: EngineConfig) -> Fixture {
    let _ = env_logger::builder().is_test(true).try_init();

    let clock = ManualClock::new();
    let (background_sink, background) = test_sink();
    let (event_sink, event) = test_sink();
    let (factory, minted) = TestFactory::new();

    let controller = BgmController::new(
        BACKGROUND_URI,
        Box::new(background_sink),
        EVENT_URI,
        Box::new(event_sink),
        Box::new(factory),
        Box::new(clock.clone()),
        config,
    );

    Fixture {
        controller,
        clock,
        background,
        event,
        minted,
    }
}

impl Fixture {
    /// Advance the clock in `step_ms` increments, ticking every frame.
    pub fn run_frames(&mut self, total_ms: f64, step_ms: f64) {
        let mut elapsed = 0.0;
        while elapsed < total_ms {
            let step = step_ms.min(total_ms - elapsed);
            self.clock.advance_ms(step);
            self.controller.tick();
            elapsed += step;
        }
    }
}
