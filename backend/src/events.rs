use log::{debug, info};

use crate::context::GraphicsContext;
use crate::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    // key code
    KeyDown(i32),
    // button: 1 left, 2 middle, 3 right
    MouseButtonDown(u8),
    // raw platform event type
    Other(u32),
}

impl InputEvent {
    pub fn is_classified(&self) -> bool {
        !matches!(self, InputEvent::Other(_))
    }
}

/// When the loop stops running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    #[default]
    Quit,
    /// Stop once this many classified events have been seen.
    AfterClassified(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopState {
    pub running: bool,
    pub frame_count: u64,
}

pub trait EventObserver {
    fn observe(&mut self, event: &InputEvent);
}

impl<F: FnMut(&InputEvent)> EventObserver for F {
    fn observe(&mut self, event: &InputEvent) {
        self(event)
    }
}

pub struct LogObserver;

impl EventObserver for LogObserver {
    fn observe(&mut self, event: &InputEvent) {
        info!("Logging event with type: {:?}", event);
    }
}

/// What the draw callback gets to see of the current frame.
pub struct FrameInfo<'a, F> {
    pub functions: &'a F,
    pub drawable_size: (u32, u32),
    pub frame: u64,
}

pub struct EventLoop<'a, P: Platform> {
    ctx: &'a mut GraphicsContext<P>,
    observer: Box<dyn EventObserver + 'a>,
    policy: ExitPolicy,
    state: LoopState,
    classified: u32,
}

impl<'a, P: Platform> EventLoop<'a, P> {
    pub fn new(ctx: &'a mut GraphicsContext<P>) -> Self {
        EventLoop {
            ctx,
            observer: Box::new(LogObserver),
            policy: ExitPolicy::default(),
            state: LoopState {
                running: true,
                frame_count: 0,
            },
            classified: 0,
        }
    }

    pub fn with_policy(mut self, policy: ExitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: impl EventObserver + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn running(&self) -> bool {
        self.state.running
    }

    pub fn classified_events(&self) -> u32 {
        self.classified
    }

    pub fn process_event(&mut self, event: InputEvent) {
        if event.is_classified() {
            self.observer.observe(&event);
            self.classified += 1;
        }

        let stop = match self.policy {
            ExitPolicy::Quit => event == InputEvent::Quit,
            ExitPolicy::AfterClassified(limit) => self.classified >= limit,
        };
        if stop && self.state.running {
            debug!("stopping after {:?} ({} classified events)", event, self.classified);
            self.state.running = false;
        }
    }

    /// Processes every event currently queued. Returns how many there were.
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        while let Some(raw) = self.ctx.poll_event() {
            self.process_event(P::classify(&raw));
            drained += 1;
        }
        drained
    }

    /// Drains input, then draws and presents unless the loop was stopped.
    /// Returns whether a frame was presented.
    pub fn frame<D>(&mut self, draw: &mut D) -> bool
    where
        D: FnMut(&FrameInfo<'_, P::Functions>),
    {
        self.drain();
        if !self.state.running {
            return false;
        }

        let info = FrameInfo {
            functions: self.ctx.functions(),
            drawable_size: self.ctx.drawable_size(),
            frame: self.state.frame_count,
        };
        draw(&info);
        self.ctx.swap_buffers();
        self.state.frame_count += 1;
        true
    }

    pub fn run<D>(&mut self, mut draw: D)
    where
        D: FnMut(&FrameInfo<'_, P::Functions>),
    {
        while self.frame(&mut draw) {}
        info!("event loop finished after {} frames", self.state.frame_count);
    }

    /// Runs at most `frames` frames and returns how many were presented.
    pub fn run_frames<D>(&mut self, frames: u64, mut draw: D) -> u64
    where
        D: FnMut(&FrameInfo<'_, P::Functions>),
    {
        let start = self.state.frame_count;
        for _ in 0..frames {
            if !self.frame(&mut draw) {
                break;
            }
        }
        self.state.frame_count - start
    }
}
