#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use backend::{BackendError, ContextAttributes, InputEvent, Platform, WindowConfig};

#[derive(Debug, Default, Clone)]
pub struct Script {
    pub fail_init: bool,
    pub fail_window: bool,
    pub fail_context: bool,
    pub fail_resolve: bool,
    /// Attributes reported back instead of the requested ones.
    pub negotiated: Option<ContextAttributes>,
}

#[derive(Debug, Default)]
pub struct Journal {
    pub calls: Vec<&'static str>,
    pub windows_created: u32,
    pub windows_destroyed: u32,
    pub contexts_created: u32,
    pub contexts_destroyed: u32,
    pub shutdowns: u32,
    pub swaps: u32,
    pub polls: u32,
    pub requested: Option<ContextAttributes>,
    pub queue: VecDeque<InputEvent>,
}

pub type Shared = Rc<RefCell<Journal>>;

pub struct MockWindow(u32);
pub struct MockContext(u32);

/// Platform that records every call into a shared [`Journal`].
pub struct MockPlatform {
    journal: Shared,
    script: Script,
}

impl MockPlatform {
    pub fn new(script: Script) -> (MockPlatform, Shared) {
        let journal = Shared::default();
        journal.borrow_mut().calls.push("init");
        (
            MockPlatform {
                journal: journal.clone(),
                script,
            },
            journal,
        )
    }

    fn record(&self, call: &'static str) {
        self.journal.borrow_mut().calls.push(call);
    }
}

impl Platform for MockPlatform {
    type Window = MockWindow;
    type Context = MockContext;
    type RawEvent = InputEvent;
    type Functions = ();

    fn init() -> Result<Self, BackendError> {
        Ok(MockPlatform::new(Script::default()).0)
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<MockWindow, BackendError> {
        self.record("create_window");
        if self.script.fail_window {
            return Err(BackendError::WindowCreation(format!(
                "no display available for '{}'",
                config.title
            )));
        }
        let mut journal = self.journal.borrow_mut();
        journal.windows_created += 1;
        Ok(MockWindow(journal.windows_created))
    }

    fn create_context(
        &mut self,
        _window: &MockWindow,
        requested: &ContextAttributes,
        _vsync: bool,
    ) -> Result<MockContext, BackendError> {
        self.record("create_context");
        self.journal.borrow_mut().requested = Some(*requested);
        if self.script.fail_context {
            return Err(BackendError::ContextCreation(
                "driver does not support the requested version".to_string(),
            ));
        }
        let mut journal = self.journal.borrow_mut();
        journal.contexts_created += 1;
        Ok(MockContext(journal.contexts_created))
    }

    fn resolve(&self, _context: &MockContext) -> Result<(), BackendError> {
        self.record("resolve");
        if self.script.fail_resolve {
            return Err(BackendError::ExtensionResolution("missing glCreateShader".to_string()));
        }
        Ok(())
    }

    fn negotiated(
        &self,
        _window: &MockWindow,
        _context: &MockContext,
        _functions: &(),
    ) -> Result<ContextAttributes, BackendError> {
        self.record("negotiated");
        let journal = self.journal.borrow();
        let requested = journal.requested.ok_or_else(|| {
            BackendError::ContextCreation("negotiated before creation".to_string())
        })?;
        Ok(self.script.negotiated.unwrap_or(requested))
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        let mut journal = self.journal.borrow_mut();
        journal.polls += 1;
        journal.queue.pop_front()
    }

    fn classify(event: &InputEvent) -> InputEvent {
        *event
    }

    fn swap_buffers(&self, _window: &MockWindow) {
        self.journal.borrow_mut().swaps += 1;
    }

    fn drawable_size(&self, _window: &MockWindow) -> (u32, u32) {
        (900, 560)
    }

    fn destroy_context(&mut self, _context: MockContext) {
        self.record("destroy_context");
        self.journal.borrow_mut().contexts_destroyed += 1;
    }

    fn destroy_window(&mut self, _window: MockWindow) {
        self.record("destroy_window");
        self.journal.borrow_mut().windows_destroyed += 1;
    }

    fn shutdown(self) {
        self.record("shutdown");
        self.journal.borrow_mut().shutdowns += 1;
    }
}

pub fn push_events(journal: &Shared, events: &[InputEvent]) {
    journal.borrow_mut().queue.extend(events.iter().copied());
}
