use crate::{error::Error, tape::HttpTape};
use std::sync::Arc;

type Hook = Box<dyn Fn() + Send + Sync>;

/// Composes one test scope: the tapes it uses plus explicit hook lists for
/// each lifecycle point, invoked in registration order. `close` runs the
/// teardown hooks and finalizes every tape.
#[derive(Default)]
pub struct TapeSession {
    tapes: Vec<Arc<HttpTape>>,
    setup_hooks: Vec<Hook>,
    before_call_hooks: Vec<Hook>,
    after_call_hooks: Vec<Hook>,
    teardown_hooks: Vec<Hook>,
}

impl TapeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tape(&mut self, tape: Arc<HttpTape>) -> &mut Self {
        self.tapes.push(tape);
        self
    }

    pub fn on_setup<F: Fn() + Send + Sync + 'static>(&mut self, hook: F) -> &mut Self {
        self.setup_hooks.push(Box::new(hook));
        self
    }

    pub fn on_before_call<F: Fn() + Send + Sync + 'static>(&mut self, hook: F) -> &mut Self {
        self.before_call_hooks.push(Box::new(hook));
        self
    }

    pub fn on_after_call<F: Fn() + Send + Sync + 'static>(&mut self, hook: F) -> &mut Self {
        self.after_call_hooks.push(Box::new(hook));
        self
    }

    pub fn on_teardown<F: Fn() + Send + Sync + 'static>(&mut self, hook: F) -> &mut Self {
        self.teardown_hooks.push(Box::new(hook));
        self
    }

    pub fn tapes(&self) -> &[Arc<HttpTape>] {
        &self.tapes
    }

    pub fn start(&self) {
        for hook in &self.setup_hooks {
            hook();
        }
    }

    pub fn before_call(&self) {
        for hook in &self.before_call_hooks {
            hook();
        }
    }

    pub fn after_call(&self) {
        for hook in &self.after_call_hooks {
            hook();
        }
    }

    /// Runs teardown hooks, then closes every tape. The first tape failure is
    /// returned after all tapes have been given the chance to finalize.
    pub fn close(&self) -> Result<(), Error> {
        for hook in &self.teardown_hooks {
            hook();
        }

        let mut result = Ok(());
        for tape in &self.tapes {
            if let Err(e) = tape.close() {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        result
    }
}
