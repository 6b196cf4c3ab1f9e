//! Shared test fixtures for loader tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use chunkguard::BoxError;

/// One scripted outcome for the programmable factory.
#[derive(Debug, Clone)]
pub enum Outcome {
    Ok(&'static str),
    Err(&'static str),
}

/// A factory whose outcomes follow a fixed script.
///
/// Each invocation pops the next outcome; invocations beyond the script
/// repeat the final outcome. A call counter records how many times the
/// loader actually invoked the factory.
pub struct ScriptedFactory {
    script: Mutex<VecDeque<Outcome>>,
    last: Mutex<Option<Outcome>>,
    calls: AtomicU32,
}

impl ScriptedFactory {
    pub fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            last: Mutex::new(None),
            calls: AtomicU32::new(0),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        match script.pop_front() {
            Some(outcome) => {
                *last = Some(outcome.clone());
                outcome
            }
            None => last.clone().expect("scripted factory invoked with empty script"),
        }
    }

    /// Produce the closure the loader consumes.
    pub fn factory(
        self: &Arc<Self>,
    ) -> impl Fn() -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<&'static str, BoxError>> + Send>,
    > {
        let this = self.clone();
        move || {
            let this = this.clone();
            Box::pin(async move {
                match this.next_outcome() {
                    Outcome::Ok(value) => Ok(value),
                    Outcome::Err(message) => Err(BoxError::from(message)),
                }
            })
        }
    }
}
