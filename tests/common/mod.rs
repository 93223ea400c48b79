use std::sync::Mutex;

use ginkgo_docs::error::Result;
use ginkgo_docs::{CommandRunner, Completion, Invocation};

/// Records invocations instead of running them, reporting a fixed exit code.
pub struct RecordingRunner {
    invocations: Mutex<Vec<Invocation>>,
    code: Option<i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::with_exit_code(Some(0))
    }

    pub fn with_exit_code(code: Option<i32>) -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            code,
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<Completion> {
        self.invocations.lock().unwrap().push(invocation.clone());
        Ok(Completion { code: self.code })
    }
}
