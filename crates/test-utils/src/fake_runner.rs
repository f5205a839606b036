use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use ansible_cmd::errors::{AnsibleError, Result};
use ansible_cmd::exec::{Invocation, OutputEvent, ProcessRunner, StreamKind};

/// A fake runner that:
/// - records every invocation it is asked to run (never spawns anything)
/// - replays scripted output chunks when the invocation streams output
/// - settles according to a scripted exit code.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    exit_code: i32,
    output: Vec<OutputEvent>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    pub fn with_output(mut self, stream: StreamKind, data: &[u8]) -> Self {
        self.output.push(OutputEvent {
            stream,
            data: data.to_vec(),
        });
        self
    }

    /// Recorded invocations, oldest first. The output sender is stripped.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn spawn_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    /// The single recorded invocation; panics unless exactly one exists.
    pub fn only_invocation(&self) -> Invocation {
        let invocations = self.invocations();
        assert_eq!(invocations.len(), 1, "expected exactly one spawn");
        invocations.into_iter().next().unwrap()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, mut invocation: Invocation) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let output = invocation.output.take();
            let streams = invocation.streams_output();
            self.invocations.lock().unwrap().push(invocation);

            if streams {
                if let Some(tx) = output {
                    for event in &self.output {
                        let _ = tx.send(event.clone());
                    }
                }
            }

            if self.exit_code == 0 {
                Ok(())
            } else {
                Err(AnsibleError::ProcessExit {
                    code: self.exit_code,
                })
            }
        })
    }
}
