use crate::domain::ports::{CallArgs, RemoteCall};
use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

type Handler = Box<dyn Fn(&CallArgs) -> Result<Value, TransportError> + Send + Sync>;

/// A call observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: String,
    pub args: CallArgs,
}

/// A transport test double.
///
/// Each operation answers from its queue of canned replies first, then from
/// its handler if one is registered. Anything else is a
/// [`TransportError::Unscripted`]. Every call is recorded in order.
#[derive(Default)]
pub struct ScriptedTransport {
    queued: Mutex<HashMap<String, VecDeque<Result<Value, TransportError>>>>,
    handlers: Mutex<HashMap<String, Handler>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply for the next call to `operation`.
    pub fn respond(self, operation: &str, value: Value) -> Self {
        self.push(operation, Ok(value));
        self
    }

    /// Queues a transport failure for the next call to `operation`.
    pub fn fail(self, operation: &str, error: TransportError) -> Self {
        self.push(operation, Err(error));
        self
    }

    /// Answers every unqueued call to `operation` with `handler`.
    pub fn on<F>(self, operation: &str, handler: F) -> Self
    where
        F: Fn(&CallArgs) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.insert(operation.to_string(), Box::new(handler));
        }
        self
    }

    fn push(&self, operation: &str, reply: Result<Value, TransportError>) {
        if let Ok(mut queued) = self.queued.lock() {
            queued
                .entry(operation.to_string())
                .or_default()
                .push_back(reply);
        }
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Names of the operations called so far, oldest first.
    pub fn operations(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.operation).collect()
    }
}

#[async_trait]
impl RemoteCall for ScriptedTransport {
    async fn call(&self, operation: &str, args: CallArgs) -> Result<Value, TransportError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                operation: operation.to_string(),
                args: args.clone(),
            });
        }

        let queued = self
            .queued
            .lock()
            .ok()
            .and_then(|mut q| q.get_mut(operation).and_then(VecDeque::pop_front));
        if let Some(reply) = queued {
            return reply;
        }

        let handlers = self
            .handlers
            .lock()
            .map_err(|_| TransportError::Unscripted(operation.to_string()))?;
        match handlers.get(operation) {
            Some(handler) => handler(&args),
            None => Err(TransportError::Unscripted(operation.to_string())),
        }
    }
}
