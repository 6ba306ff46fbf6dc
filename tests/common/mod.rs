// MIT License - Copyright (c) 2026 Peter Wright
// Scripted camera doubles for integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use ptz_lan_control::{Action, Command, DeviceErrorCode, PtzError, Result, Snapshot, Transport};
use serde_json::{Value, json};

/// One request seen by the mock.
#[derive(Debug, Clone)]
pub struct Call {
    pub command: Command,
    pub payload: Value,
    pub action: Action,
    /// When the reply was handed back.
    pub answered_at: Instant,
}

/// Transport double: records every request and answers from a script.
///
/// One-shot replies queued with [`MockTransport::push`] are used first,
/// then the standing reply set with [`MockTransport::reply`], then `{}`.
#[derive(Default)]
pub struct MockTransport {
    queued: Mutex<HashMap<Command, VecDeque<Result<Value>>>>,
    standing: Mutex<HashMap<Command, Value>>,
    calls: Mutex<Vec<Call>>,
    latency: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply, so concurrent callers overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn reply(self, command: Command, value: Value) -> Self {
        self.standing.lock().unwrap().insert(command, value);
        self
    }

    pub fn push(&self, command: Command, result: Result<Value>) {
        self.queued
            .lock()
            .unwrap()
            .entry(command)
            .or_default()
            .push_back(result);
    }

    pub fn fail(self, command: Command, error: PtzError) -> Self {
        self.push(command, Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.calls().iter().map(|c| c.command).collect()
    }

    pub fn count(&self, command: Command) -> usize {
        self.calls().iter().filter(|c| c.command == command).count()
    }

    pub fn last_payload(&self, command: Command) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|c| c.command == command)
            .map(|c| c.payload)
    }

    fn answer(&self, command: Command) -> Result<Value> {
        if let Some(result) = self
            .queued
            .lock()
            .unwrap()
            .get_mut(&command)
            .and_then(VecDeque::pop_front)
        {
            return result;
        }
        Ok(self
            .standing
            .lock()
            .unwrap()
            .get(&command)
            .cloned()
            .unwrap_or_else(|| json!({})))
    }
}

impl Transport for MockTransport {
    async fn request(&self, command: Command, payload: Value, action: Action) -> Result<Value> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let result = self.answer(command);
        self.calls.lock().unwrap().push(Call {
            command,
            payload,
            action,
            answered_at: Instant::now(),
        });
        result
    }
}

pub fn device_error(command: Command, code: i64) -> PtzError {
    PtzError::Device {
        command: command.to_string(),
        code: DeviceErrorCode::from_code(code),
        detail: String::new(),
    }
}

pub fn transport_error(command: Command) -> PtzError {
    PtzError::Transport {
        command: command.to_string(),
        reason: "connection reset by peer".to_string(),
    }
}

/// Snapshot double returning a fixed frame.
pub struct MockSnapshot {
    pub frame: Vec<u8>,
    pub captures: AtomicUsize,
}

impl MockSnapshot {
    pub fn new(frame: &[u8]) -> Self {
        Self {
            frame: frame.to_vec(),
            captures: AtomicUsize::new(0),
        }
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

impl Snapshot for MockSnapshot {
    async fn snapshot(&self, _channel: u32) -> Result<Vec<u8>> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        Ok(self.frame.clone())
    }
}
