//! Scripted [`StreamTransport`] for session tests.
//!
//! Each `connect()` pops the next scripted result (`Ok(())` when the script
//! is exhausted). Each `recv()` pops the next [`Recv`] step; once the steps
//! run out, `recv()` never resolves, which parks the session in the
//! streaming state until shutdown.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::StreamTransport;

/// One scripted `recv()` outcome.
#[derive(Debug, Clone)]
pub enum Recv {
    Frame(String),
    /// Remote closed cleanly.
    Closed,
    /// Transport failure with the given message.
    Error(String),
}

/// Shared call counters, readable after the transport moved into a session.
#[derive(Debug, Clone, Default)]
pub struct TransportCounters {
    connects: Arc<AtomicU32>,
    closes: Arc<AtomicU32>,
}

impl TransportCounters {
    pub fn connects(&self) -> u32 {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> u32 {
        self.closes.load(Ordering::SeqCst)
    }
}

pub struct ScriptedTransport {
    connect_results: VecDeque<Result<()>>,
    steps: VecDeque<Recv>,
    sent: Arc<Mutex<Vec<String>>>,
    counters: TransportCounters,
    connected: bool,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            connect_results: VecDeque::new(),
            steps: VecDeque::new(),
            sent: Arc::default(),
            counters: TransportCounters::default(),
            connected: false,
        }
    }

    pub fn with_connect_results(mut self, results: Vec<Result<()>>) -> Self {
        self.connect_results = results.into();
        self
    }

    pub fn with_steps(mut self, steps: Vec<Recv>) -> Self {
        self.steps = steps.into();
        self
    }

    /// Frames sent so far, across all connections.
    pub fn sent(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.sent)
    }

    pub fn counters(&self) -> TransportCounters {
        self.counters.clone()
    }
}

#[async_trait]
impl StreamTransport for ScriptedTransport {
    async fn connect(&mut self) -> Result<()> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        let result = self.connect_results.pop_front().unwrap_or(Ok(()));
        self.connected = result.is_ok();
        result
    }

    async fn send(&mut self, text: String) -> Result<()> {
        if !self.connected {
            return Err(Error::Connection("Not connected".into()));
        }
        self.sent.lock().push(text);
        Ok(())
    }

    async fn recv(&mut self) -> Result<Option<String>> {
        if !self.connected {
            return Err(Error::Connection("Not connected".into()));
        }
        match self.steps.pop_front() {
            Some(Recv::Frame(frame)) => Ok(Some(frame)),
            Some(Recv::Closed) => {
                self.connected = false;
                Ok(None)
            }
            Some(Recv::Error(message)) => {
                self.connected = false;
                Err(Error::Connection(message))
            }
            None => std::future::pending().await,
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        self.connected = false;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
