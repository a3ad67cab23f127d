#![allow(dead_code)]
//! A scriptable notification sender for exercising the dispatcher over HTTP.

use async_trait::async_trait;
use oddswatch::core::NotificationSender;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
enum Behaviour {
    #[default]
    Succeed,
    Fail,
    Panic,
}

/// Counts calls and completions, optionally stalling, failing or panicking.
#[derive(Debug, Default)]
pub struct FakeSender {
    started: AtomicUsize,
    completed: AtomicUsize,
    messages: Mutex<Vec<String>>,
    delay: Option<Duration>,
    behaviour: Behaviour,
}

impl FakeSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            behaviour: Behaviour::Fail,
            ..Default::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            behaviour: Behaviour::Panic,
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sends that have entered `send`.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Sends that have returned, successfully or not.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Polls until `predicate` holds or the timeout elapses.
    pub async fn wait_for(&self, predicate: impl Fn(&Self) -> bool, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if predicate(self) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        predicate(self)
    }
}

#[async_trait]
impl NotificationSender for FakeSender {
    async fn send(&self, message: &str) -> anyhow::Result<()> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.messages.lock().unwrap().push(message.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match self.behaviour {
            Behaviour::Succeed => Ok(()),
            Behaviour::Fail => anyhow::bail!("fake telegram outage: chat unreachable"),
            Behaviour::Panic => panic!("fake sender panicked"),
        }
    }
}
