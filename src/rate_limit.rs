use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use std::thread;

/// Spacing applied between match-detail calls.
pub trait Pacer {
    fn pause(&mut self);
}

/// Sleeps a fixed delay before every call except the first.
pub struct FixedDelay {
    delay: std::time::Duration,
    calls: usize,
}

impl FixedDelay {
    pub fn from_millis(delay_ms: u64) -> Self {
        FixedDelay {
            delay: std::time::Duration::from_millis(delay_ms),
            calls: 0,
        }
    }
}

impl Pacer for FixedDelay {
    fn pause(&mut self) {
        if self.calls > 0 && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.calls += 1;
    }
}

pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&mut self) {}
}

/// Caller-supplied point at which an aggregation run stops early.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cutoff {
    pub deadline: Option<DateTime<Utc>>,
    pub max_calls: Option<u32>,
}

impl Cutoff {
    pub fn none() -> Self {
        Cutoff::default()
    }

    /// Deadline `seconds` from now. Fails when the instant is not representable.
    pub fn after(seconds: i64) -> Result<Self, AppError> {
        let deadline = Duration::try_seconds(seconds)
            .and_then(|delta| Utc::now().checked_add_signed(delta))
            .ok_or_else(|| {
                AppError::PreconditionError(format!("deadline of {} seconds is out of range", seconds))
            })?;

        Ok(Cutoff {
            deadline: Some(deadline),
            max_calls: None,
        })
    }

    pub fn with_max_calls(mut self, max_calls: u32) -> Self {
        self.max_calls = Some(max_calls);
        self
    }

    pub fn is_reached(&self, calls_made: u32) -> bool {
        if let Some(max) = self.max_calls {
            if calls_made >= max {
                return true;
            }
        }
        match self.deadline {
            Some(deadline) => Utc::now() > deadline,
            None => false,
        }
    }
}
