//! Clock source for cooldown arithmetic
//!
//! Precheck and commit must compare against the same clock; injecting it
//! also lets tests drive time without sleeping.

/// Epoch-millisecond clock
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
