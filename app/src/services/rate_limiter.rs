// catalog_server/src/services/rate_limiter.rs

//! In-memory fixed-window quotas, one counter per caller and access kind.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::RateLimitConfig;
use crate::errors::AppError;

/// Reads and writes are counted against separate quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
  Read,
  Write,
}

impl AccessKind {
  pub fn as_str(self) -> &'static str {
    match self {
      AccessKind::Read => "read",
      AccessKind::Write => "write",
    }
  }
}

/// Map size at which expired windows of idle callers are swept.
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug)]
struct Window {
  started: Instant,
  used: u32,
}

#[derive(Debug)]
pub struct RateLimiter {
  config: RateLimitConfig,
  windows: Mutex<HashMap<(String, AccessKind), Window>>,
}

impl RateLimiter {
  pub fn new(config: RateLimitConfig) -> Self {
    Self {
      config,
      windows: Mutex::new(HashMap::new()),
    }
  }

  fn limit_for(&self, kind: AccessKind) -> u32 {
    match kind {
      AccessKind::Read => self.config.reads_per_window,
      AccessKind::Write => self.config.writes_per_window,
    }
  }

  /// Counts one request for `client`. Fails with `RateLimited` once the quota
  /// for the current window is spent.
  pub fn check(&self, client: &str, kind: AccessKind) -> Result<(), AppError> {
    self.check_at(client, kind, Instant::now())
  }

  pub(crate) fn check_at(&self, client: &str, kind: AccessKind, now: Instant) -> Result<(), AppError> {
    let limit = self.limit_for(kind);
    let mut windows = self.windows.lock();

    let period = self.config.window;
    if windows.len() >= SWEEP_THRESHOLD {
      windows.retain(|_, w| now.saturating_duration_since(w.started) < period);
    }

    let window = windows.entry((client.to_string(), kind)).or_insert(Window { started: now, used: 0 });
    if now.saturating_duration_since(window.started) >= period {
      *window = Window { started: now, used: 0 };
    }
    if window.used >= limit {
      let remaining = period.saturating_sub(now.saturating_duration_since(window.started));
      let retry_after_secs = ceil_secs(remaining).max(1);
      debug!(client, kind = kind.as_str(), limit, retry_after_secs, "Rate limit exceeded.");
      return Err(AppError::RateLimited { retry_after_secs });
    }
    window.used += 1;
    Ok(())
  }

  #[cfg(test)]
  fn tracked_windows(&self) -> usize {
    self.windows.lock().len()
  }
}

fn ceil_secs(d: Duration) -> u64 {
  d.as_secs() + u64::from(d.subsec_nanos() > 0)
}
