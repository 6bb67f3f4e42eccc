// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Monotonic time source.

use embedded_hal::delay::DelayNs;

/// Free-running microsecond counter that never wraps in practice (64-bit).
pub trait Clock {
    fn now_us(&mut self) -> u64;
}

/// Block until `deadline_us`, re-checking `keep_waiting` every `poll_ms`.
///
/// Returns `true` when the deadline was reached and `false` when
/// `keep_waiting` asked to stop early.
pub fn sleep_until<T, F>(timer: &mut T, deadline_us: u64, poll_ms: u32, mut keep_waiting: F) -> bool
where
    T: Clock + DelayNs,
    F: FnMut() -> bool,
{
    let poll_us = u64::from(poll_ms) * 1_000;
    loop {
        if !keep_waiting() {
            return false;
        }
        let now = timer.now_us();
        if now >= deadline_us {
            return true;
        }
        let step = (deadline_us - now).min(poll_us);
        timer.delay_us(u32::try_from(step).unwrap_or(u32::MAX));
    }
}
