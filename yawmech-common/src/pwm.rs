// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Leading-edge PWM channel contract.
//!
//! A channel counts up from zero and reloads at the end of each period. The
//! output goes high at every reload and low when the counter matches the
//! compare value, so the duty cycle is `pulse / period`.
//!
//! Compare writes are double-buffered: a new width only takes effect at
//! the next period boundary, never in the middle of a pulse.

use crate::error::{Error, Result};

pub trait PwmChannel {
    /// Set the period and initial width, then start counting.
    fn configure(&mut self, period_us: u16, pulse_us: u16) -> Result<()>;

    /// Load a new compare value, applied at the next period boundary.
    fn set_pulse_width(&mut self, pulse_us: u16) -> Result<()>;

    /// Last width written (not necessarily the one on the pin yet).
    fn pulse_width(&self) -> u16;

    fn period(&self) -> u16;

    /// Resume counting with the current period and width.
    fn start(&mut self);

    /// Halt the counter and leave the output driven low.
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

/// Check that a period/width pair describes a real pulse.
pub fn check_pulse(period_us: u16, pulse_us: u16) -> Result<()> {
    if period_us == 0 {
        return Err(Error::ZeroPeriod);
    }
    if pulse_us >= period_us {
        return Err(Error::PulseOutOfRange {
            pulse_us,
            period_us,
        });
    }
    Ok(())
}
