// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Errors raised by the PWM channel contract.

use core::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A pulse width does not fit inside the channel period.
    PulseOutOfRange { pulse_us: u16, period_us: u16 },
    /// A channel was configured with a zero-length period.
    ZeroPeriod,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PulseOutOfRange {
                pulse_us,
                period_us,
            } => write!(
                f,
                "pulse width {pulse_us} us does not fit in a {period_us} us period"
            ),
            Self::ZeroPeriod => f.write_str("PWM period must be non-zero"),
        }
    }
}

impl core::error::Error for Error {}
