// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Operating mode and the cell it is shared through.
//!
//! The mode is the only datum shared between interrupt and main-loop
//! context. [`ModeCell`] stores it in a single `AtomicU8` so a read can
//! never observe a torn value, and only uses plain `load`/`store`, which
//! are available on Cortex-M0+ (no compare-and-swap there).
//!
//! Writers:
//! - the switch interrupt, flipping `Measurement` <-> `Run` ([`ModeCell::toggle`])
//! - the main loop, finishing a run ([`ModeCell::complete`]) or
//!   recording a fault ([`ModeCell::fault`])

use core::sync::atomic::{AtomicU8, Ordering};

/// Rig operating modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Servo parked at center, motor signal off.
    Measurement = 0,
    /// Servo sweeping, motor running.
    Run = 1,
    /// Cycle budget reached. Terminal.
    Completed = 2,
    /// Invariant violated. Terminal, shown as a white indicator.
    Fault = 3,
}

impl Mode {
    /// Decode a stored value. Anything outside the known encodings is a fault.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Measurement,
            1 => Self::Run,
            2 => Self::Completed,
            _ => Self::Fault,
        }
    }

    /// Modes no transition leaves, short of a reset.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Fault)
    }
}

/// Interrupt-safe holder for the current [`Mode`].
pub struct ModeCell {
    raw: AtomicU8,
}

impl ModeCell {
    /// Power-on state.
    pub const fn new() -> Self {
        Self::with_mode(Mode::Measurement)
    }

    pub const fn with_mode(mode: Mode) -> Self {
        Self {
            raw: AtomicU8::new(mode as u8),
        }
    }

    pub fn get(&self) -> Mode {
        Mode::from_u8(self.raw.load(Ordering::Acquire))
    }

    /// Raw stored byte, for diagnostics when [`get`](Self::get) reports a fault.
    pub fn raw(&self) -> u8 {
        self.raw.load(Ordering::Acquire)
    }

    pub fn is(&self, mode: Mode) -> bool {
        self.get() == mode
    }

    /// Flip `Measurement` <-> `Run`. Other modes are left alone, so the
    /// switch has no effect once the rig is done.
    ///
    /// Must only be called from the switch interrupt: the read and the write
    /// are separate operations and rely on that handler not being re-entered.
    pub fn toggle(&self) -> Mode {
        let next = match self.get() {
            Mode::Measurement => Mode::Run,
            Mode::Run => Mode::Measurement,
            other => return other,
        };
        self.raw.store(next as u8, Ordering::Release);
        next
    }

    /// Finish the test. The only way into `Completed`, and only from `Run`.
    ///
    /// Runs inside a critical section so a switch edge cannot land between
    /// the check and the store. Returns whether the transition happened.
    pub fn complete(&self) -> bool {
        critical_section::with(|_| {
            if self.get() == Mode::Run {
                self.raw.store(Mode::Completed as u8, Ordering::Release);
                true
            } else {
                false
            }
        })
    }

    /// Record an invariant violation.
    pub fn fault(&self) {
        self.raw.store(Mode::Fault as u8, Ordering::Release);
    }

    /// Store an arbitrary encoding. Used to exercise the fault path.
    #[doc(hidden)]
    pub fn store_raw(&self, value: u8) {
        self.raw.store(value, Ordering::Release);
    }
}

impl Default for ModeCell {
    fn default() -> Self {
        Self::new()
    }
}
