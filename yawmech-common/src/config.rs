// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Compile-time rig parameters.
//!
//! All pulse widths and periods are in microseconds: the PWM drivers run
//! their counters at one tick per microsecond.

/// Servo frame length (50 Hz).
pub const SERVO_PERIOD_US: u16 = 20_000;
/// ESC frame length.
pub const MOTOR_PERIOD_US: u16 = 20_000;

/// Servo-specific calibrated positions.
pub const SERVO_CENTER_US: u16 = 1_400;
pub const SERVO_LEFT_US: u16 = 1_100;
pub const SERVO_RIGHT_US: u16 = 2_000;

/// Positions visited by one sweep, in order.
pub const SWEEP_PATTERN: [u16; 4] = [SERVO_CENTER_US, SERVO_LEFT_US, SERVO_CENTER_US, SERVO_RIGHT_US];

/// Throttle below the ESC minimum. Holding it through the arming window
/// satisfies the ESC's "throttle low at power-up" check.
pub const MOTOR_ARM_US: u16 = 750;
/// Throttle applied once the ESC is armed.
pub const MOTOR_RUN_US: u16 = 2_000;

/// Time spent at each sweep position.
pub const DWELL_MS: u32 = 500;
/// The test completes once this many sweeps have been exceeded (~5 hours).
pub const CYCLE_BUDGET: u32 = 9_000;

/// Number of indicator flashes before the motor goes live.
pub const ARMING_FLASH_STEPS: u32 = 28;
/// Pause between indicator flashes (28 steps ≈ 3 s).
pub const ARMING_FLASH_STEP_MS: u32 = 107;

/// Busy wait after a switch edge before the interrupt is acknowledged.
pub const DEBOUNCE_MS: u32 = 4;

/// How often blocking handlers re-read the mode.
pub const MODE_POLL_MS: u32 = 10;

/// Cycles between progress log lines.
pub const PROGRESS_LOG_EVERY: u32 = 100;

const _: () = {
    let mut i = 0;
    while i < SWEEP_PATTERN.len() {
        assert!(SWEEP_PATTERN[i] < SERVO_PERIOD_US);
        i += 1;
    }
    assert!(MOTOR_ARM_US < MOTOR_RUN_US);
    assert!(MOTOR_RUN_US < MOTOR_PERIOD_US);
    assert!(MODE_POLL_MS <= DWELL_MS);
};

/// Rig timing and limits, gathered so one value describes a whole test run.
///
/// The firmware always runs with [`RigConfig::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RigConfig {
    pub servo_period_us: u16,
    pub motor_period_us: u16,
    pub sweep_pattern: [u16; 4],
    pub motor_arm_us: u16,
    pub motor_run_us: u16,
    pub dwell_ms: u32,
    pub cycle_budget: u32,
    pub arming_flash_steps: u32,
    pub arming_flash_step_ms: u32,
    pub mode_poll_ms: u32,
    pub progress_log_every: u32,
}

impl RigConfig {
    pub const DEFAULT: Self = Self {
        servo_period_us: SERVO_PERIOD_US,
        motor_period_us: MOTOR_PERIOD_US,
        sweep_pattern: SWEEP_PATTERN,
        motor_arm_us: MOTOR_ARM_US,
        motor_run_us: MOTOR_RUN_US,
        dwell_ms: DWELL_MS,
        cycle_budget: CYCLE_BUDGET,
        arming_flash_steps: ARMING_FLASH_STEPS,
        arming_flash_step_ms: ARMING_FLASH_STEP_MS,
        mode_poll_ms: MODE_POLL_MS,
        progress_log_every: PROGRESS_LOG_EVERY,
    };

    /// Pulse width the servo is parked at.
    pub const fn servo_center_us(&self) -> u16 {
        self.sweep_pattern[0]
    }

    /// Same configuration with a different cycle budget.
    pub const fn with_cycle_budget(mut self, cycle_budget: u32) -> Self {
        self.cycle_budget = cycle_budget;
        self
    }

    /// Wall time one full sweep takes.
    pub const fn sweep_ms(&self) -> u64 {
        self.dwell_ms as u64 * self.sweep_pattern.len() as u64
    }

    /// Estimated time left once `cycles_done` sweeps have completed.
    pub const fn remaining_ms(&self, cycles_done: u32) -> u64 {
        // Completion fires when the count exceeds the budget, so one extra sweep runs.
        let total = self.cycle_budget as u64 + 1;
        let done = cycles_done as u64;
        if done >= total {
            0
        } else {
            (total - done) * self.sweep_ms()
        }
    }
}

impl Default for RigConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
