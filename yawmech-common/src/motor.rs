// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! ESC arming sequence.
//!
//! ESCs refuse throttle unless they first see a low pulse for a while after
//! the signal appears. The sequence holds the arming width for a fixed
//! window while flashing the indicator as a warning to the operator, then
//! applies the running width.
//!
//! There is no feedback from the ESC: if it does not arm, the motor simply
//! stays still and only someone watching the rig will notice.

use crate::config::RigConfig;
use crate::error::Result;
use crate::indicator::{Color, Indicator};
use crate::mode::{Mode, ModeCell};
use crate::pwm::PwmChannel;
use embedded_hal::delay::DelayNs;

/// Colors alternated while the ESC arms.
pub const ARMING_FLASH: [Color; 2] = [Color::Amber, Color::Red];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArmOutcome {
    /// Running throttle applied.
    Armed,
    /// The rig left `Run` during the window; the motor stays at the arming width.
    Aborted,
}

/// Re-enable the motor channel at the arming width, flash, then throttle up.
///
/// Blocks for `arming_flash_steps * arming_flash_step_ms`.
pub fn arm_motor<M, L, D>(
    motor: &mut M,
    light: &mut L,
    delay: &mut D,
    mode: &ModeCell,
    config: &RigConfig,
) -> Result<ArmOutcome>
where
    M: PwmChannel,
    L: Indicator,
    D: DelayNs,
{
    motor.set_pulse_width(config.motor_arm_us)?;
    motor.start();

    #[cfg(feature = "defmt")]
    defmt::info!(
        "Motor: arming for {} ms",
        config.arming_flash_steps * config.arming_flash_step_ms
    );

    light.show(ARMING_FLASH[0]);
    for step in 0..config.arming_flash_steps {
        delay.delay_ms(config.arming_flash_step_ms);
        light.show(ARMING_FLASH[(step as usize + 1) % ARMING_FLASH.len()]);
    }

    if !mode.is(Mode::Run) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Motor: run cancelled during arming");
        return Ok(ArmOutcome::Aborted);
    }

    motor.set_pulse_width(config.motor_run_us)?;

    #[cfg(feature = "defmt")]
    defmt::info!("Motor: armed, throttle {} us", config.motor_run_us);
    Ok(ArmOutcome::Armed)
}
