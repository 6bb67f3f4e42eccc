// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Control logic for the yaw-mechanism fatigue test rig.
//!
//! The rig parks a servo at center for measurements, or sweeps it through
//! center/left/center/right while an ESC drives the motor, until a fixed
//! number of sweeps has elapsed.
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` mode, hardware reached only through `embedded-hal`
//!   traits and the [`pwm::PwmChannel`] / [`timing::Clock`] seams
//! - `embedded` feature: RP2040 board support (PWM slice driver, clocks)
//! - `defmt` feature: structured logging

#![cfg_attr(not(feature = "std"), no_std)]

pub mod config;
pub mod error;
pub mod indicator;
pub mod mode;
pub mod motor;
pub mod pwm;
pub mod rig;
pub mod sequencer;
pub mod switch;
pub mod timing;

// RP2040 board support (requires embedded feature)
#[cfg(feature = "embedded")]
pub mod board;

pub use config::RigConfig;
pub use error::{Error, Result};
pub use indicator::{Color, Indicator, StatusLight};
pub use mode::{Mode, ModeCell};
pub use motor::{arm_motor, ArmOutcome};
pub use pwm::PwmChannel;
pub use rig::{Outcome, Rig};
pub use sequencer::{CycleSequencer, SweepStep};
pub use switch::on_switch_edge;
pub use timing::Clock;
