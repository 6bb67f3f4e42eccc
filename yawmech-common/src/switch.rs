// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Rocker switch edge handling.
//!
//! The switch is a two-position rocker, so every edge in either direction
//! flips the mode. Debouncing is a fixed wait before the pending flag is
//! cleared: bounce edges that arrive during the wait are absorbed, later
//! ones are not.

use crate::mode::{Mode, ModeCell};
use embedded_hal::delay::DelayNs;

/// Handle one switch edge: toggle the mode, wait out the bounce, then
/// acknowledge the interrupt.
///
/// Called from interrupt context. Touches nothing but `mode`.
pub fn on_switch_edge<D, A>(mode: &ModeCell, delay: &mut D, debounce_ms: u32, acknowledge: A) -> Mode
where
    D: DelayNs,
    A: FnOnce(),
{
    let next = mode.toggle();
    delay.delay_ms(debounce_ms);
    acknowledge();
    next
}
