// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Tri-color status light.

use crate::mode::Mode;
use embedded_hal::digital::OutputPin;

/// Colors the status light can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Off,
    Red,
    Green,
    Blue,
    /// Red + green.
    Amber,
    /// All three channels: the fault visual.
    White,
}

impl Color {
    /// Steady color for a mode. `Run` shows [`Color::Off`] once the motor
    /// is armed; the arming flash is driven by the motor start sequence.
    pub const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Measurement => Self::Blue,
            Mode::Run => Self::Off,
            Mode::Completed => Self::Green,
            Mode::Fault => Self::White,
        }
    }

    /// (red, green, blue) channel levels.
    pub const fn channels(self) -> (bool, bool, bool) {
        match self {
            Self::Off => (false, false, false),
            Self::Red => (true, false, false),
            Self::Green => (false, true, false),
            Self::Blue => (false, false, true),
            Self::Amber => (true, true, false),
            Self::White => (true, true, true),
        }
    }
}

/// Anything that can display a [`Color`].
pub trait Indicator {
    fn show(&mut self, color: Color);
}

/// Three output pins combined into one status signal.
pub struct StatusLight<R, G, B> {
    red: R,
    green: G,
    blue: B,
    color: Color,
}

impl<R, G, B> StatusLight<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// Take the pins and switch every channel off.
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut light = Self {
            red,
            green,
            blue,
            color: Color::Off,
        };
        light.show(Color::Off);
        light
    }

    /// Last color shown.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl<R, G, B> Indicator for StatusLight<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    fn show(&mut self, color: Color) {
        let (r, g, b) = color.channels();
        set_level(&mut self.red, r);
        set_level(&mut self.green, g);
        set_level(&mut self.blue, b);
        self.color = color;
    }
}

fn set_level(pin: &mut impl OutputPin, high: bool) {
    if high {
        pin.set_high().ok();
    } else {
        pin.set_low().ok();
    }
}
