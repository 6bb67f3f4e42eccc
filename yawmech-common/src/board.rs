// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! RP2040 board support.
//!
//! | Signal          | Pin    | Peripheral           |
//! |-----------------|--------|----------------------|
//! | Servo PWM       | GPIO0  | PWM slice 0, chan A  |
//! | Motor (ESC) PWM | GPIO2  | PWM slice 1, chan A  |
//! | Red / green / blue | GPIO13 / 14 / 15 | SIO out |
//! | Mode switch     | GPIO10 | SIO in, pull-down, both edges |
//!
//! PWM slices run edge-aligned with one counter tick per microsecond. The
//! slice raises the pin at wrap and lowers it at the compare match, and the
//! compare register is latched at wrap, so widths are always glitch-free.

use crate::error::Result;
use crate::indicator::StatusLight;
use crate::pwm::{check_pulse, PwmChannel};
use crate::timing::Clock;
use embedded_hal::pwm::SetDutyCycle;
use rp2040_hal::{
    self as hal,
    clocks::init_clocks_and_plls,
    gpio::{
        bank0::{Gpio10, Gpio13, Gpio14, Gpio15},
        FunctionSioInput, FunctionSioOutput, Interrupt, Pin, PullDown,
    },
    pac,
    pwm::{FreeRunning, Pwm0, Pwm1, Slice, SliceId, Slices, ValidSliceMode},
    Clock as _, Sio, Timer, Watchdog,
};

/// External crystal on the Pico.
pub const XTAL_FREQ_HZ: u32 = 12_000_000;

pub type SwitchPin = Pin<Gpio10, FunctionSioInput, PullDown>;
pub type Light = StatusLight<
    Pin<Gpio13, FunctionSioOutput, PullDown>,
    Pin<Gpio14, FunctionSioOutput, PullDown>,
    Pin<Gpio15, FunctionSioOutput, PullDown>,
>;

/// Peripherals the rig needs, configured and ready.
pub struct Board {
    pub servo: SlicePwm<Pwm0>,
    pub motor: SlicePwm<Pwm1>,
    pub light: Light,
    pub switch: SwitchPin,
    pub timer: Timer,
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// Crystal oscillator or PLLs failed to lock.
    Clocks,
}

/// Bring up clocks, GPIO, PWM slices and the timer.
///
/// PWM slices are left disabled; [`PwmChannel::configure`] starts them.
pub fn init_board(mut pac: pac::Peripherals) -> core::result::Result<Board, BoardError> {
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let clocks = init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .map_err(|_| BoardError::Clocks)?;
    let sys_hz = clocks.system_clock.freq().to_Hz();

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let sio = Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let slices = Slices::new(pac.PWM, &mut pac.RESETS);
    let mut servo_slice = slices.pwm0;
    let mut motor_slice = slices.pwm1;
    servo_slice.channel_a.output_to(pins.gpio0);
    motor_slice.channel_a.output_to(pins.gpio2);

    let light = StatusLight::new(
        pins.gpio13.into_push_pull_output(),
        pins.gpio14.into_push_pull_output(),
        pins.gpio15.into_push_pull_output(),
    );

    let mut switch = pins.gpio10.into_pull_down_input();
    acknowledge_switch(&mut switch);
    switch.set_interrupt_enabled(Interrupt::EdgeHigh, true);
    switch.set_interrupt_enabled(Interrupt::EdgeLow, true);

    #[cfg(feature = "defmt")]
    defmt::println!("Board: clk_sys={}Hz", sys_hz);

    Ok(Board {
        servo: SlicePwm::new(servo_slice, sys_hz),
        motor: SlicePwm::new(motor_slice, sys_hz),
        light,
        switch,
        timer,
    })
}

/// Clear both pending edge flags on the switch input.
pub fn acknowledge_switch(switch: &mut SwitchPin) {
    switch.clear_interrupt(Interrupt::EdgeHigh);
    switch.clear_interrupt(Interrupt::EdgeLow);
}

/// Whether the switch has an unacknowledged edge.
pub fn switch_pending(switch: &SwitchPin) -> bool {
    switch.interrupt_status(Interrupt::EdgeHigh) || switch.interrupt_status(Interrupt::EdgeLow)
}

/// One PWM slice driving its channel A pin.
pub struct SlicePwm<I>
where
    I: SliceId,
    FreeRunning: ValidSliceMode<I>,
{
    slice: Slice<I, FreeRunning>,
    period_us: u16,
    pulse_us: u16,
    running: bool,
}

impl<I> SlicePwm<I>
where
    I: SliceId,
    FreeRunning: ValidSliceMode<I>,
{
    /// Take a slice whose channel A is already routed to its pin.
    pub fn new(mut slice: Slice<I, FreeRunning>, sys_hz: u32) -> Self {
        slice.disable();
        slice.clr_ph_correct();
        // One tick per microsecond: 125 MHz / 125.
        let div_int = (sys_hz / 1_000_000).clamp(1, 255) as u8;
        slice.set_div_int(div_int);
        slice.set_div_frac(0);
        slice.channel_a.set_duty_cycle(0).ok();
        Self {
            slice,
            period_us: 0,
            pulse_us: 0,
            running: false,
        }
    }
}

impl<I> PwmChannel for SlicePwm<I>
where
    I: SliceId,
    FreeRunning: ValidSliceMode<I>,
{
    fn configure(&mut self, period_us: u16, pulse_us: u16) -> Result<()> {
        check_pulse(period_us, pulse_us)?;
        self.slice.disable();
        self.slice.set_top(period_us - 1);
        self.period_us = period_us;
        self.pulse_us = pulse_us;
        self.start();
        Ok(())
    }

    fn set_pulse_width(&mut self, pulse_us: u16) -> Result<()> {
        check_pulse(self.period_us, pulse_us)?;
        // CC is double-buffered and latched at wrap.
        self.slice.channel_a.set_duty_cycle(pulse_us).ok();
        self.pulse_us = pulse_us;
        Ok(())
    }

    fn pulse_width(&self) -> u16 {
        self.pulse_us
    }

    fn period(&self) -> u16 {
        self.period_us
    }

    fn start(&mut self) {
        self.slice.channel_a.set_duty_cycle(self.pulse_us).ok();
        self.slice.set_counter(0);
        self.slice.enable();
        self.running = true;
    }

    fn stop(&mut self) {
        if !self.running {
            return;
        }
        // Let the in-flight pulse finish with a zero width latched, so the
        // counter halts with the pin low instead of mid-pulse.
        self.slice.channel_a.set_duty_cycle(0).ok();
        self.slice.clear_interrupt();
        while !self.slice.has_overflown() {
            cortex_m::asm::nop();
        }
        self.slice.disable();
        self.slice.clear_interrupt();
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

impl Clock for Timer {
    fn now_us(&mut self) -> u64 {
        self.get_counter().ticks()
    }
}
