// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Simulated rig peripherals shared by the integration tests.
//!
//! Every fake writes into one [`Bench`] log stamped with the simulated
//! time, so tests can check both ordering and cadence.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use yawmech_common::pwm::check_pulse;
use yawmech_common::{Clock, Color, Indicator, ModeCell, PwmChannel, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Servo,
    Motor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmEvent {
    Configure { period_us: u16, pulse_us: u16 },
    Pulse(u16),
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Pwm(Channel, PwmEvent),
    Light(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamped {
    pub at_us: u64,
    pub event: Event,
}

type WriteHook = Box<dyn FnMut(u16)>;

/// Shared log and simulated time.
#[derive(Clone, Default)]
pub struct Bench {
    log: Rc<RefCell<Vec<Stamped>>>,
    now_us: Rc<Cell<u64>>,
    servo_hook: Rc<RefCell<Option<WriteHook>>>,
}

impl Bench {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: Event) {
        self.log.borrow_mut().push(Stamped {
            at_us: self.now_us.get(),
            event,
        });
    }

    pub fn servo(&self) -> FakePwm {
        FakePwm::new(self.clone(), Channel::Servo)
    }

    pub fn motor(&self) -> FakePwm {
        FakePwm::new(self.clone(), Channel::Motor)
    }

    pub fn light(&self) -> FakeLight {
        FakeLight {
            bench: self.clone(),
        }
    }

    pub fn clock<'a>(&self, mode: &'a ModeCell) -> FakeClock<'a> {
        FakeClock {
            bench: self.clone(),
            mode,
            elapsed_ns: 0,
            script: VecDeque::new(),
            limit_us: 24 * 3_600 * 1_000_000,
        }
    }

    /// Run `hook` after every accepted servo width write, standing in for an
    /// interrupt that lands between the write and whatever follows it.
    pub fn on_servo_write(&self, hook: impl FnMut(u16) + 'static) {
        *self.servo_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn now_us(&self) -> u64 {
        self.now_us.get()
    }

    pub fn events(&self) -> Vec<Stamped> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Servo widths written after power-on, in order.
    pub fn servo_pulses(&self) -> Vec<u16> {
        self.pwm_events(Channel::Servo)
            .into_iter()
            .filter_map(|(_, e)| match e {
                PwmEvent::Pulse(us) => Some(us),
                _ => None,
            })
            .collect()
    }

    pub fn pwm_events(&self, channel: Channel) -> Vec<(u64, PwmEvent)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|s| match s.event {
                Event::Pwm(c, e) if c == channel => Some((s.at_us, e)),
                _ => None,
            })
            .collect()
    }

    pub fn colors(&self) -> Vec<Color> {
        self.log
            .borrow()
            .iter()
            .filter_map(|s| match s.event {
                Event::Light(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn last_color(&self) -> Option<Color> {
        self.colors().last().copied()
    }
}

/// PWM channel with a double-buffered compare register.
///
/// `set_pulse_width` loads the buffer; the width on the "pin"
/// ([`active_pulse`](Self::active_pulse)) only changes at [`wrap`](Self::wrap)
/// or when the counter restarts.
pub struct FakePwm {
    bench: Bench,
    channel: Channel,
    period_us: u16,
    pending_us: u16,
    active_us: u16,
    running: bool,
}

impl FakePwm {
    fn new(bench: Bench, channel: Channel) -> Self {
        Self {
            bench,
            channel,
            period_us: 0,
            pending_us: 0,
            active_us: 0,
            running: false,
        }
    }

    fn record(&self, event: PwmEvent) {
        self.bench.record(Event::Pwm(self.channel, event));
    }

    /// Period boundary: latch the buffered width.
    pub fn wrap(&mut self) {
        if self.running {
            self.active_us = self.pending_us;
        }
    }

    /// Width of the pulse currently being generated (0 when halted).
    pub fn active_pulse(&self) -> u16 {
        if self.running {
            self.active_us
        } else {
            0
        }
    }
}

impl PwmChannel for FakePwm {
    fn configure(&mut self, period_us: u16, pulse_us: u16) -> Result<()> {
        check_pulse(period_us, pulse_us)?;
        self.period_us = period_us;
        self.pending_us = pulse_us;
        self.active_us = pulse_us;
        self.running = true;
        self.record(PwmEvent::Configure {
            period_us,
            pulse_us,
        });
        Ok(())
    }

    fn set_pulse_width(&mut self, pulse_us: u16) -> Result<()> {
        check_pulse(self.period_us, pulse_us)?;
        self.pending_us = pulse_us;
        self.record(PwmEvent::Pulse(pulse_us));
        if self.channel == Channel::Servo {
            if let Some(hook) = self.bench.servo_hook.borrow_mut().as_mut() {
                hook(pulse_us);
            }
        }
        Ok(())
    }

    fn pulse_width(&self) -> u16 {
        self.pending_us
    }

    fn period(&self) -> u16 {
        self.period_us
    }

    fn start(&mut self) {
        self.running = true;
        self.active_us = self.pending_us;
        self.record(PwmEvent::Start);
    }

    fn stop(&mut self) {
        self.running = false;
        self.record(PwmEvent::Stop);
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

pub struct FakeLight {
    bench: Bench,
}

impl Indicator for FakeLight {
    fn show(&mut self, color: Color) {
        self.bench.record(Event::Light(color));
    }
}

/// Something the simulated operator does at a given time.
#[derive(Debug, Clone, Copy)]
pub enum Action {
    /// Flip the rocker switch.
    Flip,
    /// Corrupt the stored mode byte.
    StoreRaw(u8),
}

/// Simulated time: every delay advances the shared clock, then fires any
/// scripted actions that have come due.
pub struct FakeClock<'a> {
    bench: Bench,
    mode: &'a ModeCell,
    elapsed_ns: u64,
    script: VecDeque<(u64, Action)>,
    limit_us: u64,
}

impl<'a> FakeClock<'a> {
    /// Schedule an action. Entries must be added in time order.
    pub fn at_ms(mut self, at_ms: u64, action: Action) -> Self {
        self.script.push_back((at_ms * 1_000, action));
        self
    }

    /// Panic if simulated time passes this point.
    pub fn limit_ms(mut self, limit_ms: u64) -> Self {
        self.limit_us = limit_ms * 1_000;
        self
    }

    fn fire_due(&mut self) {
        let now = self.bench.now_us();
        while let Some(&(at_us, action)) = self.script.front() {
            if at_us > now {
                break;
            }
            self.script.pop_front();
            match action {
                Action::Flip => {
                    self.mode.toggle();
                }
                Action::StoreRaw(raw) => self.mode.store_raw(raw),
            }
        }
    }
}

impl DelayNs for FakeClock<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
        let now_us = self.elapsed_ns / 1_000;
        assert!(
            now_us <= self.limit_us,
            "simulated time ran past {} us",
            self.limit_us
        );
        self.bench.now_us.set(now_us);
        self.fire_due();
    }
}

impl Clock for FakeClock<'_> {
    fn now_us(&mut self) -> u64 {
        self.bench.now_us()
    }
}

/// Output pin whose level can be read back.
#[derive(Clone, Default)]
pub struct FakePin {
    high: Rc<Cell<bool>>,
}

impl FakePin {
    pub fn is_high(&self) -> bool {
        self.high.get()
    }
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.high.set(true);
        Ok(())
    }
}
