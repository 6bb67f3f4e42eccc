// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Mode dispatcher and the per-mode handlers.
//!
//! The main loop calls [`Rig::dispatch`] repeatedly. Each call reads the
//! mode once and runs exactly one handler, which blocks until its own exit
//! condition holds:
//!
//! | Mode          | Handler exits when                         | Indicator |
//! |---------------|--------------------------------------------|-----------|
//! | `Measurement` | the switch moves the mode away             | blue      |
//! | `Run`         | the switch flips back, or budget exhausted | flash, then off |
//! | `Completed`   | immediately, returns [`Outcome::Halted`]   | green     |
//! | `Fault`       | immediately, returns [`Outcome::Halted`]   | white     |

use crate::config::RigConfig;
use crate::error::{Error, Result};
use crate::indicator::{Color, Indicator};
use crate::mode::{Mode, ModeCell};
use crate::motor::{self, ArmOutcome};
use crate::pwm::PwmChannel;
use crate::sequencer::CycleSequencer;
use crate::timing::{self, Clock};
use embedded_hal::delay::DelayNs;

/// What the main loop should do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Dispatch again.
    Continue,
    /// Terminal mode reached: outputs are settled, idle until reset.
    Halted,
}

/// All state owned by the control loop.
///
/// The mode cell is borrowed because the switch interrupt writes it too;
/// everything else (sweep position, cycle count, peripherals) belongs to
/// the rig alone.
pub struct Rig<'a, S, M, L, T> {
    mode: &'a ModeCell,
    servo: S,
    motor: M,
    light: L,
    timer: T,
    sequencer: CycleSequencer,
    config: RigConfig,
    last_mode: Option<Mode>,
}

impl<'a, S, M, L, T> Rig<'a, S, M, L, T>
where
    S: PwmChannel,
    M: PwmChannel,
    L: Indicator,
    T: Clock + DelayNs,
{
    /// Bring both channels to the power-on safe state: servo running at
    /// center, motor configured at the arming width but halted.
    ///
    /// A channel that rejects its configuration puts the rig in `Fault`.
    pub fn new(
        mode: &'a ModeCell,
        servo: S,
        motor: M,
        light: L,
        timer: T,
        config: RigConfig,
    ) -> Self {
        let mut rig = Self {
            mode,
            servo,
            motor,
            light,
            timer,
            sequencer: CycleSequencer::from_config(&config),
            config,
            last_mode: None,
        };
        if let Err(err) = rig.power_on() {
            rig.enter_fault(err);
        }
        rig
    }

    fn power_on(&mut self) -> Result<()> {
        self.servo
            .configure(self.config.servo_period_us, self.config.servo_center_us())?;
        self.motor
            .configure(self.config.motor_period_us, self.config.motor_arm_us)?;
        self.motor.stop();
        Ok(())
    }

    /// Run the handler for the current mode.
    pub fn dispatch(&mut self) -> Outcome {
        let mode = self.mode.get();
        self.note_transition(mode);

        let result = match mode {
            Mode::Measurement => self.measure().map(|()| Outcome::Continue),
            Mode::Run => self.run().map(|()| Outcome::Continue),
            Mode::Completed => {
                self.complete();
                Ok(Outcome::Halted)
            }
            Mode::Fault => {
                self.show_fault();
                Ok(Outcome::Halted)
            }
        };

        result.unwrap_or_else(|err| {
            self.enter_fault(err);
            Outcome::Halted
        })
    }

    /// Dispatch until a terminal mode is reached.
    pub fn run_until_halted(&mut self) {
        while self.dispatch() == Outcome::Continue {}
    }

    /// Park the servo at center, cut the motor signal, wait for the switch.
    ///
    /// The sweep position is left alone: the next run resumes the pattern
    /// where the last one stopped, so every advance still counts toward a
    /// cycle.
    fn measure(&mut self) -> Result<()> {
        self.servo.set_pulse_width(self.config.servo_center_us())?;
        self.motor.stop();
        self.light.show(Color::for_mode(Mode::Measurement));

        while self.mode.is(Mode::Measurement) {
            self.timer.delay_ms(self.config.mode_poll_ms);
        }
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        // A switch edge beat the completion store on the last sweep.
        if self.sequencer.is_exhausted() {
            self.finish();
            return Ok(());
        }

        let outcome = motor::arm_motor(
            &mut self.motor,
            &mut self.light,
            &mut self.timer,
            self.mode,
            &self.config,
        )?;
        match outcome {
            ArmOutcome::Armed => self.sweep(),
            ArmOutcome::Aborted => Ok(()),
        }
    }

    /// Step through the sweep pattern, one position per dwell, until the
    /// switch flips back or the budget runs out.
    ///
    /// Leaving on a switch flip keeps the servo wherever it stopped; the
    /// measurement handler recenters it.
    fn sweep(&mut self) -> Result<()> {
        self.light.show(Color::for_mode(Mode::Run));

        let mode = self.mode;
        let dwell_us = u64::from(self.config.dwell_ms) * 1_000;
        let mut deadline = self.timer.now_us() + dwell_us;

        loop {
            let reached = timing::sleep_until(
                &mut self.timer,
                deadline,
                self.config.mode_poll_ms,
                || mode.is(Mode::Run),
            );
            if !reached {
                return Ok(());
            }

            let step = self.sequencer.advance();
            self.servo.set_pulse_width(step.pulse_us)?;

            if step.cycle_finished {
                self.log_progress();
            }
            if step.budget_exhausted {
                self.finish();
                return Ok(());
            }
            deadline += dwell_us;
        }
    }

    /// Move `Run` to `Completed` once the budget is spent. Does nothing if
    /// the switch already took the rig out of `Run`; the next run retries.
    fn finish(&mut self) {
        let completed = self.mode.complete();
        #[cfg(feature = "defmt")]
        {
            if completed {
                defmt::info!("Run: {} cycles done, test complete", self.sequencer.cycles());
            } else {
                defmt::warn!("Run: budget spent but mode is {}, completion deferred", self.mode.get());
            }
        }
        #[cfg(not(feature = "defmt"))]
        let _ = completed;
    }

    fn complete(&mut self) {
        self.motor.stop();
        self.servo.stop();
        self.light.show(Color::for_mode(Mode::Completed));
    }

    fn show_fault(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::error!("Fault: mode byte = {}", self.mode.raw());
        self.light.show(Color::for_mode(Mode::Fault));
    }

    fn enter_fault(&mut self, err: Error) {
        #[cfg(feature = "defmt")]
        defmt::error!("Fault: {}", err);
        #[cfg(not(feature = "defmt"))]
        let _ = err;

        self.mode.fault();
        self.last_mode = Some(Mode::Fault);
        self.light.show(Color::for_mode(Mode::Fault));
    }

    fn note_transition(&mut self, mode: Mode) {
        if self.last_mode != Some(mode) {
            #[cfg(feature = "defmt")]
            defmt::info!("Mode: {} -> {}", self.last_mode, mode);
            self.last_mode = Some(mode);
        }
    }

    fn log_progress(&self) {
        let cycles = self.sequencer.cycles();
        let every = self.config.progress_log_every;
        if every == 0 || cycles % every != 0 {
            return;
        }
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Run: {}/{} cycles, ~{} min left",
            cycles,
            self.sequencer.budget(),
            self.config.remaining_ms(cycles) / 60_000
        );
    }

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    pub fn servo(&self) -> &S {
        &self.servo
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    pub fn sequencer(&self) -> &CycleSequencer {
        &self.sequencer
    }
}
