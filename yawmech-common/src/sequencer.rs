// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Sweep position sequencing and cycle counting.

use crate::config::RigConfig;

/// Result of one [`CycleSequencer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepStep {
    /// Position index after the advance.
    pub index: usize,
    /// Servo pulse width for that position.
    pub pulse_us: u16,
    /// The advance wrapped back to the first position.
    pub cycle_finished: bool,
    /// The cycle count now exceeds the budget.
    pub budget_exhausted: bool,
}

/// Walks the sweep pattern and counts completed sweeps.
///
/// Index 0 is the parked (center) position. One cycle is counted each time
/// the index wraps back to 0, i.e. once every `pattern.len()` advances.
#[derive(Debug, Clone)]
pub struct CycleSequencer {
    pattern: [u16; 4],
    index: usize,
    cycles: u32,
    budget: u32,
}

impl CycleSequencer {
    pub const fn new(pattern: [u16; 4], budget: u32) -> Self {
        Self {
            pattern,
            index: 0,
            cycles: 0,
            budget,
        }
    }

    pub const fn from_config(config: &RigConfig) -> Self {
        Self::new(config.sweep_pattern, config.cycle_budget)
    }

    pub fn advance(&mut self) -> SweepStep {
        let next = self.index + 1;
        let cycle_finished = next >= self.pattern.len();
        self.index = if cycle_finished { 0 } else { next };
        if cycle_finished {
            self.cycles = self.cycles.saturating_add(1);
        }
        SweepStep {
            index: self.index,
            pulse_us: self.current_pulse(),
            cycle_finished,
            budget_exhausted: self.is_exhausted(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn current_pulse(&self) -> u16 {
        self.pattern[self.index]
    }

    /// Completion fires strictly after the budget: `budget` sweeps are not
    /// enough, `budget + 1` are.
    pub fn is_exhausted(&self) -> bool {
        self.cycles > self.budget
    }
}
