// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Mode switch interrupt.

use core::cell::RefCell;
use critical_section::Mutex;
use rp2040_hal::{
    pac::{self, interrupt},
    Timer,
};
use yawmech_common::{
    board::{self, SwitchPin},
    config::DEBOUNCE_MS,
    on_switch_edge,
};

use crate::MODE;

struct SwitchIrq {
    pin: SwitchPin,
    timer: Timer,
}

static SWITCH: Mutex<RefCell<Option<SwitchIrq>>> = Mutex::new(RefCell::new(None));

/// Hand the switch pin to the interrupt handler and unmask the GPIO IRQ.
pub fn install(pin: SwitchPin, timer: Timer) {
    critical_section::with(|cs| {
        SWITCH.borrow(cs).replace(Some(SwitchIrq { pin, timer }));
    });
    // SAFETY: the handler only touches SWITCH and MODE, both ready above.
    unsafe { pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0) };
}

#[interrupt]
fn IO_IRQ_BANK0() {
    critical_section::with(|cs| {
        let mut slot = SWITCH.borrow_ref_mut(cs);
        let Some(SwitchIrq { pin, timer }) = slot.as_mut() else {
            return;
        };
        if !board::switch_pending(pin) {
            return;
        }
        let mode = on_switch_edge(&MODE, timer, DEBOUNCE_MS, || {
            board::acknowledge_switch(pin);
        });
        defmt::debug!("Switch: mode -> {}", mode);
    });
}
