// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Yaw-mechanism fatigue test rig.
//!
//! Boots into measurement mode (servo centered, motor signal off). Flipping
//! the rocker switch arms the ESC and starts the sweep; flipping it back
//! parks the rig again. After the cycle budget the rig stops both outputs,
//! shows green, and sleeps until reset.

#![no_std]
#![no_main]

mod switch_irq;

use defmt_rtt as _;
use panic_probe as _;

defmt::timestamp!("{=u64:us}", uptime_us());

use core::cell::Cell;
use cortex_m_rt::entry;
use critical_section::Mutex;
use rp2040_hal::{pac, Timer};
use yawmech_common::{
    board::{self, Board},
    ModeCell, Rig, RigConfig,
};

#[unsafe(link_section = ".boot2")]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

/// Written by the switch interrupt, read by the dispatcher.
pub(crate) static MODE: ModeCell = ModeCell::new();

/// Copy of the board timer for log timestamps.
static LOG_TIMER: Mutex<Cell<Option<Timer>>> = Mutex::new(Cell::new(None));

#[entry]
fn main() -> ! {
    defmt::println!("Yaw-mech rig v{}", env!("YAWMECH_VERSION"));

    let Some(pac) = pac::Peripherals::take() else {
        defmt::panic!("Peripherals already taken");
    };
    let Board {
        servo,
        motor,
        light,
        switch,
        timer,
    } = match board::init_board(pac) {
        Ok(board) => board,
        Err(e) => defmt::panic!("Board init failed: {}", e),
    };

    critical_section::with(|cs| LOG_TIMER.borrow(cs).set(Some(timer)));

    let config = RigConfig::DEFAULT;
    defmt::println!(
        "Budget: {} cycles, {} ms dwell, ~{} min",
        config.cycle_budget,
        config.dwell_ms,
        config.remaining_ms(0) / 60_000
    );

    // Outputs reach their safe state before the switch can change the mode.
    let mut rig = Rig::new(&MODE, servo, motor, light, timer, config);
    switch_irq::install(switch, timer);

    rig.run_until_halted();
    defmt::println!(
        "Rig halted: {} after {} cycles",
        rig.mode(),
        rig.sequencer().cycles()
    );

    loop {
        cortex_m::asm::wfi();
    }
}

/// Microseconds since reset, or 0 before the timer is up.
fn uptime_us() -> u64 {
    critical_section::with(|cs| {
        LOG_TIMER
            .borrow(cs)
            .get()
            .map_or(0, |timer| timer.get_counter().ticks())
    })
}
