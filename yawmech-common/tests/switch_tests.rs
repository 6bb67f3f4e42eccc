// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

//! Unit tests for the switch edge handler.

mod common;

use std::cell::Cell;

use common::Bench;
use yawmech_common::config::DEBOUNCE_MS;
use yawmech_common::{on_switch_edge, Mode, ModeCell};

#[test]
fn test_each_edge_toggles_mode() {
    let bench = Bench::new();
    let mode = ModeCell::new();
    let mut clock = bench.clock(&mode);

    assert_eq!(on_switch_edge(&mode, &mut clock, DEBOUNCE_MS, || {}), Mode::Run);
    assert_eq!(
        on_switch_edge(&mode, &mut clock, DEBOUNCE_MS, || {}),
        Mode::Measurement
    );
    assert_eq!(on_switch_edge(&mode, &mut clock, DEBOUNCE_MS, || {}), Mode::Run);
}

#[test]
fn test_acknowledge_after_debounce_wait() {
    let bench = Bench::new();
    let mode = ModeCell::new();
    let mut clock = bench.clock(&mode);
    let acked_at = Cell::new(None);

    on_switch_edge(&mode, &mut clock, DEBOUNCE_MS, || {
        acked_at.set(Some(bench.now_us()));
    });

    assert_eq!(acked_at.get(), Some(u64::from(DEBOUNCE_MS) * 1_000));
    assert_eq!(mode.get(), Mode::Run);
}

#[test]
fn test_edges_ignored_once_completed() {
    let bench = Bench::new();
    let mode = ModeCell::with_mode(Mode::Completed);
    let mut clock = bench.clock(&mode);
    let acks = Cell::new(0);

    for _ in 0..5 {
        let now = on_switch_edge(&mode, &mut clock, DEBOUNCE_MS, || acks.set(acks.get() + 1));
        assert_eq!(now, Mode::Completed);
    }
    // The interrupt is still acknowledged every time
    assert_eq!(acks.get(), 5);
}

#[test]
fn test_bounce_is_a_known_limitation() {
    // Two edges delivered as separate interrupts (bounce longer than the
    // debounce wait) cancel each other out: the mode ends where it began.
    let bench = Bench::new();
    let mode = ModeCell::new();
    let mut clock = bench.clock(&mode);

    on_switch_edge(&mode, &mut clock, DEBOUNCE_MS, || {});
    on_switch_edge(&mode, &mut clock, DEBOUNCE_MS, || {});
    assert_eq!(mode.get(), Mode::Measurement);
}
