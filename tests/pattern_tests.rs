//! Integration tests for the pattern engine

mod common;
use common::*;

use core::time::Duration;
use pomodoro_leds::pattern::INTRO_ROUNDS;
use pomodoro_leds::{
    Abort, CancelToken, Indicator, PatternOutcome, PatternTiming, introductory_pattern,
    rolling_fade,
};
use std::thread;
use std::time::Instant;

#[test]
fn introductory_pattern_flashes_each_indicator_in_order() {
    let lights = recording_lights();
    let timing = instant_timing();
    let token = CancelToken::new();

    let outcome = introductory_pattern(&lights, &timing, &token).unwrap();
    assert_eq!(outcome, PatternOutcome::Completed);

    lights
        .with_driver(|driver| {
            let runs = on_runs(driver);
            let expected = (INTRO_ROUNDS * timing.fade_steps) as usize;
            assert_eq!(runs.len(), Indicator::COUNT);
            for ((indicator, count), expected_indicator) in runs.iter().zip(Indicator::ALL) {
                assert_eq!(*indicator, expected_indicator);
                assert_eq!(*count, expected);
            }
            assert!(driver.all_off());
        })
        .unwrap();
}

#[test]
fn introductory_pattern_aborts_with_all_indicators_off() {
    let lights = recording_lights();
    lights.set_all(true).unwrap();
    let token = CancelToken::new();
    token.cancel();

    let outcome = introductory_pattern(&lights, &instant_timing(), &token).unwrap();
    assert_eq!(outcome, PatternOutcome::Interrupted);

    lights
        .with_driver(|driver| {
            assert!(driver.all_off());
            assert_eq!(driver.switched_on().len(), Indicator::COUNT);
        })
        .unwrap();
}

#[test]
fn rolling_fade_completion_leaves_every_indicator_off() {
    let lights = recording_lights();
    let timing = instant_timing();
    let token = CancelToken::new();

    let outcome = rolling_fade(&lights, &timing, Duration::ZERO, &token).unwrap();
    assert_eq!(outcome, PatternOutcome::Completed);

    lights
        .with_driver(|driver| {
            assert!(driver.all_off());
            for indicator in Indicator::ALL {
                assert_eq!(
                    driver.on_count(indicator),
                    fade_pulses_per_indicator(&timing) as usize
                );
            }
        })
        .unwrap();
}

#[test]
fn rolling_fade_ramps_up_then_down() {
    let lights = recording_lights();
    let timing = instant_timing();

    let _ = rolling_fade(&lights, &timing, Duration::ZERO, &CancelToken::new()).unwrap();

    let back_runs: Vec<usize> = lights
        .with_driver(|driver| {
            on_runs(driver)
                .into_iter()
                .filter(|(indicator, _)| *indicator == Indicator::Back)
                .map(|(_, count)| count)
                .collect()
        })
        .unwrap();

    let steps = timing.fade_steps as usize;
    let expected: Vec<usize> = (1..=steps).chain((1..=steps).rev()).collect();
    assert_eq!(back_runs, expected);
}

#[test]
fn rolling_fade_returns_immediately_when_already_cancelled() {
    let lights = recording_lights();
    let token = CancelToken::new();
    token.cancel();

    let outcome =
        rolling_fade(&lights, &instant_timing(), Duration::from_secs(2), &token).unwrap();
    assert_eq!(outcome, PatternOutcome::Interrupted);
    assert!(lights.with_driver(|d| d.history().is_empty()).unwrap());
}

#[test]
fn rolling_fade_unwinds_promptly_on_cancel() {
    let lights = recording_lights();
    let token = CancelToken::new();
    let canceller = token.clone();
    let timing = PatternTiming::default();

    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(30));
        canceller.cancel();
    });

    let started = Instant::now();
    let outcome = rolling_fade(&lights, &timing, Duration::from_secs(2), &token).unwrap();
    handle.join().unwrap();

    assert_eq!(outcome, PatternOutcome::Interrupted);
    assert!(started.elapsed() < Duration::from_secs(2));
    // The pulse in flight is switched back off before returning.
    assert!(lights.with_driver(|d| d.all_off()).unwrap());
}

#[test]
fn rolling_fade_stops_at_deadline() {
    let lights = recording_lights();
    let token = CancelToken::new();
    let deadline = token.until(Instant::now().checked_add(Duration::from_millis(20)));

    let started = Instant::now();
    let outcome = rolling_fade(
        &lights,
        &PatternTiming::default(),
        Duration::from_secs(2),
        &deadline,
    )
    .unwrap();

    assert_eq!(outcome, PatternOutcome::Interrupted);
    assert!(deadline.is_aborted());
    assert!(!token.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[test]
fn rolling_fade_with_zero_steps_still_pulses_once_each_way() {
    let lights = recording_lights();
    let mut timing = instant_timing();
    timing.fade_steps = 0;

    let outcome = rolling_fade(&lights, &timing, Duration::ZERO, &CancelToken::new()).unwrap();
    assert_eq!(outcome, PatternOutcome::Completed);

    lights
        .with_driver(|driver| {
            assert_eq!(fade_pulses_per_indicator(&timing), 2);
            for indicator in Indicator::ALL {
                assert_eq!(driver.on_count(indicator), 2);
            }
        })
        .unwrap();
}
