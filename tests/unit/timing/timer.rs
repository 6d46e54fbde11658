use super::*;
use crate::timing::clock::ManualClock;

fn timer_at(ms: f64) -> (ManualClock, Timer<ManualClock>) {
    let clock = ManualClock::new();
    clock.set_ms(ms);
    let timer = Timer::new(clock.clone());
    (clock, timer)
}

#[test]
fn running_timer_accrues() {
    let (clock, timer) = timer_at(100.0);
    assert_eq!(timer.elapsed_ms(), 0.0);
    clock.advance_ms(250.0);
    assert_eq!(timer.elapsed_ms(), 250.0);
}

#[test]
fn stop_freezes_elapsed() {
    let (clock, mut timer) = timer_at(0.0);
    clock.advance_ms(400.0);
    timer.stop();
    assert!(!timer.is_running());
    clock.advance_ms(1000.0);
    assert_eq!(timer.elapsed_ms(), 400.0);
    clock.advance_ms(1000.0);
    assert_eq!(timer.elapsed_ms(), 400.0);
}

#[test]
fn start_resumes_from_frozen_value() {
    let (clock, mut timer) = timer_at(0.0);
    clock.advance_ms(400.0);
    timer.stop();
    clock.advance_ms(5000.0);
    timer.start();
    clock.advance_ms(100.0);
    assert_eq!(timer.elapsed_ms(), 500.0);
}

#[test]
fn repeated_stop_and_start_do_not_double_count() {
    let (clock, mut timer) = timer_at(0.0);
    clock.advance_ms(100.0);
    timer.stop();
    timer.stop();
    assert_eq!(timer.elapsed_ms(), 100.0);
    timer.start();
    clock.advance_ms(50.0);
    timer.start();
    clock.advance_ms(50.0);
    assert_eq!(timer.elapsed_ms(), 200.0);
}

#[test]
fn reset_returns_to_zero_and_runs() {
    let (clock, mut timer) = timer_at(0.0);
    clock.advance_ms(900.0);
    timer.stop();
    timer.reset();
    assert!(timer.is_running());
    assert_eq!(timer.elapsed_ms(), 0.0);
    clock.advance_ms(10.0);
    assert_eq!(timer.elapsed_ms(), 10.0);
}

#[test]
fn manual_clock_never_goes_backwards() {
    let clock = ManualClock::new();
    clock.set_ms(50.0);
    clock.set_ms(10.0);
    clock.advance_ms(-5.0);
    assert_eq!(clock.now_ms(), 50.0);
}
