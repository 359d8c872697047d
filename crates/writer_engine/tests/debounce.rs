use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::thread;
use std::time::{Duration, Instant};

use writer_core::AdaptiveFactor;
use writer_engine::{DebounceConfig, DebouncePhase, Debouncer, Trigger};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(writer_logging::initialize_for_tests);
}

fn counting_trigger() -> (Trigger, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let trigger: Trigger = Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (trigger, count)
}

fn fast_config() -> DebounceConfig {
    DebounceConfig {
        base_interval: Duration::from_millis(20),
        adaptive_factor: AdaptiveFactor::NORMAL,
    }
}

fn wait_until(timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    done()
}

#[test]
fn burst_of_edits_runs_once() {
    init_logging();
    let (trigger, count) = counting_trigger();
    let debouncer = Debouncer::new(fast_config(), trigger).unwrap();

    for _ in 0..25 {
        debouncer.notify_edit();
    }
    assert_eq!(debouncer.phase(), DebouncePhase::Scheduled);

    assert!(wait_until(Duration::from_secs(2), || debouncer.runs_completed() == 1));
    // Give a stray second run the chance to show up.
    thread::sleep(Duration::from_millis(100));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(debouncer.runs_completed(), 1);
    assert_eq!(debouncer.phase(), DebouncePhase::Idle);
}

#[test]
fn callback_waits_for_worker_delay_after_last_edit() {
    init_logging();
    let fired_at = Arc::new(Mutex::new(None::<Instant>));
    let slot = Arc::clone(&fired_at);
    let trigger: Trigger = Arc::new(move || {
        *slot.lock().unwrap() = Some(Instant::now());
    });
    let config = DebounceConfig::with_factor(AdaptiveFactor::new(2));
    let debouncer = Debouncer::new(config, trigger).unwrap();

    debouncer.notify_edit();
    thread::sleep(Duration::from_millis(50));
    debouncer.notify_edit();
    let last_edit = Instant::now();

    assert!(wait_until(Duration::from_secs(3), || fired_at
        .lock()
        .unwrap()
        .is_some()));
    let fired = fired_at.lock().unwrap().unwrap();
    assert!(fired.duration_since(last_edit) >= Duration::from_millis(300));
    assert_eq!(config.coalescing_interval(), Duration::from_millis(300));
}

#[test]
fn edits_while_running_are_ignored() {
    init_logging();
    let (trigger, count) = counting_trigger();
    let debouncer = Debouncer::new(DebounceConfig::default(), trigger).unwrap();

    debouncer.notify_edit();
    assert!(wait_until(Duration::from_secs(2), || debouncer.phase()
        == DebouncePhase::Running));
    debouncer.notify_edit();
    assert_eq!(debouncer.phase(), DebouncePhase::Running);

    assert!(wait_until(Duration::from_secs(2), || debouncer.phase()
        == DebouncePhase::Idle));
    thread::sleep(Duration::from_millis(400));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn edit_after_completion_starts_a_new_cycle() {
    init_logging();
    let (trigger, count) = counting_trigger();
    let debouncer = Debouncer::new(fast_config(), trigger).unwrap();

    debouncer.notify_edit();
    assert!(wait_until(Duration::from_secs(2), || debouncer.runs_completed() == 1));
    debouncer.notify_edit();
    assert!(wait_until(Duration::from_secs(2), || debouncer.runs_completed() == 2));
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn shutdown_stops_scheduling() {
    init_logging();
    let (trigger, count) = counting_trigger();
    let debouncer = Debouncer::new(fast_config(), trigger).unwrap();

    debouncer.shutdown();
    debouncer.notify_edit();
    assert_eq!(debouncer.phase(), DebouncePhase::Idle);
    thread::sleep(Duration::from_millis(150));
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn shutdown_drops_a_pending_timer() {
    init_logging();
    let (trigger, count) = counting_trigger();
    let debouncer = Debouncer::new(fast_config(), trigger).unwrap();

    debouncer.notify_edit();
    debouncer.shutdown();
    assert!(wait_until(Duration::from_secs(1), || debouncer.phase()
        == DebouncePhase::Idle));
    thread::sleep(Duration::from_millis(100));
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn factor_change_applies_to_later_cycles() {
    init_logging();
    let (trigger, _count) = counting_trigger();
    let debouncer = Debouncer::new(DebounceConfig::default(), trigger).unwrap();

    debouncer.set_adaptive_factor(AdaptiveFactor::new(4));
    assert_eq!(
        debouncer.config().coalescing_interval(),
        Duration::from_millis(600)
    );
}

#[test]
fn panicking_trigger_does_not_wedge_the_debouncer() {
    init_logging();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let trigger: Trigger = Arc::new(move || {
        if seen.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("first statistics run fails");
        }
    });
    let debouncer = Debouncer::new(fast_config(), trigger).unwrap();

    debouncer.notify_edit();
    assert!(wait_until(Duration::from_secs(2), || {
        calls.load(Ordering::SeqCst) == 1 && debouncer.phase() == DebouncePhase::Idle
    }));
    assert_eq!(debouncer.runs_completed(), 0);

    debouncer.notify_edit();
    assert!(wait_until(Duration::from_secs(2), || debouncer.runs_completed() == 1));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
