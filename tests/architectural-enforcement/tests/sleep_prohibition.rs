//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep. Waiting happens on I/O,
//! on the completion signal, or through the `Pacer` trait so tests can swap
//! in an instant clock.
//! **Exceptions**: `core/src/animation/timing.rs` (the real pacer), test code.
//! Periodic work uses `tokio::time::interval()`.

use architectural_enforcement::scan;

const ALLOWED: &[&str] = &["core/src/animation/timing.rs"];

#[test]
fn test_no_sleep_in_production_code() {
    let violations = scan(&["core/src", "tui/src"], ALLOWED, |code| {
        code.contains("::sleep(") || code.contains(".sleep(")
    });

    if !violations.is_empty() {
        eprintln!("\n❌ Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n✅ ACCEPTABLE:");
        eprintln!("  - Pacer::pause (animation pacing, swappable in tests)");
        eprintln!("  - tokio::time::interval() for frame ticks");
        eprintln!("  - Test code (#[cfg(test)] modules, tests/ directories)");

        panic!(
            "\nFound {} sleep violation(s) in production code.",
            violations.len()
        );
    }
}

#[test]
fn test_no_blocking_sleep() {
    // Blocking sleeps stall the runtime even where pacing is allowed
    let violations = scan(&["core/src", "tui/src"], &[], |code| {
        code.contains("thread::sleep(")
    });

    assert!(
        violations.is_empty(),
        "std::thread::sleep in async code:\n{}",
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
}
