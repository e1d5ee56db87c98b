//! Integration Test: Layering
//!
//! **Policy**: `thinkchat-core` is headless. It must not depend on or import
//! terminal UI crates; surfaces depend on the core, never the reverse.
//! Production code propagates errors instead of panicking on them.

use std::fs;

use architectural_enforcement::{scan, workspace_root};

const UI_CRATES: &[&str] = &["ratatui", "crossterm"];

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("core/Cargo.toml"))
        .expect("core/Cargo.toml should be readable");

    for line in manifest.lines() {
        let key = line.split('=').next().unwrap_or("").trim();
        assert!(
            !UI_CRATES.contains(&key),
            "core/Cargo.toml depends on UI crate `{key}`"
        );
    }
}

#[test]
fn test_core_sources_do_not_import_ui_crates() {
    let violations = scan(&["core/src"], &[], |code| {
        UI_CRATES
            .iter()
            .any(|krate| code.contains(&format!("{krate}::")))
    });

    assert!(
        violations.is_empty(),
        "UI crate referenced from core:\n{}",
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
}

#[test]
fn test_no_unwrap_in_production_code() {
    let violations = scan(&["core/src", "tui/src"], &[], |code| {
        code.contains(".unwrap()") || code.contains(".expect(")
    });

    assert!(
        violations.is_empty(),
        "unwrap()/expect() in production code:\n{}",
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
}
