//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry and DefaultLogger formatting/filtering.
//! Tests that toggle `colored`'s global override are `#[serial]`.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;
use serial_test::serial;

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Warn.label(), "WARN ");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_new_has_no_location() {
    let entry = LogEntry::new(LogSeverity::Info, "editor3d::Octree", "built".to_string());

    assert_eq!(entry.severity, LogSeverity::Info);
    assert_eq!(entry.source, "editor3d::Octree");
    assert_eq!(entry.message, "built");
    assert!(entry.file.is_none());
    assert!(entry.line.is_none());
}

#[test]
fn test_log_entry_with_location() {
    let entry = LogEntry::new(LogSeverity::Error, "editor3d::Scene", "bad".to_string())
        .with_location("scene.rs", 42);

    assert_eq!(entry.file, Some("scene.rs"));
    assert_eq!(entry.line, Some(42));
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_min_severity() {
    assert_eq!(DefaultLogger::default().min_severity(), LogSeverity::Info);
    assert_eq!(DefaultLogger::new(LogSeverity::Trace).min_severity(), LogSeverity::Trace);
}

#[test]
fn test_format_plain_without_location() {
    let entry = LogEntry {
        severity: LogSeverity::Debug,
        timestamp: SystemTime::now(),
        source: "editor3d::Picker".to_string(),
        message: "hit at 4.5".to_string(),
        file: None,
        line: None,
    };

    let line = DefaultLogger::format_plain(&entry);
    assert!(line.contains("[DEBUG]"));
    assert!(line.contains("[editor3d::Picker]"));
    assert!(line.ends_with("hit at 4.5"));
}

#[test]
fn test_format_plain_with_location() {
    let entry = LogEntry::new(LogSeverity::Error, "editor3d::Scene", "oops".to_string())
        .with_location("scene.rs", 7);

    let line = DefaultLogger::format_plain(&entry);
    assert!(line.ends_with("oops (scene.rs:7)"));
}

#[test]
#[serial]
fn test_console_line_matches_plain_line_without_colors() {
    let entry = LogEntry::new(LogSeverity::Warn, "editor3d::Scene", "growing root".to_string());
    let located = LogEntry::new(LogSeverity::Error, "editor3d::Ray", "zero direction".to_string())
        .with_location("ray.rs", 30);

    colored::control::set_override(false);
    let console = DefaultLogger::format_colored(&entry);
    let console_located = DefaultLogger::format_colored(&located);
    colored::control::unset_override();

    assert_eq!(console, DefaultLogger::format_plain(&entry));
    assert_eq!(console_located, DefaultLogger::format_plain(&located));
    assert!(console_located.ends_with("zero direction (ray.rs:30)"));
}

#[test]
#[serial]
fn test_console_line_colors_severity_and_source() {
    let entry = LogEntry::new(LogSeverity::Info, "editor3d::Scene", "created".to_string());

    colored::control::set_override(true);
    let console = DefaultLogger::format_colored(&entry);
    colored::control::unset_override();

    assert_ne!(console, DefaultLogger::format_plain(&entry));
    assert!(console.contains("\u{1b}["));
    assert!(console.ends_with("created"));
}

#[test]
fn test_default_logger_does_not_panic() {
    let logger = DefaultLogger::new(LogSeverity::Warn);
    // Filtered out
    logger.log(&LogEntry::new(LogSeverity::Trace, "test", "hidden".to_string()));
    // Printed
    logger.log(&LogEntry::new(LogSeverity::Error, "test", "shown".to_string())
        .with_location("log_tests.rs", 1));
}

#[test]
fn test_logger_trait_object() {
    let logger: Box<dyn Logger> = Box::new(DefaultLogger::default());
    logger.log(&LogEntry::new(LogSeverity::Info, "test", "boxed".to_string()));
}
