use campus_logger::{Logger, LoggerError};
use serial_test::serial;

#[test]
#[serial]
fn console_logger_has_no_file_output() {
    // Shares the process-wide subscriber with the test below, so only the first init wins.
    let first = Logger::builder("campus-console").init();
    if let Ok(logger) = first {
        assert!(!logger.writes_files());
    }
}

#[test]
#[serial]
fn second_init_is_a_subscriber_error() {
    let _first = Logger::builder("campus-once").init();

    let err = Logger::builder("campus-twice").init().expect_err("second init should fail");
    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
