use hhub_logger::{Logger, LoggerError};
use serial_test::serial;

#[test]
#[serial]
fn second_init_fails_with_subscriber_error() {
    let _logger = Logger::builder().name("once").init().unwrap();

    let err = Logger::builder().name("twice").init().unwrap_err();
    assert!(matches!(err, LoggerError::Subscriber(_)));
}
