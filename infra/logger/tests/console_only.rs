use chairside_logger::{LevelFilter, Logger};

#[test]
fn init_console_only_has_no_guard() {
    let logger = Logger::builder("integration-console-only")
        .console(true)
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    assert!(!logger.writes_files(), "console-only logger should not create a file guard");
    assert_eq!(logger.name(), "integration-console-only");
}
