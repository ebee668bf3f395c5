use tracing::Level;
use zk_logger::Logger;

#[test]
fn console_logger_applies_explicit_filter() {
    let logger = Logger::builder()
        .name("zk")
        .verbosity(1)
        .env_filter("zk_kernel=trace")
        .init()
        .expect("console logger should initialize");

    assert!(logger.guard().is_none());
    assert!(tracing::enabled!(target: "zk_kernel", Level::TRACE));
}
