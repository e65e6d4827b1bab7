use tracing::Level;

/// Initialize the global fmt subscriber.
pub fn init() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

/// Like [`init`], but tolerates an already-installed subscriber. Used by
/// test harnesses where several tests race to initialize.
pub fn try_init() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_test_writer()
        .try_init();
}
