use std::sync::Once;

static INIT: Once = Once::new();

// Setup function that is only run once, even if called multiple times
pub fn setup() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}
