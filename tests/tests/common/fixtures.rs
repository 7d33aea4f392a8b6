use aulos_play::testing::{CallLog, FakeCapability, FakeSurface};
use rstest::*;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Common fixture for temporary directory
#[fixture]
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[fixture]
pub fn cancel_token() -> CancellationToken {
    CancellationToken::new()
}

#[fixture]
pub fn tracing_setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::default()
                .add_directive("warn".parse().expect("valid directive")),
        )
        .with_test_writer()
        .try_init();
}

/// Recording capability and surface sharing one call log.
pub struct Fakes {
    pub log: CallLog,
    pub capability: FakeCapability,
    pub surface: FakeSurface,
}

#[fixture]
pub fn fakes() -> Fakes {
    let log = CallLog::default();
    Fakes {
        capability: FakeCapability::new(log.clone()),
        surface: FakeSurface::new(log.clone()),
        log,
    }
}
