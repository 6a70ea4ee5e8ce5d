//! Test harness utilities.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use herald_telemetry::{LogConfig, LogFormat, LogTarget, setup_logging};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Set up logging for tests.
///
/// Output goes through the test writer so it is captured per test. Calling
/// this more than once is harmless; only the first call installs a
/// subscriber.
///
/// ```rust,ignore
/// use herald_test::setup_test_logging;
///
/// #[test]
/// fn my_test() {
///     setup_test_logging("herald_events=trace");
///     // ... test code
/// }
/// ```
pub fn setup_test_logging(filter: &str) {
    let config = LogConfig::new(filter)
        .with_format(LogFormat::Compact)
        .with_target(LogTarget::Test)
        .without_ansi();

    if let Err(e) = setup_logging(&config) {
        tracing::trace!(error = %e, "Test logging already initialized");
    }
}

/// Set up test logging with the default filter (warn level).
pub fn setup_test_logging_default() {
    setup_test_logging("warn");
}

/// Captures formatted log output so tests can assert on emitted events.
///
/// Install the capture for the current thread with
/// [`tracing::subscriber::with_default`].
///
/// ```rust
/// use herald_test::LogCapture;
///
/// let capture = LogCapture::new();
/// tracing::subscriber::with_default(capture.subscriber("warn"), || {
///     tracing::warn!("disk nearly full");
/// });
/// assert_eq!(capture.count("disk nearly full"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Create an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber writing into this capture, filtered by `filter`.
    #[must_use]
    pub fn subscriber(&self, filter: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time()
            .finish()
    }

    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Number of captured lines containing `needle`.
    #[must_use]
    pub fn count(&self, needle: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Writer handed out by [`LogCapture`].
#[derive(Debug)]
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}
