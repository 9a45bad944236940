use std::{
    io,
    sync::{Arc, Mutex},
};

use tracing::Level;
use tracing_subscriber::fmt;

use crate::logging::CustomFormatter;

#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a thread-local subscriber and returns what it logged.
pub fn capture_logs<F, T>(color: bool, f: F) -> (T, String)
where
    F: FnOnce() -> T,
{
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = fmt::Subscriber::builder()
        .with_max_level(Level::TRACE)
        .with_writer(move || writer.clone())
        .event_format(CustomFormatter { color })
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);

    let bytes = capture.0.lock().unwrap().clone();
    (result, String::from_utf8(bytes).unwrap())
}
