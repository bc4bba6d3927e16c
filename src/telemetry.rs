//! Tracing subscriber installation. In the browser every formatted event is
//! forwarded to the devtools console at a matching severity.

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Later calls are no-ops.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Installs the global subscriber. Later calls are no-ops.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // No wall clock on wasm32-unknown-unknown; the console stamps lines itself.
    let _ = tracing_subscriber::fmt()
        .with_writer(console::ConsoleMakeWriter)
        .with_max_level(level)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    pub struct ConsoleMakeWriter;

    pub struct ConsoleWriter {
        level: Level,
        buffer: Vec<u8>,
    }

    impl ConsoleWriter {
        fn new(level: Level) -> Self {
            Self {
                level,
                buffer: Vec::new(),
            }
        }
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // The fmt layer writes one event per writer, so the line is complete here.
    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let text = String::from_utf8_lossy(&self.buffer);
            let line = text.trim_end();
            if line.is_empty() {
                return;
            }
            let value = JsValue::from_str(line);
            if self.level == Level::ERROR {
                web_sys::console::error_1(&value);
            } else if self.level == Level::WARN {
                web_sys::console::warn_1(&value);
            } else if self.level == Level::INFO {
                web_sys::console::info_1(&value);
            } else {
                web_sys::console::debug_1(&value);
            }
        }
    }

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::new(Level::INFO)
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter::new(*meta.level())
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    #[test]
    fn repeated_init_is_harmless() {
        super::init();
        super::init();
        tracing::info!(check = "telemetry", "subscriber installed");
    }
}
