/*!
sink.rs - Destinations for trace text.

Live disassembly lines, memory access lines and dump reports are all pushed
line by line into a `TraceSink`:

- `LogSink` forwards to the `log` facade (target `nesscope::trace`, level info)
- `WriterSink` writes to any `io::Write` (stdout, a file, a buffer)
- `Vec<String>` collects lines in memory

Sinks never return errors to the tracer. `WriterSink` reports the first I/O
failure through `log::warn!` and discards further output.
*/

use std::io::{self, Write};

pub const TRACE_TARGET: &str = "nesscope::trace";

pub trait TraceSink {
    fn line(&mut self, text: &str);
}

/// Sink forwarding every line to `log::info!`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    #[inline]
    fn line(&mut self, text: &str) {
        log::info!(target: TRACE_TARGET, "{text}");
    }
}

/// Sink writing newline-terminated lines to an `io::Write`.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
    failed: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            failed: false,
        }
    }

    /// Whether a write error has disabled this sink.
    #[inline]
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())?;
        self.inner.write_all(b"\n")
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn line(&mut self, text: &str) {
        if self.failed {
            return;
        }
        if let Err(err) = self.write_line(text) {
            log::warn!("trace output disabled after write error: {err}");
            self.failed = true;
        }
    }
}

impl TraceSink for Vec<String> {
    #[inline]
    fn line(&mut self, text: &str) {
        self.push(text.to_owned());
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    #[inline]
    fn line(&mut self, text: &str) {
        (**self).line(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_sink_terminates_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.line("one");
        sink.line("two");
        assert_eq!(sink.into_inner(), b"one\ntwo\n");
    }

    #[test]
    fn writer_sink_absorbs_errors() {
        let mut sink = WriterSink::new(Broken);
        sink.line("lost");
        assert!(sink.has_failed());
        sink.line("also lost");
    }

    #[test]
    fn vec_sink_collects_through_borrow() {
        fn emit(mut sink: impl TraceSink) {
            sink.line("a");
            sink.line("b");
        }
        let mut lines: Vec<String> = Vec::new();
        emit(&mut lines);
        assert_eq!(lines, ["a", "b"]);
    }
}
