//! Output stream targets
//!
//! Everything the facade renders goes to exactly one stream: stderr by
//! default, stdout on request, or an in-memory buffer for tests and for
//! programmatic redirection in console scripts.

use parking_lot::Mutex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::io::{IsTerminal, Write};
use std::sync::Arc;

/// A shared in-memory sink for rendered lines
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    fn write_line(&self, line: &str) {
        let mut buf = self.inner.lock();
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
    }
}

/// The single output stream of the facade
#[derive(Debug, Clone, Default)]
pub enum StreamTarget {
    #[default]
    Stderr,
    Stdout,
    Memory(SharedBuffer),
}

impl StreamTarget {
    /// A fresh in-memory stream
    pub fn memory() -> Self {
        StreamTarget::Memory(SharedBuffer::new())
    }

    /// The buffer behind a memory stream, if this is one
    pub fn buffer(&self) -> Option<&SharedBuffer> {
        match self {
            StreamTarget::Memory(buf) => Some(buf),
            _ => None,
        }
    }

    /// Probe whether the stream is an interactive terminal.
    ///
    /// `None` means the stream has no way to report interactivity (memory
    /// buffers); callers treat that the same as `Some(false)`.
    pub fn is_interactive(&self) -> Option<bool> {
        match self {
            StreamTarget::Stderr => Some(std::io::stderr().is_terminal()),
            StreamTarget::Stdout => Some(std::io::stdout().is_terminal()),
            StreamTarget::Memory(_) => None,
        }
    }

    /// Write one rendered line, best effort.
    ///
    /// Logging must never fail the caller, so write errors are swallowed;
    /// the same contract the classic text-logging handlers have.
    pub fn write_line(&self, line: &str) {
        match self {
            StreamTarget::Stderr => {
                let stderr = std::io::stderr();
                let mut handle = stderr.lock();
                let _ = writeln!(handle, "{}", line);
            }
            StreamTarget::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                let _ = writeln!(handle, "{}", line);
            }
            StreamTarget::Memory(buf) => buf.write_line(line),
        }
    }
}

// Two memory streams are only equal when they share the same buffer; the
// process streams are equal by kind.
impl PartialEq for StreamTarget {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StreamTarget::Stderr, StreamTarget::Stderr) => true,
            (StreamTarget::Stdout, StreamTarget::Stdout) => true,
            (StreamTarget::Memory(a), StreamTarget::Memory(b)) => {
                Arc::ptr_eq(&a.inner, &b.inner)
            }
            _ => false,
        }
    }
}

// Streams travel through configuration trees by kind only; a deserialized
// memory stream gets a fresh buffer.
impl Serialize for StreamTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = match self {
            StreamTarget::Stderr => "stderr",
            StreamTarget::Stdout => "stdout",
            StreamTarget::Memory(_) => "memory",
        };
        serializer.serialize_str(kind)
    }
}

impl<'de> Deserialize<'de> for StreamTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match String::deserialize(deserializer)?.as_str() {
            "stderr" => Ok(StreamTarget::Stderr),
            "stdout" => Ok(StreamTarget::Stdout),
            "memory" => Ok(StreamTarget::memory()),
            other => Err(D::Error::custom(format!("unknown stream '{}'", other))),
        }
    }
}
