//! Tests for the relay copy loop
//!
//! These tests verify:
//! - Byte-exact, ordered transfer (small, empty, multi-chunk)
//! - Read and write failures are told apart
//! - Interrupted reads are retried
//! - Bulk-transfer sinks bypass the buffered path
//! - File-backed local streams

use std::io::{self, Cursor, Read, Write};

use fastnc::relay::{
    classify_socket_copy_error, relay, Close, LocalSink, LocalSource, RelayError, Sink, BUFFER_SIZE,
};
use fastnc::NcError;
use tempfile::TempDir;

// =============================================================================
// Helper Types
// =============================================================================

/// Deterministic, non-repeating-per-chunk payload
fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Yields some bytes, then fails
struct FailingReader {
    data: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            n => Ok(n),
        }
    }
}

/// Returns Interrupted on every other call
struct InterruptingReader {
    data: Cursor<Vec<u8>>,
    interrupt_next: bool,
}

impl Read for InterruptingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt_next = !self.interrupt_next;
        if self.interrupt_next {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
        }
        let n = buf.len().min(7);
        self.data.read(&mut buf[..n])
    }
}

/// Accepts `limit` bytes, then fails
struct FullSink {
    written: Vec<u8>,
    limit: usize,
}

impl Write for FullSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() >= self.limit {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
        }
        let n = buf.len().min(self.limit - self.written.len());
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: Read + ?Sized> Sink<S> for FullSink {}

/// Takes the whole source through its own bulk path
#[derive(Default)]
struct BulkSink {
    received: Vec<u8>,
    bulk_calls: usize,
    write_calls: usize,
}

impl Write for BulkSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_calls += 1;
        self.received.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink<Cursor<Vec<u8>>> for BulkSink {
    fn transfer_from(&mut self, source: &mut Cursor<Vec<u8>>) -> Option<Result<u64, RelayError>> {
        self.bulk_calls += 1;
        Some(
            source
                .read_to_end(&mut self.received)
                .map(|n| n as u64)
                .map_err(RelayError::Read),
        )
    }
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_relay_small_payload() {
    let mut source = Cursor::new(b"hello, world\n".to_vec());
    let mut sink: Vec<u8> = Vec::new();

    let copied = relay(&mut source, &mut sink).unwrap();

    assert_eq!(copied, 13);
    assert_eq!(sink, b"hello, world\n");
}

#[test]
fn test_relay_empty_source() {
    let mut source = Cursor::new(Vec::<u8>::new());
    let mut sink: Vec<u8> = Vec::new();

    let copied = relay(&mut source, &mut sink).unwrap();

    assert_eq!(copied, 0);
    assert!(sink.is_empty());
}

#[test]
fn test_relay_spans_multiple_chunks() {
    let data = payload(BUFFER_SIZE * 2 + 12345);
    let mut source = Cursor::new(data.clone());
    let mut sink: Vec<u8> = Vec::new();

    let copied = relay(&mut source, &mut sink).unwrap();

    assert_eq!(copied, data.len() as u64);
    assert_eq!(sink, data);
}

#[test]
fn test_relay_retries_interrupted_reads() {
    let data = payload(100);
    let mut source = InterruptingReader {
        data: Cursor::new(data.clone()),
        interrupt_next: false,
    };
    let mut sink: Vec<u8> = Vec::new();

    relay(&mut source, &mut sink).unwrap();

    assert_eq!(sink, data);
}

// =============================================================================
// Error Classification Tests
// =============================================================================

#[test]
fn test_read_error_after_partial_transfer() {
    let mut source = FailingReader {
        data: Cursor::new(b"partial".to_vec()),
    };
    let mut sink: Vec<u8> = Vec::new();

    let err = relay(&mut source, &mut sink).unwrap_err();

    assert!(matches!(err, RelayError::Read(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
    // What was read before the failure was still delivered
    assert_eq!(sink, b"partial");
}

#[test]
fn test_write_error() {
    let mut source = Cursor::new(payload(1000));
    let mut sink = FullSink {
        written: Vec::new(),
        limit: 100,
    };

    let err = relay(&mut source, &mut sink).unwrap_err();

    assert!(matches!(err, RelayError::Write(_)));
    assert_eq!(sink.written.len(), 100);
}

#[test]
fn test_attribute_labels_endpoints() {
    let read = RelayError::Read(io::Error::new(io::ErrorKind::Other, "boom"));
    let err = read.attribute("connection", "standard output");
    assert!(matches!(err, NcError::Read { from: "connection", .. }));
    assert_eq!(err.to_string(), "failed to read from connection: boom");

    let write = RelayError::Write(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
    let err = write.attribute("standard input", "connection");
    assert!(matches!(err, NcError::Write { to: "connection", .. }));
    assert_eq!(err.to_string(), "failed to write to connection: pipe");
}

// =============================================================================
// Capability Dispatch Tests
// =============================================================================

#[test]
fn test_bulk_sink_bypasses_buffered_copy() {
    let data = payload(BUFFER_SIZE + 1);
    let mut source = Cursor::new(data.clone());
    let mut sink = BulkSink::default();

    let copied = relay(&mut source, &mut sink).unwrap();

    assert_eq!(copied, data.len() as u64);
    assert_eq!(sink.received, data);
    assert_eq!(sink.bulk_calls, 1);
    assert_eq!(sink.write_calls, 0);
}

// =============================================================================
// Local Stream Tests
// =============================================================================

#[test]
fn test_file_source_to_file_sink() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.bin");
    let output = temp.path().join("out.bin");
    let data = payload(300_000);
    std::fs::write(&input, &data).unwrap();

    let mut source = LocalSource::open(Some(input.as_path())).unwrap();
    assert_eq!(source.label(), "input file");

    let mut sink = LocalSink::open(Some(output.as_path())).unwrap();
    assert_eq!(sink.label(), "output file");

    let copied = relay(&mut source, &mut sink).unwrap();
    assert_eq!(copied, data.len() as u64);

    source.close().unwrap();
    sink.close().unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), data);
}

#[test]
fn test_open_missing_input_file() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.bin");

    let err = LocalSource::open(Some(missing.as_path())).unwrap_err();

    assert!(matches!(err, NcError::OpenFile { mode: "reading", .. }));
    assert!(err.to_string().starts_with("failed to open file"));
}

#[test]
fn test_open_output_in_missing_directory() {
    let temp = TempDir::new().unwrap();
    let bad = temp.path().join("no-such-dir").join("out.bin");

    let err = LocalSink::open(Some(bad.as_path())).unwrap_err();

    assert!(matches!(err, NcError::OpenFile { mode: "writing", .. }));
}

#[test]
fn test_default_local_streams_are_stdio() {
    assert_eq!(LocalSource::open(None).unwrap().label(), "standard input");
    assert_eq!(LocalSink::open(None).unwrap().label(), "standard output");
}

#[test]
fn test_socket_copy_errors_split_by_side() {
    for kind in [
        io::ErrorKind::BrokenPipe,
        io::ErrorKind::ConnectionReset,
        io::ErrorKind::ConnectionAborted,
        io::ErrorKind::NotConnected,
        io::ErrorKind::TimedOut,
        io::ErrorKind::WouldBlock,
    ] {
        let err = classify_socket_copy_error(io::Error::new(kind, "socket"));
        assert!(matches!(err, RelayError::Write(_)), "{:?} should be a write error", kind);
    }

    for kind in [
        io::ErrorKind::PermissionDenied,
        io::ErrorKind::InvalidInput,
        io::ErrorKind::UnexpectedEof,
        io::ErrorKind::Other,
    ] {
        let err = classify_socket_copy_error(io::Error::new(kind, "source"));
        assert!(matches!(err, RelayError::Read(_)), "{:?} should be a read error", kind);
    }

    // EISDIR: what reading a directory handed over as -i gives
    #[cfg(unix)]
    {
        let err = classify_socket_copy_error(io::Error::from_raw_os_error(21));
        assert!(matches!(err, RelayError::Read(_)));
    }
}
