use std::io::{ErrorKind, Write};

use log::info;

use crate::error::{NtscError, NtscResult};
use crate::types::SampleValue;

/// Bytes serialized per write call.
const CHUNK_BYTES: usize = 64 * 1024;

/// Write samples verbatim as 32-bit little-endian floats.
///
/// A writer that stops accepting bytes before everything is out, or fails after taking some of
/// them, yields [`NtscError::ShortWrite`] with the byte counts.
pub fn write_samples<W: Write>(mut writer: W, samples: &[SampleValue]) -> NtscResult<usize> {
    let expected = samples.len() * std::mem::size_of::<SampleValue>();
    let mut written = 0;
    let mut chunk = Vec::with_capacity(CHUNK_BYTES);

    for block in samples.chunks(CHUNK_BYTES / std::mem::size_of::<SampleValue>()) {
        chunk.clear();
        for v in block {
            chunk.extend_from_slice(&v.to_le_bytes());
        }

        let mut pending = &chunk[..];
        while !pending.is_empty() {
            match writer.write(pending) {
                Ok(0) => {
                    return Err(NtscError::ShortWrite {
                        written,
                        expected,
                        source: None,
                    })
                }
                Ok(n) => {
                    written += n;
                    pending = &pending[n..];
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) if written > 0 => {
                    return Err(NtscError::ShortWrite {
                        written,
                        expected,
                        source: Some(e),
                    })
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    writer.flush()?;
    info!("wrote {} samples ({written} bytes)", samples.len());
    Ok(written)
}

/// Read back samples written by [`write_samples`].
pub fn read_samples(bytes: &[u8]) -> Vec<SampleValue> {
    bytes
        .chunks_exact(std::mem::size_of::<SampleValue>())
        .map(|b| SampleValue::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts at most `limit` bytes, then refuses.
    struct Limited {
        buf: Vec<u8>,
        limit: usize,
    }

    impl Write for Limited {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            let n = data.len().min(self.limit - self.buf.len()).min(7);
            self.buf.extend_from_slice(&data[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Accepts `limit` bytes, then fails like a full disk.
    struct Full {
        written: usize,
        limit: usize,
    }

    impl Write for Full {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            if self.written >= self.limit {
                return Err(std::io::Error::other("No space left on device"));
            }
            let n = data.len().min(self.limit - self.written);
            self.written += n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_every_sample() {
        let samples = [0.0, 0.3, 1.0, 0.5];
        let mut out = Vec::new();
        assert_eq!(write_samples(&mut out, &samples).unwrap(), 16);
        assert_eq!(read_samples(&out), samples);
        assert_eq!(&out[4..8], &0.3f32.to_le_bytes());
    }

    #[test]
    fn partial_writes_are_retried() {
        let samples = vec![0.3; 100];
        let mut sink = Limited {
            buf: Vec::new(),
            limit: usize::MAX,
        };
        write_samples(&mut sink, &samples).unwrap();
        assert_eq!(read_samples(&sink.buf), samples);
    }

    #[test]
    fn short_write_reports_counts() {
        let samples = vec![1.0; 100];
        let mut sink = Limited {
            buf: Vec::new(),
            limit: 50,
        };
        let err = write_samples(&mut sink, &samples).unwrap_err();
        assert!(matches!(
            err,
            NtscError::ShortWrite {
                written: 50,
                expected: 400,
                source: None,
            }
        ));
    }

    #[test]
    fn failure_after_partial_write_keeps_counts() {
        let samples = vec![0.3; 133_350];
        let mut sink = Full {
            written: 0,
            limit: 100_000,
        };
        let err = write_samples(&mut sink, &samples).unwrap_err();
        assert_eq!(err.exit_code(), 6);
        match err {
            NtscError::ShortWrite {
                written,
                expected,
                source,
            } => {
                assert_eq!(written, 100_000);
                assert_eq!(expected, 533_400);
                assert!(source.unwrap().to_string().contains("No space left"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failure_before_any_byte_is_io() {
        let mut sink = Full {
            written: 0,
            limit: 0,
        };
        let err = write_samples(&mut sink, &[1.0; 4]).unwrap_err();
        assert!(matches!(err, NtscError::Io(_)));
    }
}
