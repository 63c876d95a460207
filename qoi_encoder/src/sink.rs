use std::io;

/// Append-only destination for an encoded image.
///
/// Wraps any `std::io::Write` and counts the bytes written through it. The
/// sink never seeks or rewrites, so anything from a `Vec<u8>` to a socket
/// works. Since the encoder issues many tiny writes, wrap file or network
/// writers in a `std::io::BufWriter` first.
///
/// A failed write leaves the destination holding a partial image which
/// callers should discard.
#[derive(Debug)]
pub struct ByteSink<W> {
  writer: W,
  position: u64,
}

impl<W: io::Write> ByteSink<W> {
  pub fn new(writer: W) -> Self {
    Self { writer, position: 0 }
  }

  /// Number of bytes appended so far.
  pub fn position(&self) -> u64 {
    self.position
  }

  pub fn write_u8(&mut self, byte: u8) -> Result<(), io::Error> {
    self.write_all(&[byte])
  }

  pub fn write_u32_be(&mut self, value: u32) -> Result<(), io::Error> {
    self.write_all(&value.to_be_bytes())
  }

  pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), io::Error> {
    self.writer.write_all(bytes)?;
    self.position += bytes.len() as u64;
    Ok(())
  }

  /// Flushes the underlying writer and gives it back.
  pub fn finish(mut self) -> Result<W, io::Error> {
    self.writer.flush()?;
    Ok(self.writer)
  }
}
