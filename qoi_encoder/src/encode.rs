use std::io;

use log::{debug, trace};

use crate::error::Error;
use crate::meta::{ImageMeta, QOI_BYTES_END, QOI_HEADER_LEN, QOI_MAX_RUN};
use crate::op::Op;
use crate::pixel::{Pixel, PixelDiff};
use crate::sink::ByteSink;
use crate::source::{PixelSource, RawPixels};
use crate::state::State;

/// How many times each op was emitted while encoding an image.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OpCounts {
  pub diff: u64,
  pub index: u64,
  pub luma: u64,
  pub rgb: u64,
  pub rgba: u64,
  pub run: u64,
}

impl OpCounts {
  /// Total number of ops, always at most the image's pixel count.
  pub fn total(&self) -> u64 {
    self.diff + self.index + self.luma + self.rgb + self.rgba + self.run
  }
}

/// The outcome of a successful [encode] call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EncodeSummary {
  /// Bytes appended to the sink, header and end marker included.
  pub bytes_written: u64,
  pub ops: OpCounts,
}

/// Encodes the pixels pulled from `source` as a QOI image described by `meta`
/// and appends the result to `sink`.
///
/// The header is validated before anything is written, so an
/// [Error::InvalidDimensions] or [Error::UnsupportedChannelCount] leaves the
/// sink untouched. Exactly `meta.num_pixels()` pixels are pulled; a source
/// that runs dry early fails with [Error::UnexpectedEof]. When `meta`
/// describes an RGB image every pixel is encoded as opaque, whatever alpha
/// the source reports.
///
/// Any other error, including a failed write, aborts encoding with a partial
/// image in the sink which should be discarded.
pub fn encode<S, W>(
  meta: &ImageMeta,
  mut source: S,
  sink: &mut ByteSink<W>,
) -> Result<EncodeSummary, Error>
where
  S: PixelSource,
  W: io::Write,
{
  let header = meta.header()?;

  if source.width() != meta.width || source.height() != meta.height {
    return Err(Error::DimensionMismatch {
      width: meta.width,
      height: meta.height,
      source_width: source.width(),
      source_height: source.height(),
    });
  }

  debug!(
    "Encoding {}x{} image, {} channels, {:?}",
    meta.width, meta.height, meta.channels, meta.colorspace
  );

  let start = sink.position();
  sink.write_all(&header)?;

  let num_pixels = meta.num_pixels();
  let opaque = meta.channels == 3;
  let mut state = State::new();
  let mut writer = OpWriter::new(sink);

  for pulled in 0..num_pixels {
    let Some(mut pixel) = source.next_pixel()? else {
      return Err(Error::UnexpectedEof { expected: num_pixels, actual: pulled });
    };

    if opaque {
      pixel.a = 255;
    }

    encode_pixel(&mut state, pixel, &mut writer)?;
    state.prev_pixel = pixel;
  }

  if let Some(run_count) = state.take_run() {
    writer.write(Op::Run(run_count))?;
  }

  let ops = writer.counts;
  sink.write_all(&QOI_BYTES_END)?;

  let summary = EncodeSummary { bytes_written: sink.position() - start, ops };

  debug!(
    "Encoded {} pixels into {} bytes using {} ops",
    num_pixels,
    summary.bytes_written,
    ops.total()
  );

  Ok(summary)
}

/// Encodes an image's raw pixel data and `ImageMeta` data into a QOI encoded
/// image, returning the number of bytes written.
///
/// This function supports reading and writing to in-memory structures or IO
/// streams by accepting a generic trait bound of `std::io::Read` for the
/// image's interleaved RGB or RGBA pixel data, and `std::io::Write` for the
/// encoded image's destination.
///
/// Note that this function performs frequent reads and writes, so it's
/// recommended to provide a buffered IO implementation such as
/// `std::io::BufReader` and `std::io::BufWriter` for streaming applications.
pub fn encode_image<R: io::Read, W: io::Write>(
  reader: R,
  writer: W,
  meta: &ImageMeta,
) -> Result<u64, Error> {
  let source = RawPixels::new(reader, meta)?;
  let mut sink = ByteSink::new(writer);
  let summary = encode(meta, source, &mut sink)?;

  sink.finish()?;

  Ok(summary.bytes_written)
}

/// Encodes an in-memory buffer of interleaved RGB or RGBA pixels into a new
/// `Vec`. The buffer must hold exactly `width * height * channels` bytes.
pub fn encode_to_vec(pixels: &[u8], meta: &ImageMeta) -> Result<Vec<u8>, Error> {
  meta.validate()?;

  let expected = meta.num_pixels() * u64::from(meta.channels);
  let actual = pixels.len() as u64;

  if expected != actual {
    return Err(Error::InvalidPixelDataLength { expected, actual });
  }

  let source = RawPixels::new(pixels, meta)?;
  let mut sink = ByteSink::new(Vec::with_capacity(encoded_size_limit(meta)));

  encode(meta, source, &mut sink)?;

  Ok(sink.finish()?)
}

/// The largest number of bytes an image described by `meta` can encode to:
/// every pixel as a full RGB or RGBA op, plus header and end marker.
/// Saturates at `usize::MAX`.
pub fn encoded_size_limit(meta: &ImageMeta) -> usize {
  let limit = meta
    .num_pixels()
    .saturating_mul(u64::from(meta.channels) + 1)
    .saturating_add((QOI_HEADER_LEN + QOI_BYTES_END.len()) as u64);

  usize::try_from(limit).unwrap_or(usize::MAX)
}

// Writes ops to the sink, counting them by kind.
struct OpWriter<'s, W> {
  sink: &'s mut ByteSink<W>,
  counts: OpCounts,
}

impl<'s, W: io::Write> OpWriter<'s, W> {
  fn new(sink: &'s mut ByteSink<W>) -> Self {
    Self { sink, counts: OpCounts::default() }
  }

  fn write(&mut self, op: Op) -> Result<(), io::Error> {
    op.write_to(self.sink)?;

    let count = match op {
      Op::Diff(..) => &mut self.counts.diff,
      Op::Index(_) => &mut self.counts.index,
      Op::Luma(..) => &mut self.counts.luma,
      Op::Rgb(..) => &mut self.counts.rgb,
      Op::Rgba(..) => &mut self.counts.rgba,
      Op::Run(_) => &mut self.counts.run,
    };
    *count += 1;

    Ok(())
  }
}

// Encodes a single pixel against the `state`, writing zero or more ops. The
// caller records the pixel as the new previous pixel afterwards.
fn encode_pixel<W: io::Write>(
  state: &mut State,
  pixel: Pixel,
  writer: &mut OpWriter<'_, W>,
) -> Result<(), io::Error> {
  if pixel == state.prev_pixel {
    state.run_count += 1;

    if state.run_count == QOI_MAX_RUN {
      trace!("Run reached {} pixels, flushing", QOI_MAX_RUN);
      writer.write(Op::Run(QOI_MAX_RUN))?;
      state.run_count = 0;
    }

    return Ok(());
  }

  if let Some(run_count) = state.take_run() {
    writer.write(Op::Run(run_count))?;
  }

  if let Some(index) = state.cache.match_or_store(pixel) {
    return writer.write(Op::Index(index));
  }

  let op = match pixel.diff(&state.prev_pixel) {
    Some(PixelDiff::Small(diff_r, diff_g, diff_b)) => Op::Diff(diff_r, diff_g, diff_b),
    Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg)) => Op::Luma(luma_g, luma_rg, luma_bg),
    None if pixel.a == state.prev_pixel.a => Op::Rgb(pixel.r, pixel.g, pixel.b),
    None => Op::Rgba(pixel.r, pixel.g, pixel.b, pixel.a),
  };

  writer.write(op)
}
