use std::io;

use crate::error::Error;
use crate::meta::ImageMeta;
use crate::pixel::Pixel;

/// A single-pass supplier of an image's pixels.
///
/// Pixels are pulled in raster order (rows top to bottom, each row left to
/// right) with [PixelSource::next_pixel]. The encoder pulls exactly
/// `width * height` pixels, once, and never asks for more.
pub trait PixelSource {
  fn width(&self) -> u32;

  fn height(&self) -> u32;

  /// Whether the source's pixels carry their own alpha channel. Pixels from
  /// sources without one must be opaque.
  fn has_alpha(&self) -> bool;

  /// Pulls the next pixel, or `Ok(None)` once the source is exhausted.
  fn next_pixel(&mut self) -> Result<Option<Pixel>, Error>;
}

impl<S: PixelSource + ?Sized> PixelSource for &mut S {
  fn width(&self) -> u32 {
    (**self).width()
  }

  fn height(&self) -> u32 {
    (**self).height()
  }

  fn has_alpha(&self) -> bool {
    (**self).has_alpha()
  }

  fn next_pixel(&mut self) -> Result<Option<Pixel>, Error> {
    (**self).next_pixel()
  }
}

/// Interleaved 8-bit RGB or RGBA pixel data read from any `std::io::Read`.
///
/// Reads one pixel at a time, so wrap file or network readers in a
/// `std::io::BufReader`. Stops after `width * height` pixels even if the
/// reader holds more data.
#[derive(Debug)]
pub struct RawPixels<R> {
  reader: R,
  meta: ImageMeta,
  remaining: u64,
}

impl<R: io::Read> RawPixels<R> {
  /// Reads pixels laid out as described by `meta`. Fails if `meta` isn't a
  /// valid QOI image description.
  pub fn new(reader: R, meta: &ImageMeta) -> Result<Self, Error> {
    meta.validate()?;

    Ok(Self { reader, meta: *meta, remaining: meta.num_pixels() })
  }
}

impl<R: io::Read> PixelSource for RawPixels<R> {
  fn width(&self) -> u32 {
    self.meta.width
  }

  fn height(&self) -> u32 {
    self.meta.height
  }

  fn has_alpha(&self) -> bool {
    self.meta.channels == 4
  }

  fn next_pixel(&mut self) -> Result<Option<Pixel>, Error> {
    if self.remaining == 0 {
      return Ok(None);
    }

    let mut pixel_buf = [0; 4];
    let pixel_buf = &mut pixel_buf[..self.meta.channels as usize];

    match self.reader.read_exact(pixel_buf) {
      Ok(()) => {
        self.remaining -= 1;
        Ok(Some(Pixel::from_channels(pixel_buf)))
      }
      Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}
