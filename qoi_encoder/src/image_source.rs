//! Adapters for encoding images decoded by the [`image`] crate.
//!
//! Enabled with the `image` feature. This is the usual way into the encoder
//! when the source is a PNG, JPEG or any other format `image` can decode.

use std::ops::Deref;

use image::buffer::Pixels;
use image::{DynamicImage, ImageBuffer};

use crate::encode::{encode, encoded_size_limit};
use crate::error::Error;
use crate::meta::{Colorspace, ImageMeta};
use crate::pixel::Pixel;
use crate::sink::ByteSink;
use crate::source::PixelSource;

/// A [PixelSource] over an 8-bit `image::ImageBuffer`.
///
/// Any 8-bit pixel type works. Types without alpha, such as `Rgb<u8>` or
/// `Luma<u8>`, produce opaque pixels and describe themselves as RGB.
pub struct ImagePixels<'a, P>
where
  P: image::Pixel<Subpixel = u8> + 'a,
{
  width: u32,
  height: u32,
  pixels: Pixels<'a, P>,
}

impl<'a, P> ImagePixels<'a, P>
where
  P: image::Pixel<Subpixel = u8> + 'a,
{
  pub fn new<C>(buffer: &'a ImageBuffer<P, C>) -> Self
  where
    C: Deref<Target = [u8]>,
  {
    Self {
      width: buffer.width(),
      height: buffer.height(),
      pixels: buffer.pixels(),
    }
  }
}

impl<'a, P> PixelSource for ImagePixels<'a, P>
where
  P: image::Pixel<Subpixel = u8> + 'a,
{
  fn width(&self) -> u32 {
    self.width
  }

  fn height(&self) -> u32 {
    self.height
  }

  fn has_alpha(&self) -> bool {
    P::HAS_ALPHA
  }

  fn next_pixel(&mut self) -> Result<Option<Pixel>, Error> {
    Ok(self.pixels.next().map(|pixel| {
      let [r, g, b, a] = pixel.to_rgba().0;
      Pixel::rgba(r, g, b, a)
    }))
  }
}

/// Encodes an 8-bit image buffer, as RGBA if its pixel type has an alpha
/// channel and as RGB otherwise.
pub fn encode_buffer<P, C>(buffer: &ImageBuffer<P, C>, colorspace: Colorspace) -> Result<Vec<u8>, Error>
where
  P: image::Pixel<Subpixel = u8>,
  C: Deref<Target = [u8]>,
{
  let source = ImagePixels::new(buffer);
  let meta = ImageMeta::from_source(&source).with_colorspace(colorspace);
  let mut sink = ByteSink::new(Vec::with_capacity(encoded_size_limit(&meta)));

  encode(&meta, source, &mut sink)?;

  Ok(sink.finish()?)
}

/// Encodes any decoded image. 8-bit RGB and RGBA images are encoded in place,
/// anything else is converted to 8-bit RGBA when it has an alpha channel and
/// to 8-bit RGB when it doesn't.
pub fn encode_dynamic_image(image: &DynamicImage, colorspace: Colorspace) -> Result<Vec<u8>, Error> {
  match image {
    DynamicImage::ImageRgb8(buffer) => encode_buffer(buffer, colorspace),
    DynamicImage::ImageRgba8(buffer) => encode_buffer(buffer, colorspace),
    other if other.color().has_alpha() => encode_buffer(&other.to_rgba8(), colorspace),
    other => encode_buffer(&other.to_rgb8(), colorspace),
  }
}
