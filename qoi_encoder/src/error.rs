use std::io;

use thiserror::Error;

/// An enumeration of all error values this crate may produce.
#[derive(Debug, Error)]
pub enum Error {
  /// The image's width or height is zero.
  #[error("invalid image dimensions {width}x{height}, width and height must be non-zero")]
  InvalidDimensions { width: u32, height: u32 },

  /// The image's channel count is neither 3 (RGB) nor 4 (RGBA).
  #[error("unsupported channel count {0}, expected 3 for RGB or 4 for RGBA")]
  UnsupportedChannelCount(u8),

  /// Failed to derive a supported colorspace from a byte value.
  #[error("invalid image colorspace {0}, expected 0 for sRGB or 1 for linear")]
  InvalidColorspace(u8),

  /// The pixel source's dimensions don't agree with the image metadata.
  #[error("pixel source is {source_width}x{source_height} but the image is {width}x{height}")]
  DimensionMismatch {
    width: u32,
    height: u32,
    source_width: u32,
    source_height: u32,
  },

  /// An in-memory pixel buffer's length doesn't equal
  /// `width * height * channels`.
  #[error("invalid pixel data: expected {expected} bytes, got {actual}")]
  InvalidPixelDataLength { expected: u64, actual: u64 },

  /// The pixel source ran out of pixels before the whole image was encoded.
  #[error("pixel source ended after {actual} of {expected} pixels")]
  UnexpectedEof { expected: u64, actual: u64 },

  /// Any `std::io::Error` raised while reading pixel data or writing the
  /// encoded image. Encoding stops at the first one.
  #[error(transparent)]
  Io(#[from] io::Error),
}
