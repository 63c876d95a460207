use crate::error::Error;
use crate::source::PixelSource;

pub const QOI_BYTES_END: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
pub const QOI_BYTES_MAGIC: &[u8; 4] = b"qoif";
pub const QOI_MAX_RUN: u8 = 62;
pub const QOI_HEADER_LEN: usize = 14;

/// Metadata describing an image.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImageMeta {
  /// The number of color channels the image's pixels contain: 3 for RGB or 4
  /// for RGBA. Color channels are assumed to not be pre-multiplied with the
  /// alpha channel ("un-premultiplied alpha").
  pub channels: u8,
  /// The image's colorspace, see [Colorspace]. Purely informative, it doesn't
  /// change how pixels are encoded.
  pub colorspace: Colorspace,
  /// The image's height.
  pub height: u32,
  /// The image's width.
  pub width: u32,
}

impl ImageMeta {
  /// Describes a `width` x `height` image with the given channel count in the
  /// sRGB colorspace. Nothing is validated until the header is serialized.
  pub fn new(width: u32, height: u32, channels: u8) -> Self {
    Self { channels, colorspace: Colorspace::Srgb, height, width }
  }

  /// Derives the metadata from a pixel source. Sources with an alpha channel
  /// are described as RGBA, all others as RGB.
  pub fn from_source<S: PixelSource + ?Sized>(source: &S) -> Self {
    let channels = if source.has_alpha() { 4 } else { 3 };

    Self::new(source.width(), source.height(), channels)
  }

  pub fn with_colorspace(mut self, colorspace: Colorspace) -> Self {
    self.colorspace = colorspace;
    self
  }

  /// Returns the total number of pixels that make up the image.
  pub fn num_pixels(&self) -> u64 {
    u64::from(self.width) * u64::from(self.height)
  }

  /// Checks the dimensions and channel count, in that order.
  pub fn validate(&self) -> Result<(), Error> {
    if self.width == 0 || self.height == 0 {
      return Err(Error::InvalidDimensions { width: self.width, height: self.height });
    }

    if !matches!(self.channels, 3 | 4) {
      return Err(Error::UnsupportedChannelCount(self.channels));
    }

    Ok(())
  }

  /// Serializes the 14 byte QOI header, see [serialize_header].
  pub fn header(&self) -> Result<[u8; QOI_HEADER_LEN], Error> {
    serialize_header(self.width, self.height, self.channels, self.colorspace)
  }
}

/// Builds a QOI header: the `qoif` magic, big-endian width and height, the
/// channel count and the colorspace tag.
///
/// Fails with [Error::InvalidDimensions] when either dimension is zero and
/// with [Error::UnsupportedChannelCount] when `channels` isn't 3 or 4.
pub fn serialize_header(
  width: u32,
  height: u32,
  channels: u8,
  colorspace: Colorspace,
) -> Result<[u8; QOI_HEADER_LEN], Error> {
  ImageMeta { channels, colorspace, height, width }.validate()?;

  let mut header = [0; QOI_HEADER_LEN];

  header[..4].copy_from_slice(QOI_BYTES_MAGIC);
  header[4..8].copy_from_slice(&width.to_be_bytes());
  header[8..12].copy_from_slice(&height.to_be_bytes());
  header[12] = channels;
  header[13] = colorspace as u8;

  Ok(header)
}

/// How an image's color channels should be interpreted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Colorspace {
  /// sRGB color channels with a linear alpha channel.
  #[default]
  Srgb = 0,
  /// All channels linear.
  Linear = 1,
}

/// A `TryFrom` implemenation for converting any `u8` into a `Colorspace`.
/// `0` maps to `Colorspace::Srgb`, and `1` maps to `Colorspace::Linear`. All
/// other `u8` values are invalid.
impl TryFrom<u8> for Colorspace {
  type Error = Error;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    match byte {
      0 => Ok(Colorspace::Srgb),
      1 => Ok(Colorspace::Linear),
      _ => Err(Error::InvalidColorspace(byte)),
    }
  }
}
