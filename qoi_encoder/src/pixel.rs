// An enumeration of the possible pixel "diffs" against the previous pixel.
// Channel values are stored with their bias already applied, ready to be
// packed into an op.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelDiff {
  // `QOI_OP_DIFF` deltas, each biased by +2 into 0..=3.
  Small(u8, u8, u8),
  // `QOI_OP_LUMA` deltas: green biased by +32 into 0..=63, red-green and
  // blue-green biased by +8 into 0..=15.
  Luma(u8, u8, u8),
}

/// A single RGBA sample, 8 bits per channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Pixel {
  /// Red channel value.
  pub r: u8,
  /// Green channel value.
  pub g: u8,
  /// Blue channel value.
  pub b: u8,
  /// Alpha channel value.
  pub a: u8,
}

/// Opaque black, the encoder's initial "previous pixel".
impl Default for Pixel {
  fn default() -> Self {
    Self { r: 0, g: 0, b: 0, a: 255 }
  }
}

impl Pixel {
  /// Transparent black, the contents of a color cache slot that has never
  /// been written.
  pub const ZERO: Pixel = Pixel { r: 0, g: 0, b: 0, a: 0 };

  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Builds a pixel from 3 (RGB) or 4 (RGBA) interleaved channel bytes. A
  /// missing alpha channel is opaque.
  pub fn from_channels(channels: &[u8]) -> Self {
    Self {
      r: channels[0],
      g: channels[1],
      b: channels[2],
      a: channels.get(3).copied().unwrap_or(255),
    }
  }

  /// QOI color hash, always in `0..64`. Not implemented via the `Hash` trait
  /// since it indexes the color cache rather than a `HashMap`.
  pub fn qoi_hash(&self) -> u8 {
    let r = self.r as u32;
    let g = self.g as u32;
    let b = self.b as u32;
    let a = self.a as u32;

    ((r * 3 + g * 5 + b * 7 + a * 11) % 64) as u8
  }

  // Attempts to produce a `PixelDiff` of `self` against the `prev` pixel.
  // Returns `None` when the alpha changed or the deltas don't fit either
  // diff op.
  //
  // Deltas are computed with 8-bit wraparound, so `0 - 255` is `1`. Adding
  // the bias also wraps, which maps the signed range onto a contiguous
  // unsigned one: -2..=1 becomes 0..=3.
  pub fn diff(&self, prev: &Pixel) -> Option<PixelDiff> {
    if self.a != prev.a {
      return None;
    }

    let diff_r = self.r.wrapping_sub(prev.r);
    let diff_g = self.g.wrapping_sub(prev.g);
    let diff_b = self.b.wrapping_sub(prev.b);

    let small_r = diff_r.wrapping_add(2);
    let small_g = diff_g.wrapping_add(2);
    let small_b = diff_b.wrapping_add(2);

    if small_r <= 3 && small_g <= 3 && small_b <= 3 {
      return Some(PixelDiff::Small(small_r, small_g, small_b));
    }

    let luma_g = diff_g.wrapping_add(32);

    if luma_g > 63 {
      return None;
    }

    let luma_rg = diff_r.wrapping_sub(diff_g).wrapping_add(8);
    let luma_bg = diff_b.wrapping_sub(diff_g).wrapping_add(8);

    if luma_rg <= 15 && luma_bg <= 15 {
      return Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg));
    }

    None
  }
}
