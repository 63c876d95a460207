//! A minimal QOI decoder used to check the encoder's output. It trusts its
//! input and panics on anything malformed.

#![allow(dead_code)]

use qoi_encoder::{Pixel, QOI_BYTES_END, QOI_BYTES_MAGIC, QOI_HEADER_LEN};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token {
  Index(u8),
  Diff,
  Luma,
  Rgb,
  Rgba,
  // The run length, 1..=62.
  Run(u8),
}

// One decoded token along with the context it was decoded in.
#[derive(Clone, Copy, Debug)]
pub struct Step {
  pub token: Token,
  pub prev: Pixel,
  pub pixel: Pixel,
  // Whether the cache already held `pixel` at its hash before this token.
  pub cached: bool,
}

#[derive(Debug)]
pub struct Decoded {
  pub width: u32,
  pub height: u32,
  pub channels: u8,
  pub colorspace: u8,
  pub pixels: Vec<Pixel>,
  pub steps: Vec<Step>,
}

impl Decoded {
  pub fn tokens(&self) -> Vec<Token> {
    self.steps.iter().map(|step| step.token).collect()
  }
}

pub fn decode(bytes: &[u8]) -> Decoded {
  assert_eq!(&bytes[..4], QOI_BYTES_MAGIC, "missing magic");

  let width = u32::from_be_bytes(bytes[4..8].try_into().unwrap());
  let height = u32::from_be_bytes(bytes[8..12].try_into().unwrap());
  let num_pixels = width as usize * height as usize;

  let mut cache = [Pixel::ZERO; 64];
  let mut prev = Pixel::default();
  let mut pixels = Vec::with_capacity(num_pixels);
  let mut steps = Vec::new();
  let mut pos = QOI_HEADER_LEN;

  while pixels.len() < num_pixels {
    let byte = bytes[pos];
    pos += 1;

    let (pixel, token) = match byte {
      0xfe => {
        let pixel = Pixel::rgba(bytes[pos], bytes[pos + 1], bytes[pos + 2], prev.a);
        pos += 3;
        (pixel, Token::Rgb)
      }
      0xff => {
        let pixel = Pixel::rgba(bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]);
        pos += 4;
        (pixel, Token::Rgba)
      }
      _ => match byte >> 6 {
        0b00 => (cache[byte as usize], Token::Index(byte)),
        0b01 => {
          let diff_r = (byte >> 4 & 0x03).wrapping_sub(2);
          let diff_g = (byte >> 2 & 0x03).wrapping_sub(2);
          let diff_b = (byte & 0x03).wrapping_sub(2);
          let pixel = Pixel::rgba(
            prev.r.wrapping_add(diff_r),
            prev.g.wrapping_add(diff_g),
            prev.b.wrapping_add(diff_b),
            prev.a,
          );
          (pixel, Token::Diff)
        }
        0b10 => {
          let next = bytes[pos];
          pos += 1;

          let diff_g = (byte & 0x3f).wrapping_sub(32);
          let diff_r = (next >> 4).wrapping_sub(8).wrapping_add(diff_g);
          let diff_b = (next & 0x0f).wrapping_sub(8).wrapping_add(diff_g);
          let pixel = Pixel::rgba(
            prev.r.wrapping_add(diff_r),
            prev.g.wrapping_add(diff_g),
            prev.b.wrapping_add(diff_b),
            prev.a,
          );
          (pixel, Token::Luma)
        }
        _ => {
          let run = (byte & 0x3f) + 1;
          pixels.extend(std::iter::repeat(prev).take(run as usize));
          steps.push(Step { token: Token::Run(run), prev, pixel: prev, cached: false });
          continue;
        }
      },
    };

    let index = pixel.qoi_hash() as usize;
    steps.push(Step { token, prev, pixel, cached: cache[index] == pixel });
    cache[index] = pixel;
    prev = pixel;
    pixels.push(pixel);
  }

  assert_eq!(pixels.len(), num_pixels, "run overshot the image");
  assert_eq!(&bytes[pos..], &QOI_BYTES_END, "missing end marker");

  Decoded {
    width,
    height,
    channels: bytes[12],
    colorspace: bytes[13],
    pixels,
    steps,
  }
}

/// Splits interleaved RGB or RGBA bytes into pixels, opaque for RGB.
pub fn to_pixels(data: &[u8], channels: u8) -> Vec<Pixel> {
  data.chunks_exact(channels as usize).map(Pixel::from_channels).collect()
}

// Signed wraparound delta `current - prev`.
fn delta(current: u8, prev: u8) -> i8 {
  current.wrapping_sub(prev) as i8
}

pub fn fits_diff(prev: Pixel, pixel: Pixel) -> bool {
  let range = -2..=1;

  prev.a == pixel.a
    && range.contains(&delta(pixel.r, prev.r))
    && range.contains(&delta(pixel.g, prev.g))
    && range.contains(&delta(pixel.b, prev.b))
}

pub fn fits_luma(prev: Pixel, pixel: Pixel) -> bool {
  let diff_g = delta(pixel.g, prev.g) as i16;
  let diff_rg = delta(pixel.r, prev.r) as i16 - diff_g;
  let diff_bg = delta(pixel.b, prev.b) as i16 - diff_g;

  prev.a == pixel.a
    && (-32..=31).contains(&diff_g)
    && (-8..=7).contains(&diff_rg)
    && (-8..=7).contains(&diff_bg)
}

/// Checks that every token is the one the op precedence calls for.
pub fn assert_op_choices(decoded: &Decoded) {
  for step in &decoded.steps {
    match step.token {
      Token::Run(run) => {
        assert!((1..=62).contains(&run), "run of {run}");
      }
      Token::Index(_) => {
        assert!(step.cached, "index op for uncached {:?}", step.pixel);
        assert_ne!(step.pixel, step.prev, "index op inside a run");
      }
      Token::Diff => {
        assert!(!step.cached && step.pixel != step.prev);
        assert!(fits_diff(step.prev, step.pixel));
      }
      Token::Luma => {
        assert!(!step.cached && step.pixel != step.prev);
        assert!(!fits_diff(step.prev, step.pixel) && fits_luma(step.prev, step.pixel));
      }
      Token::Rgb => {
        assert!(!step.cached && step.pixel != step.prev);
        assert_eq!(step.pixel.a, step.prev.a);
        assert!(!fits_diff(step.prev, step.pixel) && !fits_luma(step.prev, step.pixel));
      }
      Token::Rgba => {
        assert!(!step.cached);
        assert_ne!(step.pixel.a, step.prev.a);
      }
    }
  }
}
