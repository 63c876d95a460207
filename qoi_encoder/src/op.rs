use std::io;

use crate::meta::QOI_MAX_RUN;
use crate::sink::ByteSink;

// QOI chunk tags. The 2-bit tags occupy the top two bits of the first byte,
// the 8-bit tags the whole byte. `Rgb` and `Rgba` share their top bits with
// `Run`, which is why a run never encodes a length above 62.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Tag {
  Index = 0x00,
  Diff = 0x40,
  Luma = 0x80,
  Run = 0xc0,
  Rgb = 0xfe,
  Rgba = 0xff,
}

// An enumeration of each possible QOI encoding "chunk", or Op. Channel
// values of the diff ops are stored biased, see `PixelDiff`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op {
  // `QOI_OP_DIFF`, contains the red, green, and blue color difference from the
  // previous pixel with a bias of +2.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 1 |  dr |  dg |  db  |
  //
  Diff(u8, u8, u8),

  // `QOI_OP_INDEX`, index into the color cache.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 0 |      index       |
  //
  Index(u8),

  // `QOI_OP_LUMA`, contains the green difference from the previous pixel with
  // a bias of +32, and the red-green and blue-green differences with a bias
  // of +8.
  //
  // | 7 6   5  4  3  2  1  0 | 7  6  5  4   3  2  1  0 |
  // |------------------------|-------------------------|
  // | 1 0 |       dg         |   dr - dg  |   db - dg  |
  //
  Luma(u8, u8, u8),

  // `QOI_OP_RGB`, contains the red, green, and blue values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|
  // | 1  1  1  1  1  1  1  0 |   r  |   g  |   b  |
  //
  Rgb(u8, u8, u8),

  // `QOI_OP_RGBA`, contains the red, green, blue, and alpha values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|------|
  // | 1  1  1  1  1  1  1  1 |   r  |   g  |   b  |   a  |
  //
  Rgba(u8, u8, u8, u8),

  // `QOI_OP_RUN`, contains the length of the run (1..=62), stored with a
  // bias of -1.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 1 1 |      run         |
  Run(u8),
}

impl Op {
  const MASK_DIFF: u8 = 0x03;
  const MASK_LUMA_G: u8 = 0x3f;
  const MASK_LUMA_RB: u8 = 0x0f;
  const MASK_PAYLOAD: u8 = 0x3f;

  // Encodes the `Op` and appends its bytes to the sink.
  pub fn write_to<W: io::Write>(self, sink: &mut ByteSink<W>) -> Result<(), io::Error> {
    match self {
      Op::Diff(diff_r, diff_g, diff_b) => {
        let diff_r = diff_r & Op::MASK_DIFF;
        let diff_g = diff_g & Op::MASK_DIFF;
        let diff_b = diff_b & Op::MASK_DIFF;

        sink.write_u8(Tag::Diff as u8 | (diff_r << 4) | (diff_g << 2) | diff_b)
      }
      Op::Index(index) => {
        sink.write_u8(Tag::Index as u8 | (index & Op::MASK_PAYLOAD))
      }
      Op::Luma(luma_g, luma_rg, luma_bg) => {
        let luma_rg = luma_rg & Op::MASK_LUMA_RB;
        let luma_bg = luma_bg & Op::MASK_LUMA_RB;

        sink.write_all(&[Tag::Luma as u8 | (luma_g & Op::MASK_LUMA_G), (luma_rg << 4) | luma_bg])
      }
      Op::Rgb(r, g, b) => {
        sink.write_all(&[Tag::Rgb as u8, r, g, b])
      }
      Op::Rgba(r, g, b, a) => {
        sink.write_all(&[Tag::Rgba as u8, r, g, b, a])
      }
      Op::Run(run_count) => {
        debug_assert!((1..=QOI_MAX_RUN).contains(&run_count), "run of {run_count}");

        sink.write_u8(Tag::Run as u8 | (run_count.wrapping_sub(1) & Op::MASK_PAYLOAD))
      }
    }
  }
}
