//! This crate implements a single-pass encoder for the
//! [QOI image format](https://qoiformat.org).
//!
//! Pixels are pulled one at a time from a [PixelSource] and compressed into a
//! [ByteSink], which wraps any `std::io::Write`. The encoder keeps only the
//! previous pixel, the pending run and a 64 entry color cache, so images of any
//! size can be streamed without holding them in memory.
//!
//! The primary exports are [encode], which drives any [PixelSource], and the
//! convenience wrappers [encode_image] and [encode_to_vec] for raw
//! interleaved RGB or RGBA bytes. [encode_image] performs frequent reads and
//! writes, so it's recommended to use buffered IO implementations such as
//! `std::io::BufReader` and `std::io::BufWriter` for streaming applications.
//!
//! To keep this crate simple, it does not decode other image formats, nor QOI
//! itself. To encode an image, it will first need to be decoded using another
//! method, for example with the `image` crate and this crate's `image`
//! feature.
//!
//! # In-memory encode example
//!
//! ```rust
//! use qoi_encoder::{encode_to_vec, Colorspace, ImageMeta};
//!
//! // A 1x1 representation of an image's pixel data made up of an opaque black pixel.
//! let image_source = vec![0, 0, 0, 255];
//!
//! // Metadata describing the image to be encoded.
//! let image_meta = ImageMeta::new(1, 1, 4).with_colorspace(Colorspace::Srgb);
//!
//! match encode_to_vec(&image_source, &image_meta) {
//!   Ok(encoded) => {
//!     // Header, a single run op, and the end marker.
//!     assert_eq!(encoded.len(), 14 + 1 + 8);
//!   }
//!   Err(e) => {
//!     // See `error.rs` for all possible errors.
//!     panic!("{}", e);
//!   }
//! }
//! ```
//!
//! # Streaming encode example
//!
//! ```rust
//! use std::io::{sink, BufWriter};
//! use qoi_encoder::{encode, ByteSink, ImageMeta, RawPixels};
//!
//! // A 2x2 RGB image.
//! let pixel_data: &[u8] = &[255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
//! let image_meta = ImageMeta::new(2, 2, 3);
//!
//! let source = RawPixels::new(pixel_data, &image_meta).expect("Invalid image metadata");
//!
//! // For example purposes, write encoded bytes into the void.
//! let mut destination = ByteSink::new(BufWriter::new(sink()));
//!
//! match encode(&image_meta, source, &mut destination) {
//!   Ok(summary) => {
//!     assert_eq!(summary.bytes_written, destination.position());
//!     dbg!(summary.ops);
//!   }
//!   Err(e) => {
//!     panic!("{}", e);
//!   }
//! }
//! ```

pub use crate::cache::ColorCache;
pub use crate::encode::{encode, encode_image, encode_to_vec, encoded_size_limit, EncodeSummary, OpCounts};
pub use crate::error::Error;
#[cfg(feature = "image")]
pub use crate::image_source::{encode_buffer, encode_dynamic_image, ImagePixels};
pub use crate::meta::{serialize_header, Colorspace, ImageMeta, QOI_BYTES_END, QOI_BYTES_MAGIC, QOI_HEADER_LEN};
pub use crate::pixel::Pixel;
pub use crate::sink::ByteSink;
pub use crate::source::{PixelSource, RawPixels};

mod cache;
mod encode;
mod error;
#[cfg(feature = "image")]
mod image_source;
mod meta;
mod op;
mod pixel;
mod sink;
mod source;
mod state;
