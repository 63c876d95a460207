use crate::pixel::Pixel;

pub const QOI_CACHE_LEN: usize = 64;

/// A direct-mapped table of recently seen pixels, indexed by
/// [`Pixel::qoi_hash`]. Colliding pixels replace each other.
#[derive(Clone, Debug)]
pub struct ColorCache {
  slots: [Pixel; QOI_CACHE_LEN],
}

impl Default for ColorCache {
  fn default() -> Self {
    Self::new()
  }
}

impl ColorCache {
  /// Creates a cache with every slot holding [`Pixel::ZERO`].
  pub fn new() -> Self {
    Self { slots: [Pixel::ZERO; QOI_CACHE_LEN] }
  }

  /// Returns the pixel last stored at `index`, or [`Pixel::ZERO`] if the slot
  /// was never written.
  pub fn probe(&self, index: u8) -> Pixel {
    self.slots[index as usize % QOI_CACHE_LEN]
  }

  /// Stores `pixel` at `index`, overwriting whatever was there.
  pub fn store(&mut self, index: u8, pixel: Pixel) {
    self.slots[index as usize % QOI_CACHE_LEN] = pixel;
  }

  // Returns the pixel's index if the slot at its hash holds exactly this
  // pixel. Otherwise the pixel replaces the slot's occupant and `None` is
  // returned. A hit leaves the cache untouched.
  pub fn match_or_store(&mut self, pixel: Pixel) -> Option<u8> {
    let index = pixel.qoi_hash();

    if self.probe(index) == pixel {
      return Some(index);
    }

    self.store(index, pixel);

    None
  }
}
