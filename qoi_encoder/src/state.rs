use crate::cache::ColorCache;
use crate::pixel::Pixel;

// Per-image encoder state. Created when encoding starts, updated once per
// pixel and dropped after the end marker is written.
pub struct State {
  // Recently seen pixels, indexed by their hash.
  pub cache: ColorCache,
  // The previously encoded pixel.
  pub prev_pixel: Pixel,
  // Length of the pending run (Op::Run), if any. Never exceeds QOI_MAX_RUN.
  pub run_count: u8,
}

impl State {
  pub fn new() -> Self {
    Self {
      cache: ColorCache::new(),
      prev_pixel: Pixel::default(),
      run_count: 0,
    }
  }

  // Takes the pending run, leaving none behind.
  pub fn take_run(&mut self) -> Option<u8> {
    match self.run_count {
      0 => None,
      run_count => {
        self.run_count = 0;
        Some(run_count)
      }
    }
  }
}
