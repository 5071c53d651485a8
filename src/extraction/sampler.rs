//! Strided pixel sampling with transparency rejection
//!
//! Walks an RGBA8 buffer at a fixed byte stride and yields the RGB triple of
//! every sampled pixel that is opaque enough to count.

use crate::constants::sampling::{ALPHA_CUTOFF, BYTES_PER_PIXEL};

/// Strided sampler over a row-major RGBA8 byte buffer
#[derive(Debug, Clone, Copy)]
pub struct PixelSampler {
    stride: usize,
    alpha_cutoff: u8,
}

impl PixelSampler {
    /// Create a sampler with the given byte stride and the default alpha cutoff
    ///
    /// A zero stride is bumped to one pixel so iteration always advances;
    /// configuration validation rejects it before this point.
    pub fn new(stride: usize) -> Self {
        Self::with_alpha_cutoff(stride, ALPHA_CUTOFF)
    }

    /// Create a sampler with custom stride and alpha cutoff
    pub fn with_alpha_cutoff(stride: usize, alpha_cutoff: u8) -> Self {
        Self {
            stride: if stride == 0 { BYTES_PER_PIXEL } else { stride },
            alpha_cutoff,
        }
    }

    /// Byte stride between samples
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Iterate the opaque samples of `data`
    ///
    /// Offsets `0, stride, 2*stride, ...` are read while a full four-byte
    /// pixel remains; samples with alpha below the cutoff are skipped.
    /// A buffer shorter than one stride still yields its first pixel.
    pub fn samples<'a>(&self, data: &'a [u8]) -> Samples<'a> {
        Samples {
            data,
            offset: 0,
            stride: self.stride,
            alpha_cutoff: self.alpha_cutoff,
        }
    }
}

/// Iterator returned by [`PixelSampler::samples`]
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    data: &'a [u8],
    offset: usize,
    stride: usize,
    alpha_cutoff: u8,
}

impl Iterator for Samples<'_> {
    type Item = [u8; 3];

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let end = self.offset.checked_add(BYTES_PER_PIXEL)?;
            let px = self.data.get(self.offset..end)?;
            self.offset = self.offset.saturating_add(self.stride);
            if px[3] >= self.alpha_cutoff {
                return Some([px[0], px[1], px[2]]);
            }
        }
    }
}
