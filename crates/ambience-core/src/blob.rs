//! Drifting radial-gradient blobs for the page backdrop.
//!
//! The field is a fixed-size set of blobs moving in straight lines. A blob that
//! drifts fully off the viewport is re-rolled in place by [`random_blob`], so
//! the field never grows or shrinks. Rendering goes through the [`Surface`]
//! trait; the web frontend implements it on a Canvas 2D context.

use crate::constants::*;
use glam::Vec2;
use rand::prelude::*;
use std::ops::Range;

/// 8-bit RGB colour.
pub type Rgb = [u8; 3];

#[derive(Clone, Debug)]
pub struct BlobFieldConfig {
    pub count: usize,
    pub radius: Range<f32>,
    /// Maximum absolute velocity per axis.
    pub speed: f32,
    pub opacity: Range<f32>,
    pub palette: Vec<Rgb>,
}

impl Default for BlobFieldConfig {
    fn default() -> Self {
        Self {
            count: BLOB_COUNT,
            radius: BLOB_RADIUS_MIN..BLOB_RADIUS_MAX,
            speed: BLOB_SPEED_MAX,
            opacity: BLOB_OPACITY_MIN..BLOB_OPACITY_MAX,
            palette: BLOB_PALETTE.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    pub position: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    pub color: Rgb,
    pub peak_opacity: f32,
}

impl Blob {
    /// True once the blob's bounding box has completely left the viewport on
    /// either axis, i.e. its centre is past `[-radius, extent + radius]`.
    pub fn is_outside(&self, extent: Vec2) -> bool {
        let r = self.radius;
        self.position.x < -r
            || self.position.x > extent.x + r
            || self.position.y < -r
            || self.position.y > extent.y + r
    }

    pub fn gradient(&self) -> RadialGradient {
        let [r, g, b] = self.color;
        RadialGradient {
            center: self.position,
            radius: self.radius,
            stops: [
                ColorStop {
                    offset: 0.0,
                    rgb: [r, g, b],
                    alpha: self.peak_opacity,
                },
                ColorStop {
                    offset: BLOB_MID_STOP,
                    rgb: [r, g, b],
                    alpha: self.peak_opacity * 0.5,
                },
                ColorStop {
                    offset: 1.0,
                    rgb: [r, g, b],
                    alpha: 0.0,
                },
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub rgb: Rgb,
    pub alpha: f32,
}

/// A circular gradient centred on a blob, filled over its bounding square.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    pub stops: [ColorStop; 3],
}

impl RadialGradient {
    /// Top-left corner and side length of the square the gradient covers.
    pub fn bounds(&self) -> (Vec2, f32) {
        (self.center - Vec2::splat(self.radius), self.radius * 2.0)
    }
}

/// Drawing target for [`BlobField::render`].
pub trait Surface {
    fn clear(&mut self, extent: Vec2);
    fn fill_radial(&mut self, gradient: &RadialGradient);
}

#[inline]
fn sample(rng: &mut (impl Rng + ?Sized), range: &Range<f32>) -> f32 {
    // gen::<f32>() instead of gen_range so an empty range (zero-sized canvas)
    // collapses to its start rather than panicking
    range.start + rng.gen::<f32>() * (range.end - range.start)
}

/// Roll a fresh blob somewhere inside `extent`.
pub fn random_blob<R: Rng + ?Sized>(rng: &mut R, extent: Vec2, config: &BlobFieldConfig) -> Blob {
    let position = Vec2::new(rng.gen::<f32>() * extent.x, rng.gen::<f32>() * extent.y);
    let radius = sample(rng, &config.radius);
    let speed = -config.speed..config.speed;
    let velocity = Vec2::new(sample(rng, &speed), sample(rng, &speed));
    let color = config.palette.choose(rng).copied().unwrap_or([255, 255, 255]);
    let peak_opacity = sample(rng, &config.opacity);
    Blob {
        position,
        radius,
        velocity,
        color,
        peak_opacity,
    }
}

pub struct BlobField<R: Rng = StdRng> {
    config: BlobFieldConfig,
    blobs: Vec<Blob>,
    extent: Vec2,
    rng: R,
}

impl BlobField<StdRng> {
    pub fn with_seed(config: BlobFieldConfig, width: f32, height: f32, seed: u64) -> Self {
        Self::new(config, width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BlobField<R> {
    pub fn new(config: BlobFieldConfig, width: f32, height: f32, mut rng: R) -> Self {
        let extent = Vec2::new(width, height);
        let blobs = (0..config.count)
            .map(|_| random_blob(&mut rng, extent, &config))
            .collect();
        Self {
            config,
            blobs,
            extent,
            rng,
        }
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    pub fn blobs_mut(&mut self) -> &mut [Blob] {
        &mut self.blobs
    }

    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    pub fn config(&self) -> &BlobFieldConfig {
        &self.config
    }

    /// Blobs keep their positions; anything now off-screen is caught by the
    /// next [`tick`](Self::tick).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.extent = Vec2::new(width, height);
    }

    /// Advance every blob one step. Returns how many were reset.
    pub fn tick(&mut self) -> usize {
        let mut resets = 0;
        for blob in &mut self.blobs {
            blob.position += blob.velocity;
            if blob.is_outside(self.extent) {
                *blob = random_blob(&mut self.rng, self.extent, &self.config);
                resets += 1;
            }
        }
        if resets > 0 {
            log::trace!("[blobs] reset {} of {}", resets, self.blobs.len());
        }
        resets
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.extent);
        for blob in &self.blobs {
            surface.fill_radial(&blob.gradient());
        }
    }
}
