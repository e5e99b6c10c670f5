use crate::color::{self, Rgb};
use crate::surface::{RadialGradient, Rgba};
use rand::Rng;

pub mod renderer;

pub use renderer::Renderer;

/// Flat overlay color and outer gradient stop: mostly-opaque black.
pub const DARK: Rgba = Rgba::new(0, 0, 0, 0.8);

/// Fraction of the base radius the per-frame jitter can eat into.
const FLICKER: f64 = 0.2;
/// Gradient stop radii relative to the effective radius.
const INNER_STOP: f64 = 0.2;
const OUTER_STOP: f64 = 0.5;

/// Torch light geometry. Built once when the surface dimensions become known;
/// the base radius stays fixed for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torch {
    base_radius: f64,
}

impl Torch {
    /// The base radius is the surface diagonal, so the lit circle can cover
    /// the whole frame regardless of where the centroid lands.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            base_radius: (width as f64).hypot(height as f64),
        }
    }

    pub fn base_radius(&self) -> f64 {
        self.base_radius
    }

    /// Radius for this frame: the base shrunk by a uniform draw from
    /// [0, base * FLICKER), which makes the torch flicker in size.
    pub fn effective_radius<R: Rng>(&self, rng: &mut R) -> f64 {
        self.base_radius - rng.random::<f64>() * self.base_radius * FLICKER
    }
}

/// The torch paint for one frame: a transparent window at the centroid
/// falling off to the opaque dark overlay.
pub fn gradient(cx: f64, cy: f64, radius: f64) -> RadialGradient {
    RadialGradient {
        cx,
        cy,
        inner_radius: radius * INNER_STOP,
        inner: Rgba::TRANSPARENT,
        outer_radius: radius * OUTER_STOP,
        outer: DARK,
    }
}

/// Coordinates of every pixel in an RGBA8 buffer whose color is strictly
/// within `threshold` of `target`.
pub fn find_matches(pixels: &[u8], width: u32, target: Rgb, threshold: u32) -> Vec<(u32, u32)> {
    pixels
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, px)| {
            color::square_distance(Rgb::new(px[0], px[1], px[2]), target) < threshold
        })
        .map(|(i, _)| (i as u32 % width, i as u32 / width))
        .collect()
}

/// Unweighted mean of the matched coordinates; every pixel contributes
/// equally.
pub fn centroid(matches: &[(u32, u32)]) -> Option<(f64, f64)> {
    if matches.is_empty() {
        return None;
    }

    let n = matches.len() as f64;
    let (sx, sy) = matches
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x as f64, sy + y as f64));
    Some((sx / n, sy / n))
}
