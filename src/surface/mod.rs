use crate::frame::Frame;
use std::error::Error;

#[cfg(test)]
use mockall::automock;

pub mod raster;
pub mod window;

/// A color with an alpha component, as used for compositing on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Two-stop radial gradient paint: `inner` up to `inner_radius`, `outer` from
/// `outer_radius` outwards, linear in between.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub cx: f64,
    pub cy: f64,
    pub inner_radius: f64,
    pub inner: Rgba,
    pub outer_radius: f64,
    pub outer: Rgba,
}

impl RadialGradient {
    /// Color at distance `d` from the gradient center.
    pub fn sample(&self, d: f64) -> Rgba {
        let span = self.outer_radius - self.inner_radius;
        let t = if span <= 0.0 {
            if d < self.inner_radius {
                0.0
            } else {
                1.0
            }
        } else {
            ((d - self.inner_radius) / span).clamp(0.0, 1.0)
        };

        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: lerp(self.inner.r, self.outer.r),
            g: lerp(self.inner.g, self.outer.g),
            b: lerp(self.inner.b, self.outer.b),
            a: self.inner.a + (self.outer.a - self.inner.a) * t,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Radial(RadialGradient),
}

/// A drawable pixel surface. `read_pixels` returns an owned copy of the full
/// RGBA8 buffer, row-major; `present` pushes the composited image to whatever
/// display backs the surface and paces the caller to the display refresh.
#[cfg_attr(test, automock)]
pub trait Surface {
    fn resize(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);

    /// Blit a frame at the origin, covering the full surface extent.
    fn draw_frame(&mut self, frame: &Frame);
    fn read_pixels(&self) -> Vec<u8>;

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: Paint);

    fn present(&mut self) -> Result<(), Box<dyn Error>>;

    /// False once the surface has been torn down; the render loop checks this
    /// every iteration and stops.
    fn is_open(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_sample_is_transparent_inside_inner_stop() {
        let g = RadialGradient {
            cx: 0.0,
            cy: 0.0,
            inner_radius: 10.0,
            inner: Rgba::TRANSPARENT,
            outer_radius: 20.0,
            outer: Rgba::new(0, 0, 0, 0.8),
        };

        assert_eq!(0.0, g.sample(0.0).a);
        assert_eq!(0.0, g.sample(10.0).a);
    }

    #[test]
    fn test_gradient_sample_is_opaque_from_outer_stop_outwards() {
        let g = RadialGradient {
            cx: 0.0,
            cy: 0.0,
            inner_radius: 10.0,
            inner: Rgba::TRANSPARENT,
            outer_radius: 20.0,
            outer: Rgba::new(0, 0, 0, 0.8),
        };

        assert_eq!(0.8, g.sample(20.0).a);
        assert_eq!(0.8, g.sample(1000.0).a);
    }

    #[test]
    fn test_gradient_sample_interpolates_between_stops() {
        let g = RadialGradient {
            cx: 0.0,
            cy: 0.0,
            inner_radius: 10.0,
            inner: Rgba::TRANSPARENT,
            outer_radius: 20.0,
            outer: Rgba::new(0, 0, 0, 0.8),
        };

        let mid = g.sample(15.0);
        assert!((mid.a - 0.4).abs() < 1e-9);
    }
}
