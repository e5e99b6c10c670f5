use super::{Paint, Rgba, Surface};
use crate::frame::Frame;
use std::error::Error;

/// Software RGBA8 surface. All compositing happens on the CPU; `present` is a
/// no-op, which also makes this the surface tests render against.
#[derive(Default)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Source-over blend of `color` onto the pixel at (x, y). The destination
    /// is treated as opaque, which holds for every surface that started from a
    /// video frame blit.
    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let i = ((y * self.width + x) * 4) as usize;
        let a = color.a.clamp(0.0, 1.0);
        let src = [color.r, color.g, color.b];
        for c in 0..3 {
            let d = self.data[i + c] as f64;
            self.data[i + c] = (src[c] as f64 * a + d * (1.0 - a)).round() as u8;
        }
        self.data[i + 3] = 255;
    }
}

impl Surface for Raster {
    fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_frame(&mut self, frame: &Frame) {
        let w = self.width.min(frame.width);
        let h = self.height.min(frame.height);
        for y in 0..h {
            for x in 0..w {
                let src = ((y * frame.width + x) * 3) as usize;
                let dst = ((y * self.width + x) * 4) as usize;
                self.data[dst..dst + 3].copy_from_slice(&frame.data[src..src + 3]);
                self.data[dst + 3] = 255;
            }
        }
    }

    fn read_pixels(&self) -> Vec<u8> {
        self.data.clone()
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let x1 = x.saturating_add(width).min(self.width);
        let y1 = y.saturating_add(height).min(self.height);
        for yy in y..y1 {
            for xx in x..x1 {
                self.blend(xx, yy, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: Paint) {
        if radius <= 0.0 {
            return;
        }

        // Scan only the bounding box, testing each pixel against the circle.
        let x0 = (cx - radius).floor().max(0.0) as u32;
        let y0 = (cy - radius).floor().max(0.0) as u32;
        let x1 = ((cx + radius).ceil().max(0.0) as u32).saturating_add(1).min(self.width);
        let y1 = ((cy + radius).ceil().max(0.0) as u32).saturating_add(1).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                match &paint {
                    Paint::Solid(color) => self.blend(x, y, *color),
                    Paint::Radial(gradient) => {
                        let gdx = x as f64 - gradient.cx;
                        let gdy = y as f64 - gradient.cy;
                        let d = (gdx * gdx + gdy * gdy).sqrt();
                        self.blend(x, y, gradient.sample(d));
                    }
                }
            }
        }
    }

    fn present(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn is_open(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::RadialGradient;
    use super::*;

    fn white(width: u32, height: u32) -> Raster {
        let mut raster = Raster::new(width, height);
        let frame = Frame::new(width, height, vec![255; (width * height * 3) as usize]);
        raster.draw_frame(&frame);
        raster
    }

    fn pixel(raster: &Raster, x: u32, y: u32) -> [u8; 4] {
        let (width, _) = raster.size();
        let i = ((y * width + x) * 4) as usize;
        raster.data()[i..i + 4].try_into().unwrap()
    }

    #[test]
    fn test_draw_frame_copies_rgb_and_sets_opaque_alpha() {
        let mut raster = Raster::new(2, 2);
        let frame = Frame::new(2, 2, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);

        raster.draw_frame(&frame);

        assert_eq!([1, 2, 3, 255], pixel(&raster, 0, 0));
        assert_eq!([10, 11, 12, 255], pixel(&raster, 1, 1));
    }

    #[test]
    fn test_fill_rect_blends_with_source_over() {
        let mut raster = white(2, 2);

        raster.fill_rect(0, 0, 2, 2, Rgba::new(0, 0, 0, 0.8));

        // 255 * (1 - 0.8) = 51
        assert_eq!([51, 51, 51, 255], pixel(&raster, 0, 0));
        assert_eq!([51, 51, 51, 255], pixel(&raster, 1, 1));
    }

    #[test]
    fn test_fill_rect_clamps_to_surface_bounds() {
        let mut raster = white(2, 2);

        raster.fill_rect(1, 1, 100, 100, Rgba::new(0, 0, 0, 1.0));

        assert_eq!([255, 255, 255, 255], pixel(&raster, 0, 0));
        assert_eq!([0, 0, 0, 255], pixel(&raster, 1, 1));
    }

    #[test]
    fn test_fill_circle_leaves_pixels_outside_radius_untouched() {
        let mut raster = white(20, 20);

        raster.fill_circle(10.0, 10.0, 3.0, Paint::Solid(Rgba::new(0, 0, 0, 1.0)));

        assert_eq!([0, 0, 0, 255], pixel(&raster, 10, 10));
        assert_eq!([255, 255, 255, 255], pixel(&raster, 0, 0));
        assert_eq!([255, 255, 255, 255], pixel(&raster, 10, 14));
    }

    #[test]
    fn test_fill_circle_with_gradient_keeps_center_and_darkens_edge() {
        let mut raster = white(100, 100);
        let gradient = RadialGradient {
            cx: 50.0,
            cy: 50.0,
            inner_radius: 10.0,
            inner: Rgba::TRANSPARENT,
            outer_radius: 20.0,
            outer: Rgba::new(0, 0, 0, 0.8),
        };

        raster.fill_circle(50.0, 50.0, 40.0, Paint::Radial(gradient));

        // Inside the inner stop: fully transparent, pixel unchanged.
        assert_eq!([255, 255, 255, 255], pixel(&raster, 50, 50));
        // Beyond the outer stop but inside the circle: fully darkened.
        assert_eq!([51, 51, 51, 255], pixel(&raster, 50, 80));
        // Outside the circle: untouched.
        assert_eq!([255, 255, 255, 255], pixel(&raster, 50, 95));
    }

    #[test]
    fn test_resize_clears_contents() {
        let mut raster = white(2, 2);

        raster.resize(3, 3);

        assert_eq!((3, 3), raster.size());
        assert_eq!([0, 0, 0, 0], pixel(&raster, 0, 0));
    }
}
