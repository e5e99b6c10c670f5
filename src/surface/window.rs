use super::raster::Raster;
use super::{Paint, Rgba, Surface};
use crate::frame::Frame;
use std::error::Error;

const TARGET_FPS: usize = 60;

/// Raster surface presented through a minifb window. The window is created
/// lazily on `resize`, once the source has reported its native dimensions;
/// minifb then paces `present` to roughly the display refresh.
pub struct Window {
    title: String,
    raster: Raster,
    window: Option<minifb::Window>,
    buffer: Vec<u32>,
    failed: bool,
}

impl Window {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            raster: Raster::default(),
            window: None,
            buffer: Vec::new(),
            failed: false,
        }
    }
}

impl Surface for Window {
    fn resize(&mut self, width: u32, height: u32) {
        self.raster.resize(width, height);
        self.buffer = vec![0; (width * height) as usize];

        match minifb::Window::new(
            &self.title,
            width as usize,
            height as usize,
            minifb::WindowOptions::default(),
        ) {
            Ok(mut window) => {
                window.set_target_fps(TARGET_FPS);
                self.window = Some(window);
            }
            Err(err) => {
                log::error!("Unable to open window: {}", err);
                self.failed = true;
            }
        }
    }

    fn size(&self) -> (u32, u32) {
        self.raster.size()
    }

    fn draw_frame(&mut self, frame: &Frame) {
        self.raster.draw_frame(frame);
    }

    fn read_pixels(&self) -> Vec<u8> {
        self.raster.read_pixels()
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        self.raster.fill_rect(x, y, width, height, color);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: Paint) {
        self.raster.fill_circle(cx, cy, radius, paint);
    }

    fn present(&mut self) -> Result<(), Box<dyn Error>> {
        let window = match self.window.as_mut() {
            Some(window) => window,
            None => return Ok(()),
        };

        // minifb wants 0RGB u32 pixels.
        for (dst, px) in self.buffer.iter_mut().zip(self.raster.data().chunks_exact(4)) {
            *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
        }

        let (width, height) = self.raster.size();
        window
            .update_with_buffer(&self.buffer, width as usize, height as usize)
            .map_err(|err| format!("Unable to present frame: {}", err))?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        if self.failed {
            return false;
        }
        self.window
            .as_ref()
            .map_or(true, |w| w.is_open() && !w.is_key_down(minifb::Key::Escape))
    }
}
