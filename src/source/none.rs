use crate::color::Rgb;
use crate::frame::Frame;
use crate::source::SourceEvent;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const FRAME_DELAY: Duration = Duration::from_millis(33);
const BACKGROUND: Rgb = Rgb::new(90, 90, 90);
const SQUARE_HALF_SIZE: f64 = 12.0;
const ORBIT_STEP: f64 = 0.02;

/// Synthetic source: a gray field with a target-colored square orbiting the
/// center, so the torch has something to follow without a camera attached.
pub struct Source {
    target: Rgb,
}

impl Source {
    pub fn new(target: Rgb) -> Self {
        Self { target }
    }

    fn frame(&self, tick: u32) -> Frame {
        let angle = tick as f64 * ORBIT_STEP;
        let cx = WIDTH as f64 / 2.0 + angle.cos() * WIDTH as f64 / 4.0;
        let cy = HEIGHT as f64 / 2.0 + angle.sin() * HEIGHT as f64 / 4.0;

        let mut data = Vec::with_capacity((WIDTH * HEIGHT * 3) as usize);
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let inside = (x as f64 - cx).abs() <= SQUARE_HALF_SIZE
                    && (y as f64 - cy).abs() <= SQUARE_HALF_SIZE;
                let px = if inside { self.target } else { BACKGROUND };
                data.extend_from_slice(&[px.r, px.g, px.b]);
            }
        }

        Frame::new(WIDTH, HEIGHT, data)
    }
}

impl super::Source for Source {
    fn run(&mut self, events: Sender<SourceEvent>) {
        let ready = SourceEvent::Ready {
            width: WIDTH,
            height: HEIGHT,
        };
        if events.send(ready).is_err() || events.send(SourceEvent::Playing).is_err() {
            return;
        }

        let mut tick = 0u32;
        loop {
            if events.send(SourceEvent::Frame(self.frame(tick))).is_err() {
                return;
            }
            tick = tick.wrapping_add(1);
            thread::sleep(FRAME_DELAY);
        }
    }
}
