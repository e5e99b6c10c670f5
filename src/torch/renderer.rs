use super::{centroid, find_matches, gradient, Torch, DARK};
use crate::color::Rgb;
use crate::config;
use crate::frame::Frame;
use crate::source::SourceEvent;
use crate::surface::{Paint, Surface};
use rand::rngs::ThreadRng;
use std::error::Error;
use std::sync::mpsc::Receiver;

#[derive(Clone, Copy)]
enum State {
    /// No surface dimensions yet; waiting for the source to report ready.
    Uninitialized,
    /// Surface sized and light radius fixed; waiting for playback.
    Armed(Torch),
    /// Rendering once per display refresh until the surface is torn down.
    Running(Torch),
}

pub struct Renderer<S> {
    surface: S,
    events: Receiver<SourceEvent>,
    target: Rgb,
    threshold: u32,
    state: State,
    rng: ThreadRng,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S, events: Receiver<SourceEvent>, config: config::Torch) -> Self {
        Self {
            surface,
            events,
            target: config.target.into(),
            threshold: config.threshold,
            state: State::Uninitialized,
            rng: rand::rng(),
        }
    }

    /// Drive the state machine until the surface is torn down or the source
    /// hangs up.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        while self.surface.is_open() {
            let event = match self.events.recv() {
                Ok(event) => event,
                Err(_) => break,
            };
            self.handle(event)?;
        }
        Ok(())
    }

    fn handle(&mut self, event: SourceEvent) -> Result<(), Box<dyn Error>> {
        match (self.state, event) {
            (State::Uninitialized, SourceEvent::Ready { width, height }) => {
                self.surface.resize(width, height);
                let torch = Torch::new(width, height);
                log::debug!(
                    "Source ready: {}x{}, torch radius {:.1}",
                    width,
                    height,
                    torch.base_radius()
                );
                self.state = State::Armed(torch);
            }
            (State::Armed(torch), SourceEvent::Playing) => {
                log::info!("Playback started");
                self.state = State::Running(torch);
            }
            (State::Running(torch), SourceEvent::Frame(frame)) => {
                let frame = self.latest_frame(frame);
                self.render(&frame, torch)?;
            }
            (_, SourceEvent::Ready { .. }) => {
                // The radius is fixed once set.
                log::debug!("Ignoring ready event, surface already sized");
            }
            (_, SourceEvent::Playing) => log::debug!("Ignoring playing event, not armed"),
            (_, SourceEvent::Frame(_)) => log::trace!("Dropping frame, playback not started"),
        }
        Ok(())
    }

    /// Drop any backlog and keep only the newest queued frame, like a canvas
    /// drawing whatever the video element currently shows.
    fn latest_frame(&mut self, frame: Frame) -> Frame {
        self.events
            .try_iter()
            .filter_map(|event| match event {
                SourceEvent::Frame(frame) => Some(frame),
                _ => None,
            })
            .last()
            .unwrap_or(frame)
    }

    fn render(&mut self, frame: &Frame, torch: Torch) -> Result<(), Box<dyn Error>> {
        self.surface.draw_frame(frame);

        let (width, height) = self.surface.size();
        let pixels = self.surface.read_pixels();
        let matches = find_matches(&pixels, width, self.target, self.threshold);

        match centroid(&matches) {
            Some((cx, cy)) => {
                let radius = torch.effective_radius(&mut self.rng);
                let paint = Paint::Radial(gradient(cx, cy, radius));
                self.surface.fill_circle(cx, cy, radius, paint);
            }
            None => {
                // Nothing tracked: the whole frame goes dark.
                self.surface.fill_rect(0, 0, width, height, DARK);
            }
        }

        self.surface.present()
    }
}
