use crate::frame::Frame;
use std::sync::mpsc::Sender;

pub mod none;
pub mod v4l;

/// Lifecycle of a video source, in the order events are sent: `Ready` once the
/// first frame is decodable, `Playing` once frames start flowing, then one
/// `Frame` per capture.
#[derive(Debug)]
pub enum SourceEvent {
    Ready { width: u32, height: u32 },
    Playing,
    Frame(Frame),
}

/// A live video source. Runs on its own thread and pushes events into the
/// channel until the receiver hangs up or the stream dies.
pub trait Source {
    fn run(&mut self, events: Sender<SourceEvent>);
}
