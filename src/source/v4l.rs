use crate::frame::Frame;
use crate::source::SourceEvent;
use itertools::Itertools;
use std::error::Error;
use std::sync::mpsc::Sender;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, FourCC};

pub struct Source {
    device: Device,
    width: u32,
    height: u32,
}

impl Source {
    /// Open the capture device and negotiate an uncompressed RGB format at the
    /// smallest discrete frame size the driver offers. Fails when the device
    /// is missing or access is denied; the caller is expected to give up, not
    /// retry.
    pub fn new(video: usize) -> Result<Self, Box<dyn Error>> {
        let device = Device::new(video)?;

        let mut format = device.format()?;
        format.fourcc = FourCC::new(b"RGB3");

        let (width, height) = device
            .enum_framesizes(format.fourcc)?
            .into_iter()
            .flat_map(|f| {
                f.size
                    .to_discrete()
                    .into_iter()
                    .map(|d| (d.width, d.height))
                    .collect_vec()
            })
            .min_by(|&(w1, h1), &(w2, h2)| h1.cmp(&h2).then(w1.cmp(&w2)))
            .ok_or("Unable to find a discrete frame size")?;

        format.width = width;
        format.height = height;
        let format = device.set_format(&format)?;

        if format.fourcc != FourCC::new(b"RGB3") {
            return Err(format!("Device refused RGB frames, offered {}", format.fourcc).into());
        }

        Ok(Self {
            device,
            width: format.width,
            height: format.height,
        })
    }
}

impl super::Source for Source {
    fn run(&mut self, events: Sender<SourceEvent>) {
        let mut stream = match Stream::new(&self.device, Type::VideoCapture) {
            Ok(stream) => stream,
            Err(err) => {
                log::error!("Unable to start capture stream: {}", err);
                return;
            }
        };

        let frame_len = (self.width * self.height * 3) as usize;
        let mut announced = false;

        loop {
            let (buf, _) = match stream.next() {
                Ok(captured) => captured,
                Err(err) => {
                    log::error!("Capture stream died: {}", err);
                    return;
                }
            };

            if buf.len() < frame_len {
                log::warn!("Short frame ({} of {} bytes), skipping", buf.len(), frame_len);
                continue;
            }

            if !announced {
                // First decodable frame: report native dimensions, then start
                // playback. Both happen exactly once per session.
                let ready = SourceEvent::Ready {
                    width: self.width,
                    height: self.height,
                };
                if events.send(ready).is_err() || events.send(SourceEvent::Playing).is_err() {
                    return;
                }
                announced = true;
            }

            let frame = Frame::new(self.width, self.height, buf[..frame_len].to_vec());
            if events.send(SourceEvent::Frame(frame)).is_err() {
                // Renderer hung up, nothing left to capture for.
                return;
            }
        }
    }
}
