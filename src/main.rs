use std::sync::mpsc;

mod color;
mod config;
mod frame;
mod source;
mod surface;
mod torch;

use source::Source;

fn main() {
    let panic_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        panic_hook(panic_info);
        std::process::exit(1);
    }));

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match config::Config::load() {
        Ok(config) => config,
        Err(err) => panic!("Unable to load config: {}", err),
    };

    log::debug!("Using {:#?}", config);

    let (events_tx, events_rx) = mpsc::channel();
    let torch_config = config.torch;

    spawn("source".to_string(), move || {
        let mut source: Box<dyn Source> = match config.source {
            config::Source::V4l { video } => match source::v4l::Source::new(video) {
                Ok(source) => Box::new(source),
                Err(err) => {
                    // Acquisition failure: report it and never start rendering.
                    log::error!("Unable to acquire video source: {}", err);
                    return;
                }
            },
            config::Source::None => {
                Box::new(source::none::Source::new(torch_config.target.into()))
            }
        };
        source.run(events_tx);
    });

    let surface = surface::window::Window::new("torchcam");
    let mut renderer = torch::Renderer::new(surface, events_rx, config.torch);
    if let Err(err) = renderer.run() {
        log::error!("Render loop failed: {}", err);
    }
}

fn spawn<F, T>(thread_name: String, handler: F)
where
    F: FnOnce() -> T,
    F: Send + 'static,
    T: Send + 'static,
{
    std::thread::Builder::new()
        .name(thread_name.clone())
        .spawn(handler)
        .unwrap_or_else(|_| panic!("Unable to start thread: {}", thread_name));
}
