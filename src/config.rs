use serde::Deserialize;
use std::error::Error;
use std::fs;

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    V4l { video: usize },
    None,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct Torch {
    pub target: [u8; 3],
    pub threshold: u32,
}

impl Default for Torch {
    fn default() -> Self {
        Self {
            target: [30, 140, 50],
            threshold: 10,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub source: Source,
    #[serde(default)]
    pub torch: Torch,
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config = xdg::BaseDirectories::with_prefix("torchcam")?
            .find_config_file("config.toml")
            .and_then(|path| fs::read_to_string(path).ok())
            .unwrap_or_else(|| include_str!("../config.toml").to_string());

        Ok(toml::from_str(&config)?)
    }
}
