use chrono::Local;
use std::env;
use std::str::FromStr;

use crate::layout::{CanvasConfig, LayoutError, SizingMode};

#[derive(Debug, Clone)]
pub struct Config {
    pub photo_path: String,
    pub output_path: String,
    pub canvas: CanvasConfig,
    pub seed: Option<u64>,
    pub layout_json_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, LayoutError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source, then validate it
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LayoutError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let canvas = CanvasConfig {
            output_width: parse_or(&lookup, "PHOTOGRID_OUTPUT_WIDTH", 1920)?,
            output_height: parse_or(&lookup, "PHOTOGRID_OUTPUT_HEIGHT", 1080)?,
            min_spacing: parse_or(&lookup, "PHOTOGRID_MIN_SPACING", 10)?,
            max_spacing: parse_or(&lookup, "PHOTOGRID_MAX_SPACING", 50)?,
            sizing: SizingMode::from_crop_flag(parse_flag(&lookup, "PHOTOGRID_CROP")?),
        };
        canvas.validate()?;

        let seed = match lookup("PHOTOGRID_SEED") {
            Some(value) => Some(parse_value("PHOTOGRID_SEED", &value)?),
            None => None,
        };

        Ok(Config {
            photo_path: lookup("PHOTOGRID_PHOTO_PATH").unwrap_or_else(|| "./photos".to_string()),
            output_path: lookup("PHOTOGRID_OUTPUT_PATH").unwrap_or_else(default_output_path),
            canvas,
            seed,
            layout_json_path: lookup("PHOTOGRID_LAYOUT_JSON").filter(|path| !path.is_empty()),
        })
    }
}

fn default_output_path() -> String {
    format!("photogrid_{}.jpg", Local::now().format("%Y%m%d_%H%M%S"))
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, LayoutError> {
    value.trim().parse().map_err(|_| {
        LayoutError::Configuration(format!("{} has invalid value '{}'", key, value))
    })
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, LayoutError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool, LayoutError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|value| value.trim().to_lowercase()) {
        None => Ok(false),
        Some(value) => match value.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(LayoutError::Configuration(format!(
                "{} has invalid value '{}'",
                key, value
            ))),
        },
    }
}
