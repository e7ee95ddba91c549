use clap::Parser;

use crate::config::Config;
use crate::layout::{LayoutError, SizingMode};

/// Command line arguments. Anything given here overrides the `PHOTOGRID_*`
/// environment variables.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(
    name = "photogrid",
    version,
    about = "Arrange a folder of photos into a justified grid collage"
)]
pub struct Args {
    #[arg(help = "Directory containing the JPEG photos", value_name = "PHOTO_DIR")]
    pub photo_dir: Option<String>,

    #[arg(help = "Collage file to write, format follows the extension", value_name = "OUTPUT_FILE")]
    pub output_file: Option<String>,

    #[arg(help = "Canvas width in pixels", long)]
    pub width: Option<u32>,

    #[arg(help = "Canvas height in pixels", long)]
    pub height: Option<u32>,

    #[arg(help = "Smallest gap between photos in pixels", long)]
    pub min_spacing: Option<u32>,

    #[arg(help = "Largest horizontal gap between photos in pixels", long)]
    pub max_spacing: Option<u32>,

    #[arg(help = "Give every photo the canvas aspect ratio and center-crop it", long, default_value_t = false)]
    pub crop: bool,

    #[arg(help = "Seed for a reproducible photo order", long)]
    pub seed: Option<u64>,

    #[arg(help = "Also write the computed placements as JSON to this file", long, value_name = "FILE")]
    pub layout_json: Option<String>,
}

impl Args {
    /// Merge the arguments into `config` and re-check the canvas
    pub fn apply(self, config: &mut Config) -> Result<(), LayoutError> {
        if let Some(photo_dir) = self.photo_dir {
            config.photo_path = photo_dir;
        }
        if let Some(output_file) = self.output_file {
            config.output_path = output_file;
        }
        if let Some(width) = self.width {
            config.canvas.output_width = width;
        }
        if let Some(height) = self.height {
            config.canvas.output_height = height;
        }
        if let Some(min_spacing) = self.min_spacing {
            config.canvas.min_spacing = min_spacing;
        }
        if let Some(max_spacing) = self.max_spacing {
            config.canvas.max_spacing = max_spacing;
        }
        if self.crop {
            config.canvas.sizing = SizingMode::UniformCrop;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.layout_json.is_some() {
            config.layout_json_path = self.layout_json;
        }

        config.canvas.validate()
    }
}
