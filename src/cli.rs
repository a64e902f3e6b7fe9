use std::{path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand};

use skincrab::{Color, EditorConfig, Face, ModelTexturing, SkinError};

#[derive(Parser, Debug)]
#[command(name = "skincrab", about = "Edit and convert Minecraft head skins")]
pub struct CliArgs {
    /// Path to a RON config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a blank skin.
    New {
        /// Output PNG, defaults to the configured skin file name.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Color to fill every face with.
        #[arg(long)]
        color: Option<Color>,
    },

    /// Paint pixels of an existing skin.
    Paint {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        color: Color,

        /// Pixel to paint as `face:x:y`, may be repeated.
        #[arg(long = "pixel", required = true)]
        pixels: Vec<PixelArg>,
    },

    /// Export a skin's head as a binary glTF model.
    Model {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Put the front face's texture on every face.
        #[arg(long)]
        front_only: bool,
    },

    /// Write one face of a skin as an enlarged PNG.
    Preview {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long)]
        face: Face,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        scale: Option<u32>,
    },

    /// List the preset palette.
    Palette,
}

/// A `face:x:y` pixel address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelArg {
    pub face: Face,
    pub x: i32,
    pub y: i32,
}

impl FromStr for PixelArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if let [face, x, y] = parts[..] {
            let face = face.parse().map_err(|error: SkinError| error.to_string())?;
            let x = x.parse().map_err(|_| format!("invalid x coordinate `{}`", x))?;
            let y = y.parse().map_err(|_| format!("invalid y coordinate `{}`", y))?;
            Ok(Self { face, x, y })
        } else {
            Err(format!("expected `face:x:y`, got `{}`", s))
        }
    }
}

impl CliArgs {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_overrides(&self, config: &mut EditorConfig) {
        if let Some(ref level) = self.log_level {
            config.log_level = level.clone();
        }
        match &self.command {
            Command::Model {
                front_only: true, ..
            } => config.model_texturing = ModelTexturing::FrontOnly,
            Command::Preview {
                scale: Some(scale), ..
            } => config.preview_scale = *scale,
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pixel_addresses() {
        assert_eq!(
            "front:0:7".parse::<PixelArg>(),
            Ok(PixelArg {
                face: Face::Front,
                x: 0,
                y: 7
            })
        );
        assert!("front:0".parse::<PixelArg>().is_err());
        assert!("nose:0:0".parse::<PixelArg>().is_err());
        assert!("top:a:0".parse::<PixelArg>().is_err());
    }

    #[test]
    fn overrides_apply_to_config() {
        let args = CliArgs::parse_from([
            "skincrab",
            "--log-level",
            "debug",
            "model",
            "-i",
            "skin.png",
            "--front-only",
        ]);
        let mut config = EditorConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.model_texturing, ModelTexturing::FrontOnly);
    }

    #[test]
    fn paint_collects_pixels() {
        let args = CliArgs::parse_from([
            "skincrab", "paint", "-i", "in.png", "--color", "#ff0000", "--pixel", "top:1:2",
            "--pixel", "back:7:7",
        ]);
        match args.command {
            Command::Paint { color, pixels, .. } => {
                assert_eq!(color, Color::rgb(255, 0, 0));
                assert_eq!(pixels.len(), 2);
                assert_eq!(pixels[1].face, Face::Back);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
