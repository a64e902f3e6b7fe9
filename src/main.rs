mod cli;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;

use skincrab::{texture::FaceTexture, Editor, EditorConfig};

use crate::cli::{CliArgs, Command};

fn init_logging(config: &EditorConfig) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    builder.parse_default_env();
    if !config.log_level.is_empty() {
        builder.parse_filters(&config.log_level);
    }
    builder.init();
}

fn read_skin(editor: &mut Editor, path: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    editor
        .import_skin(&bytes)
        .with_context(|| format!("importing {}", path.display()))
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn output_path(output: Option<PathBuf>, default_name: &str) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from(default_name))
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = EditorConfig::load_or_default(args.config.as_deref())
        .context("loading config")?;
    args.apply_overrides(&mut config);
    init_logging(&config);
    config.validate().context("checking config")?;

    if let Command::New {
        color: Some(color), ..
    } = args.command
    {
        config.default_color = color;
    }

    let mut editor = Editor::new(config.clone());

    match args.command {
        Command::New { output, .. } => {
            let path = output_path(output, &config.skin_file_name);
            write_file(&path, &editor.export_skin()?)?;
        }

        Command::Paint {
            input,
            output,
            color,
            pixels,
        } => {
            read_skin(&mut editor, &input)?;
            editor.pick_color(color);
            for pixel in pixels {
                editor
                    .paint_pixel(pixel.face, pixel.x, pixel.y)
                    .with_context(|| format!("painting {}:{}:{}", pixel.face, pixel.x, pixel.y))?;
            }
            let path = output_path(output, &config.skin_file_name);
            write_file(&path, &editor.export_skin()?)?;
        }

        Command::Model { input, output, .. } => {
            read_skin(&mut editor, &input)?;
            let path = output_path(output, &config.model_file_name);
            write_file(&path, &editor.export_model()?)?;
        }

        Command::Preview {
            input,
            face,
            output,
            ..
        } => {
            read_skin(&mut editor, &input)?;
            let texture = FaceTexture::from_grid(editor.skin().face(face));
            texture
                .upscale(config.preview_scale)?
                .save(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            info!("wrote {} preview to {}", face, output.display());
        }

        Command::Palette => {
            for color in editor.palette() {
                println!("{}", color);
            }
        }
    }

    Ok(())
}
