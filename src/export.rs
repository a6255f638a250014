use crate::animation::{FPS_MAX, FPS_MIN};
use crate::error::SpriteResult;
use crate::manifest::AnimationDef;
use crate::parse::Rgb;
use crate::sheet::Spritesheet;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{imageops, Delay, Frame, Rgba, RgbaImage};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    pub scale: u32,
    pub fps: u32,
    pub looping: bool,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl ExportSettings {
    pub fn from_def(def: &AnimationDef) -> Self {
        Self {
            scale: 1,
            fps: def.fps.clamp(FPS_MIN, FPS_MAX),
            looping: def.looping,
            flip_x: false,
            flip_y: false,
        }
    }

    pub fn frame_delay(&self) -> Delay {
        Delay::from_numer_denom_ms(1000, self.fps.clamp(FPS_MIN, FPS_MAX))
    }
}

pub struct GifExporter {
    output_dir: PathBuf,
    background: Option<Rgb>,
}

impl GifExporter {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            background: None,
        }
    }

    /// Composites frames onto a solid colour instead of keeping transparency.
    pub fn with_background(mut self, background: Option<Rgb>) -> Self {
        self.background = background;
        self
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        let stem: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let stem = if stem.is_empty() { "animation".into() } else { stem };
        self.output_dir.join(format!("{}.gif", stem))
    }

    pub fn prepare_frames(
        &self,
        sheet: &Spritesheet,
        def: &AnimationDef,
        settings: &ExportSettings,
    ) -> SpriteResult<Vec<RgbaImage>> {
        def.frames
            .par_iter()
            .map(|&index| {
                let mut frame = sheet.frame(index, settings.scale.max(1))?;
                if settings.flip_x {
                    imageops::flip_horizontal_in_place(&mut frame);
                }
                if settings.flip_y {
                    imageops::flip_vertical_in_place(&mut frame);
                }
                if let Some(bg) = self.background {
                    let [r, g, b] = bg.to_array();
                    let mut flat =
                        RgbaImage::from_pixel(frame.width(), frame.height(), Rgba([r, g, b, 255]));
                    imageops::overlay(&mut flat, &frame, 0, 0);
                    frame = flat;
                }
                Ok(frame)
            })
            .collect()
    }

    pub fn encode<W: Write>(
        &self,
        frames: Vec<RgbaImage>,
        settings: &ExportSettings,
        writer: W,
    ) -> SpriteResult<()> {
        let mut encoder = GifEncoder::new(writer);
        // Without the repeat extension a GIF plays once.
        if settings.looping {
            encoder.set_repeat(Repeat::Infinite)?;
        }

        let delay = settings.frame_delay();
        encoder.encode_frames(
            frames
                .into_iter()
                .map(|frame| Frame::from_parts(frame, 0, 0, delay)),
        )?;
        Ok(())
    }

    /// Writes `<name>.gif` into the output directory and returns its path.
    pub fn export(
        &self,
        sheet: &Spritesheet,
        def: &AnimationDef,
        settings: &ExportSettings,
    ) -> SpriteResult<PathBuf> {
        let frames = self.prepare_frames(sheet, def, settings)?;

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(&def.name);
        let mut writer = BufWriter::new(File::create(&path)?);
        self.encode(frames, settings, &mut writer)?;
        writer.flush()?;

        log::info!(
            "Exported '{}' ({} frames @ {} fps) to {}",
            def.name,
            def.frames.len(),
            settings.fps,
            path.display()
        );
        Ok(path)
    }
}
