use crate::animation::{extract_frame, FrameGrid};
use crate::error::{SpriteError, SpriteResult};
use crate::manifest::{AnimationDef, AnimationManifest};
use image::RgbaImage;
use std::path::{Path, PathBuf};

pub struct Spritesheet {
    image: RgbaImage,
    grid: FrameGrid,
}

impl Spritesheet {
    pub fn new(image: RgbaImage, frame_width: u32, frame_height: u32, border: u32) -> Self {
        let grid = FrameGrid::new(
            frame_width,
            frame_height,
            border,
            image.width(),
            image.height(),
        );
        Self { image, grid }
    }

    pub fn open<P: AsRef<Path>>(
        path: P,
        manifest: &AnimationManifest,
        border: u32,
    ) -> SpriteResult<Self> {
        let image = image::open(path)?.to_rgba8();
        Ok(Self::new(
            image,
            manifest.frame_width,
            manifest.frame_height,
            border,
        ))
    }

    pub fn grid(&self) -> &FrameGrid {
        &self.grid
    }

    pub fn frame(&self, index: u32, scale: u32) -> SpriteResult<RgbaImage> {
        extract_frame(&self.image, &self.grid, index, scale)
    }

    pub fn frames(&self, def: &AnimationDef, scale: u32) -> SpriteResult<Vec<RgbaImage>> {
        def.frames
            .iter()
            .map(|&index| self.frame(index, scale))
            .collect()
    }

    /// Checks every frame index of every animation against the grid.
    pub fn check(&self, manifest: &AnimationManifest) -> SpriteResult<()> {
        self.grid.check_geometry()?;
        for def in &manifest.animations {
            for &index in &def.frames {
                self.grid.frame_rect(index)?;
            }
        }
        Ok(())
    }
}

/// `<base>.json` and `<base>.png`. A trailing `.json` or `.png` on `base`
/// is ignored.
pub fn data_paths<P: AsRef<Path>>(base: P) -> (PathBuf, PathBuf) {
    let base = base.as_ref();
    let stem = match base.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("png") => {
            base.with_extension("")
        }
        _ => base.to_path_buf(),
    };

    let mut json = stem.clone().into_os_string();
    json.push(".json");
    let mut png = stem.into_os_string();
    png.push(".png");

    (PathBuf::from(json), PathBuf::from(png))
}

/// Loads the manifest and its sheet. `border` overrides the manifest's.
pub fn load_data<P: AsRef<Path>>(
    base: P,
    border: Option<u32>,
) -> SpriteResult<(AnimationManifest, Spritesheet)> {
    let (json_path, image_path) = data_paths(base);

    if !json_path.exists() || !image_path.exists() {
        return Err(SpriteError::MissingFile {
            json: json_path,
            image: image_path,
        });
    }

    let manifest = AnimationManifest::load(&json_path)?;
    let border = border.unwrap_or_else(|| manifest.border_or_default());
    let sheet = Spritesheet::open(&image_path, &manifest, border)?;
    sheet.check(&manifest)?;

    log::info!(
        "Loaded {} ({}x{}, {} columns x {} rows, {} animations)",
        image_path.display(),
        sheet.image.width(),
        sheet.image.height(),
        sheet.grid.columns(),
        sheet.grid.rows(),
        manifest.len()
    );

    Ok((manifest, sheet))
}
