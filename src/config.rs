use crate::parse::{Rgb, ScreenSize};
use crate::{SCALE_MAX, SCALE_MIN};
use std::path::PathBuf;

pub const DEFAULT_SCALE: u32 = 6;

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub spritesheet: PathBuf,
    pub scale: u32,
    pub background: Rgb,
    /// Fixed window size. `None` sizes the window from the frame and scale.
    pub screen_size: Option<ScreenSize>,
    /// Overrides the manifest's border width.
    pub border: Option<u32>,
    pub export_dir: PathBuf,
}

impl ViewerConfig {
    pub fn new(spritesheet: impl Into<PathBuf>) -> Self {
        Self {
            spritesheet: spritesheet.into(),
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(SCALE_MIN, SCALE_MAX);
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn with_screen_size(mut self, size: Option<ScreenSize>) -> Self {
        self.screen_size = size;
        self
    }

    pub fn with_border(mut self, border: Option<u32>) -> Self {
        self.border = border;
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            spritesheet: PathBuf::from("spritesheet"),
            scale: DEFAULT_SCALE,
            background: Rgb::default(),
            screen_size: None,
            border: None,
            export_dir: PathBuf::from("."),
        }
    }
}
