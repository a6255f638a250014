pub mod animation;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod layout;
pub mod manifest;
pub mod parse;
pub mod sheet;
pub mod viewer;

pub use animation::{AnimationState, FrameGrid, FrameRect};
pub use config::ViewerConfig;
pub use error::{SpriteError, SpriteResult};
pub use export::{ExportSettings, GifExporter};
pub use input::Command;
pub use manifest::{AnimationDef, AnimationManifest};
pub use parse::{parse_color, parse_size, Rgb, ScreenSize};
pub use sheet::{load_data, Spritesheet};
pub use viewer::{Reaction, Viewer};

pub const SCALE_MIN: u32 = 1;
pub const SCALE_MAX: u32 = 12;

/// Render loop rate in Hz.
pub const TICK_RATE: f64 = 60.0;
/// Longest step fed to the animation clock in one tick.
pub const MAX_TICK_DT: f64 = 0.25;
