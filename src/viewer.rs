use crate::animation::AnimationState;
use crate::config::ViewerConfig;
use crate::error::SpriteResult;
use crate::export::{ExportSettings, GifExporter};
use crate::input::Command;
use crate::layout::compute_screen_size;
use crate::manifest::{AnimationDef, AnimationManifest};
use crate::parse::ScreenSize;
use crate::sheet::Spritesheet;
use crate::{MAX_TICK_DT, SCALE_MAX, SCALE_MIN};
use image::RgbaImage;
use std::path::PathBuf;

/// What the front end has to do after a command was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    None,
    /// The prepared frames were rebuilt and must be re-uploaded.
    FramesChanged,
    /// Frames were rebuilt and the window should take the new size.
    Resized(ScreenSize),
    Exported(PathBuf),
}

pub struct Viewer {
    manifest: AnimationManifest,
    sheet: Spritesheet,
    exporter: GifExporter,
    current: usize,
    scale: u32,
    flip_x: bool,
    flip_y: bool,
    paused: bool,
    force_loop: Option<bool>,
    screen_size: ScreenSize,
    state: AnimationState,
    frames: Vec<RgbaImage>,
}

impl Viewer {
    pub fn new(
        manifest: AnimationManifest,
        sheet: Spritesheet,
        config: &ViewerConfig,
    ) -> SpriteResult<Self> {
        manifest.validate()?;
        sheet.check(&manifest)?;

        let scale = config.scale.clamp(SCALE_MIN, SCALE_MAX);
        let screen_size = config
            .screen_size
            .unwrap_or_else(|| compute_screen_size(sheet.grid(), scale));

        let def = manifest.animation(0);
        let state = AnimationState::new(def, None);
        let frames = sheet.frames(def, scale)?;

        Ok(Self {
            manifest,
            sheet,
            exporter: GifExporter::new(config.export_dir.clone()),
            current: 0,
            scale,
            flip_x: false,
            flip_y: false,
            paused: false,
            force_loop: None,
            screen_size,
            state,
            frames,
        })
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_def(&self) -> &AnimationDef {
        self.manifest.animation(self.current)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn flips(&self) -> (bool, bool) {
        (self.flip_x, self.flip_y)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.screen_size
    }

    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    pub fn current_frame(&self) -> &RgbaImage {
        &self.frames[self.state.index]
    }

    fn prepare(&mut self, index: usize) -> SpriteResult<()> {
        self.current = index % self.manifest.len();
        let def = self.manifest.animation(self.current);
        self.state = AnimationState::new(def, self.force_loop);
        self.frames = self.sheet.frames(def, self.scale)?;

        log::debug!(
            "Prepared '{}' ({} frames, {} fps, loop {}) at scale {}",
            self.state.name,
            self.state.frame_count,
            self.state.fps,
            self.state.looping,
            self.scale
        );
        Ok(())
    }

    fn select(&mut self, index: usize) -> SpriteResult<Reaction> {
        self.prepare(index)?;
        log::info!("Animation: {}", self.state.name);
        Ok(Reaction::FramesChanged)
    }

    fn rescale(&mut self, scale: u32) -> SpriteResult<Reaction> {
        let scale = scale.clamp(SCALE_MIN, SCALE_MAX);
        if scale == self.scale {
            return Ok(Reaction::None);
        }

        self.scale = scale;
        self.screen_size = compute_screen_size(self.sheet.grid(), scale);
        self.prepare(self.current)?;
        log::info!("Scale: {} (window {})", scale, self.screen_size);
        Ok(Reaction::Resized(self.screen_size))
    }

    pub fn apply(&mut self, command: Command) -> SpriteResult<Reaction> {
        let count = self.manifest.len();

        match command {
            Command::SelectAnimation(digit) => self.select(digit as usize % count),
            Command::Next if self.paused => {
                self.state.step_forward();
                Ok(Reaction::None)
            }
            Command::Next => self.select((self.current + 1) % count),
            Command::Previous if self.paused => {
                self.state.step_back();
                Ok(Reaction::None)
            }
            Command::Previous => self.select((self.current + count - 1) % count),
            Command::ToggleFlipX => {
                self.flip_x = !self.flip_x;
                Ok(Reaction::None)
            }
            Command::ToggleFlipY => {
                self.flip_y = !self.flip_y;
                Ok(Reaction::None)
            }
            Command::ToggleLoop => {
                self.force_loop = Some(!self.state.looping);
                self.prepare(self.current)?;
                Ok(Reaction::FramesChanged)
            }
            Command::Faster => {
                self.state.faster();
                Ok(Reaction::None)
            }
            Command::Slower => {
                self.state.slower();
                Ok(Reaction::None)
            }
            Command::ZoomIn => self.rescale(self.scale + 1),
            Command::ZoomOut => self.rescale(self.scale.saturating_sub(1)),
            Command::TogglePause => {
                self.paused = !self.paused;
                Ok(Reaction::None)
            }
            Command::Export => self.export().map(Reaction::Exported),
        }
    }

    /// Advances playback by `dt` seconds, capped at `MAX_TICK_DT`. Returns
    /// true when the frame changed.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.paused {
            return false;
        }
        self.state.advance(dt.min(MAX_TICK_DT))
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            scale: self.scale,
            fps: self.state.fps,
            looping: self.state.looping,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
        }
    }

    /// Writes the active animation as it is currently shown.
    pub fn export(&self) -> SpriteResult<PathBuf> {
        self.exporter
            .export(&self.sheet, self.current_def(), &self.export_settings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::tests::{sheet_image, MANIFEST};

    fn viewer(config: &ViewerConfig) -> Viewer {
        let manifest = AnimationManifest::from_json(MANIFEST).unwrap();
        let sheet = Spritesheet::new(sheet_image(), 4, 4, 1);
        Viewer::new(manifest, sheet, config).unwrap()
    }

    #[test]
    fn test_starts_on_first_animation() {
        let v = viewer(&ViewerConfig::default().with_scale(2));
        assert_eq!(v.current_index(), 0);
        assert_eq!(v.state().name, "idle");
        assert_eq!(v.frames().len(), 2);
        assert_eq!(v.current_frame().dimensions(), (12, 12));
        assert_eq!(v.screen_size(), ScreenSize::new(300, 300));
    }

    #[test]
    fn test_fixed_screen_size_kept() {
        let config = ViewerConfig::default().with_screen_size(Some(ScreenSize::new(800, 600)));
        assert_eq!(viewer(&config).screen_size(), ScreenSize::new(800, 600));
    }

    #[test]
    fn test_digit_selection_wraps() {
        let mut v = viewer(&ViewerConfig::default());
        assert_eq!(
            v.apply(Command::SelectAnimation(2)).unwrap(),
            Reaction::FramesChanged
        );
        assert_eq!(v.state().name, "die");
        v.apply(Command::SelectAnimation(4)).unwrap();
        assert_eq!(v.state().name, "run");
    }

    #[test]
    fn test_left_right_switch_animation_while_playing() {
        let mut v = viewer(&ViewerConfig::default());
        v.apply(Command::Previous).unwrap();
        assert_eq!(v.current_index(), 2);
        v.apply(Command::Next).unwrap();
        assert_eq!(v.current_index(), 0);
    }

    #[test]
    fn test_left_right_step_frames_while_paused() {
        let mut v = viewer(&ViewerConfig::default());
        v.apply(Command::SelectAnimation(1)).unwrap();
        v.apply(Command::TogglePause).unwrap();

        assert_eq!(v.apply(Command::Previous).unwrap(), Reaction::None);
        assert_eq!(v.current_index(), 1);
        assert_eq!(v.state().index, 3);
        v.apply(Command::Next).unwrap();
        v.apply(Command::Next).unwrap();
        assert_eq!(v.state().index, 1);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut v = viewer(&ViewerConfig::default());
        assert!(v.tick(0.2));
        assert_eq!(v.state().index, 1);

        v.apply(Command::TogglePause).unwrap();
        assert!(!v.tick(1.0));
        assert_eq!(v.state().index, 1);
    }

    #[test]
    fn test_long_stall_clamped() {
        let mut v = viewer(&ViewerConfig::default());
        assert!(v.tick(5.0));
        assert_eq!(v.state().index, 1);
        assert!(v.state().time_acc <= MAX_TICK_DT);

        // Only the capped remainder is left to drain.
        let mut advanced = 0;
        for _ in 0..10 {
            if v.tick(0.0) {
                advanced += 1;
            }
        }
        assert_eq!(advanced, 1);
    }

    #[test]
    fn test_toggle_loop_overrides_and_resets() {
        let mut v = viewer(&ViewerConfig::default());
        v.tick(0.2);
        v.apply(Command::ToggleLoop).unwrap();
        assert!(!v.state().looping);
        assert_eq!(v.state().index, 0);

        // The override follows to other animations.
        v.apply(Command::SelectAnimation(1)).unwrap();
        assert!(!v.state().looping);

        v.apply(Command::ToggleLoop).unwrap();
        assert!(v.state().looping);
        v.apply(Command::SelectAnimation(2)).unwrap();
        assert!(v.state().looping);
    }

    #[test]
    fn test_fps_edit_resets_on_switch() {
        let mut v = viewer(&ViewerConfig::default());
        v.apply(Command::Faster).unwrap();
        v.apply(Command::Faster).unwrap();
        assert_eq!(v.state().fps, 12);
        v.apply(Command::Slower).unwrap();
        assert_eq!(v.state().fps, 11);

        v.apply(Command::Next).unwrap();
        v.apply(Command::Previous).unwrap();
        assert_eq!(v.state().fps, 10);
    }

    #[test]
    fn test_flips_survive_switch() {
        let mut v = viewer(&ViewerConfig::default());
        v.apply(Command::ToggleFlipX).unwrap();
        v.apply(Command::ToggleFlipY).unwrap();
        v.apply(Command::Next).unwrap();
        assert_eq!(v.flips(), (true, true));
        v.apply(Command::ToggleFlipY).unwrap();
        assert_eq!(v.flips(), (true, false));
    }

    #[test]
    fn test_zoom_clamped_and_resizes() {
        let mut v = viewer(&ViewerConfig::default().with_scale(SCALE_MAX));
        assert_eq!(v.apply(Command::ZoomIn).unwrap(), Reaction::None);
        assert_eq!(v.scale(), SCALE_MAX);

        let reaction = v.apply(Command::ZoomOut).unwrap();
        assert_eq!(v.scale(), SCALE_MAX - 1);
        assert_eq!(reaction, Reaction::Resized(v.screen_size()));
        assert_eq!(v.current_frame().dimensions(), (6 * 11, 6 * 11));

        let mut v = viewer(&ViewerConfig::default().with_scale(SCALE_MIN));
        assert_eq!(v.apply(Command::ZoomOut).unwrap(), Reaction::None);
        assert_eq!(v.scale(), SCALE_MIN);
    }

    #[test]
    fn test_export_uses_current_view() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewerConfig::default()
            .with_scale(2)
            .with_export_dir(dir.path());
        let mut v = viewer(&config);
        v.apply(Command::SelectAnimation(2)).unwrap();
        v.apply(Command::ToggleFlipX).unwrap();

        let settings = v.export_settings();
        assert_eq!(settings.scale, 2);
        assert!(settings.flip_x);
        assert!(!settings.looping);

        match v.apply(Command::Export).unwrap() {
            Reaction::Exported(path) => {
                assert_eq!(path, dir.path().join("die.gif"));
                assert!(path.exists());
            }
            other => panic!("unexpected reaction {:?}", other),
        }
    }
}
