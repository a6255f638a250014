use crate::animation::FrameGrid;
use crate::error::{SpriteError, SpriteResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const DEFAULT_FPS: u32 = 10;
pub const DEFAULT_BORDER: u32 = 1;

fn default_fps() -> u32 {
    DEFAULT_FPS
}

fn default_loop() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationDef {
    pub name: String,
    pub frames: Vec<u32>,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(rename = "loop", default = "default_loop")]
    pub looping: bool,
}

impl AnimationDef {
    pub fn new(name: impl Into<String>, frames: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            frames,
            fps: DEFAULT_FPS,
            looping: true,
        }
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationManifest {
    pub frame_width: u32,
    pub frame_height: u32,
    #[serde(default)]
    pub border: Option<u32>,
    pub animations: Vec<AnimationDef>,
}

impl AnimationManifest {
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            border: None,
            animations: Vec::new(),
        }
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_animation(mut self, def: AnimationDef) -> Self {
        self.animations.push(def);
        self
    }

    pub fn from_json(json: &str) -> SpriteResult<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn from_reader<R: Read>(reader: R) -> SpriteResult<Self> {
        let manifest: Self = serde_json::from_reader(reader)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> SpriteResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn validate(&self) -> SpriteResult<()> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(SpriteError::InvalidManifest(format!(
                "frame size must be non-zero, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }

        FrameGrid::new(
            self.frame_width,
            self.frame_height,
            self.border_or_default(),
            0,
            0,
        )
        .check_geometry()?;

        if self.animations.is_empty() {
            return Err(SpriteError::InvalidManifest(
                "no animations defined".into(),
            ));
        }

        for def in &self.animations {
            if def.frames.is_empty() {
                return Err(SpriteError::InvalidManifest(format!(
                    "animation '{}' has no frames",
                    def.name
                )));
            }
        }

        Ok(())
    }

    pub fn border_or_default(&self) -> u32 {
        self.border.unwrap_or(DEFAULT_BORDER)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Index wraps around the animation count.
    pub fn animation(&self, index: usize) -> &AnimationDef {
        &self.animations[index % self.animations.len()]
    }

    pub fn find(&self, name: &str) -> SpriteResult<(usize, &AnimationDef)> {
        self.animations
            .iter()
            .enumerate()
            .find(|(_, def)| def.name == name)
            .ok_or_else(|| SpriteError::UnknownAnimation(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "frame_width": 16,
        "frame_height": 24,
        "animations": [
            { "name": "idle", "frames": [0, 1, 2, 3] },
            { "name": "jump", "frames": [4, 5, 6], "fps": 15, "loop": false }
        ]
    }"#;

    #[test]
    fn test_defaults_applied() {
        let manifest = AnimationManifest::from_json(SAMPLE).unwrap();

        assert_eq!(manifest.frame_width, 16);
        assert_eq!(manifest.frame_height, 24);
        assert_eq!(manifest.border_or_default(), DEFAULT_BORDER);

        let idle = &manifest.animations[0];
        assert_eq!(idle.fps, DEFAULT_FPS);
        assert!(idle.looping);

        let jump = &manifest.animations[1];
        assert_eq!(jump.fps, 15);
        assert!(!jump.looping);
        assert_eq!(jump.frames, vec![4, 5, 6]);
    }

    #[test]
    fn test_explicit_border() {
        let json = r#"{"frame_width": 8, "frame_height": 8, "border": 0,
                       "animations": [{"name": "a", "frames": [0]}]}"#;
        let manifest = AnimationManifest::from_json(json).unwrap();
        assert_eq!(manifest.border_or_default(), 0);
    }

    #[test]
    fn test_animation_wraps() {
        let manifest = AnimationManifest::from_json(SAMPLE).unwrap();
        assert_eq!(manifest.animation(0).name, "idle");
        assert_eq!(manifest.animation(3).name, "jump");
    }

    #[test]
    fn test_find_by_name() {
        let manifest = AnimationManifest::from_json(SAMPLE).unwrap();
        let (index, def) = manifest.find("jump").unwrap();
        assert_eq!(index, 1);
        assert_eq!(def.frame_count(), 3);

        assert!(matches!(
            manifest.find("run"),
            Err(SpriteError::UnknownAnimation(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = AnimationManifest::from_json(r#"{"frame_width": 16"#);
        assert!(matches!(result, Err(SpriteError::ManifestParse(_))));

        let missing_name = r#"{"frame_width": 8, "frame_height": 8,
                               "animations": [{"frames": [0]}]}"#;
        assert!(AnimationManifest::from_json(missing_name).is_err());
    }

    #[test]
    fn test_rejects_empty_definitions() {
        let no_anims = r#"{"frame_width": 8, "frame_height": 8, "animations": []}"#;
        assert!(matches!(
            AnimationManifest::from_json(no_anims),
            Err(SpriteError::InvalidManifest(_))
        ));

        let no_frames = r#"{"frame_width": 8, "frame_height": 8,
                            "animations": [{"name": "a", "frames": []}]}"#;
        assert!(AnimationManifest::from_json(no_frames).is_err());

        let zero_size = r#"{"frame_width": 0, "frame_height": 8,
                            "animations": [{"name": "a", "frames": [0]}]}"#;
        assert!(AnimationManifest::from_json(zero_size).is_err());
    }

    #[test]
    fn test_builder_matches_json() {
        let built = AnimationManifest::new(16, 24)
            .with_animation(AnimationDef::new("idle", vec![0, 1, 2, 3]))
            .with_animation(
                AnimationDef::new("jump", vec![4, 5, 6])
                    .with_fps(15)
                    .with_loop(false),
            );
        assert_eq!(built, AnimationManifest::from_json(SAMPLE).unwrap());
    }
}
