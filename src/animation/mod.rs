pub mod frame;

pub use frame::{extract_frame, FrameGrid, FrameRect};

use crate::manifest::AnimationDef;

pub const FPS_MIN: u32 = 1;
pub const FPS_MAX: u32 = 60;

/// Playback of a single animation. Rebuilt from its definition whenever
/// the viewer switches animation, rescales or toggles looping.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub name: String,
    pub frame_count: usize,
    pub index: usize,
    pub time_acc: f64,
    pub fps: u32,
    pub looping: bool,
}

impl AnimationState {
    pub fn new(def: &AnimationDef, loop_override: Option<bool>) -> Self {
        Self {
            name: def.name.clone(),
            frame_count: def.frames.len().max(1),
            index: 0,
            time_acc: 0.0,
            fps: def.fps.clamp(FPS_MIN, FPS_MAX),
            looping: loop_override.unwrap_or(def.looping),
        }
    }

    pub fn frame_duration(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Returns true when the displayed frame changed.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.time_acc += dt;

        let duration = self.frame_duration();
        if self.time_acc < duration {
            return false;
        }
        self.time_acc -= duration;

        let previous = self.index;
        if self.index + 1 < self.frame_count {
            self.index += 1;
        } else if self.looping {
            self.index = 0;
        } else {
            self.index = self.frame_count - 1;
        }
        previous != self.index
    }

    pub fn step_forward(&mut self) {
        self.index = (self.index + 1) % self.frame_count;
    }

    pub fn step_back(&mut self) {
        self.index = (self.index + self.frame_count - 1) % self.frame_count;
    }

    pub fn faster(&mut self) {
        self.fps = (self.fps + 1).min(FPS_MAX);
    }

    pub fn slower(&mut self) {
        self.fps = self.fps.saturating_sub(1).max(FPS_MIN);
    }

    pub fn is_finished(&self) -> bool {
        !self.looping && self.index + 1 == self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> AnimationDef {
        AnimationDef::new("walk", vec![0, 1, 2]).with_fps(10)
    }

    #[test]
    fn test_advance_waits_for_threshold() {
        let mut state = AnimationState::new(&walk(), None);
        assert!(!state.advance(0.05));
        assert_eq!(state.index, 0);
        assert!(state.advance(0.06));
        assert_eq!(state.index, 1);
        assert!((state.time_acc - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_advance_moves_one_frame_per_tick() {
        let mut state = AnimationState::new(&walk(), None);
        state.advance(0.35);
        assert_eq!(state.index, 1);
        state.advance(0.0);
        assert_eq!(state.index, 2);
    }

    #[test]
    fn test_loop_wraps_to_start() {
        let mut state = AnimationState::new(&walk(), None);
        for _ in 0..3 {
            state.advance(0.1);
        }
        assert_eq!(state.index, 0);
    }

    #[test]
    fn test_non_loop_holds_last_frame() {
        let mut state = AnimationState::new(&walk().with_loop(false), None);
        for _ in 0..10 {
            state.advance(0.1);
        }
        assert_eq!(state.index, 2);
        assert!(state.is_finished());
        assert!(!state.advance(0.1));
    }

    #[test]
    fn test_loop_override() {
        let state = AnimationState::new(&walk(), Some(false));
        assert!(!state.looping);
        let state = AnimationState::new(&walk().with_loop(false), Some(true));
        assert!(state.looping);
    }

    #[test]
    fn test_fps_bounds() {
        let mut state = AnimationState::new(&walk().with_fps(60), None);
        state.faster();
        assert_eq!(state.fps, FPS_MAX);

        let mut state = AnimationState::new(&walk().with_fps(1), None);
        state.slower();
        assert_eq!(state.fps, FPS_MIN);

        let state = AnimationState::new(&walk().with_fps(0), None);
        assert_eq!(state.fps, FPS_MIN);
        let state = AnimationState::new(&walk().with_fps(240), None);
        assert_eq!(state.fps, FPS_MAX);
    }

    #[test]
    fn test_step_wraps() {
        let mut state = AnimationState::new(&walk(), None);
        state.step_back();
        assert_eq!(state.index, 2);
        state.step_forward();
        assert_eq!(state.index, 0);
    }
}
