/// A user action, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Digit key 0-9; wraps around the animation count.
    SelectAnimation(u8),
    /// Next animation while playing, next frame while paused.
    Next,
    /// Previous animation while playing, previous frame while paused.
    Previous,
    ToggleFlipX,
    ToggleFlipY,
    ToggleLoop,
    Faster,
    Slower,
    ZoomIn,
    ZoomOut,
    TogglePause,
    Export,
}

pub const KEY_HELP: [&str; 7] = [
    "[Select] 0-9",
    "[Anim  ] Left / Right",
    "[Frame ] Left / Right",
    "[Speed ] Up / Down",
    "[Zoom  ] + / -",
    "[View  ] H / V / L / SPACE",
    "[Export] G",
];
