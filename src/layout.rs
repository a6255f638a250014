use crate::animation::FrameGrid;
use crate::input::KEY_HELP;
use crate::parse::ScreenSize;
use crate::viewer::Viewer;

pub const INFO_MARGIN_LEFT: u32 = 180;
pub const MIN_SCREEN_WIDTH: u32 = 300;
pub const MIN_SCREEN_HEIGHT: u32 = 300;

pub const INFO_ORIGIN: (f32, f32) = (10.0, 10.0);
pub const INFO_LINE_HEIGHT: f32 = 20.0;

/// Window size that fits one scaled cell next to the info column.
pub fn compute_screen_size(grid: &FrameGrid, scale: u32) -> ScreenSize {
    let (pitch_w, pitch_h) = grid.pitch();
    let width = (pitch_w * scale + INFO_MARGIN_LEFT + 10 * scale).max(MIN_SCREEN_WIDTH);
    let height = (pitch_h * scale + 20 * scale).max(MIN_SCREEN_HEIGHT);
    ScreenSize::new(width, height)
}

/// Top-left corner of a frame centred in the area right of the info column.
pub fn frame_origin(screen: ScreenSize, frame_width: u32, frame_height: u32) -> (i64, i64) {
    let x = (screen.width / 2) as i64 - (frame_width / 2) as i64 + (INFO_MARGIN_LEFT / 2) as i64;
    let y = (screen.height / 2) as i64 - (frame_height / 2) as i64;
    (x, y)
}

pub fn flip_label(flip_x: bool, flip_y: bool) -> &'static str {
    match (flip_x, flip_y) {
        (true, true) => "HV",
        (true, false) => "H",
        (false, true) => "V",
        (false, false) => "-",
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

pub fn info_lines(viewer: &Viewer) -> Vec<String> {
    let state = viewer.state();
    let (flip_x, flip_y) = viewer.flips();

    let mut lines = vec![
        format!("Anim: {}", state.name),
        format!("FPS : {}", state.fps),
        format!("Loop: {}", on_off(state.looping)),
        format!("Frame: {} / {}", state.index + 1, state.frame_count),
        format!("Flip: {}", flip_label(flip_x, flip_y)),
        format!("Scale: {}", viewer.scale()),
        format!("Pause: {}", on_off(viewer.is_paused())),
        String::new(),
    ];
    lines.extend(KEY_HELP.iter().map(|s| s.to_string()));
    lines
}
