use clap::Parser;
use colored::Colorize;
use eframe::egui;
use sprite_viewer::config::DEFAULT_SCALE;
use sprite_viewer::layout::{frame_origin, info_lines, INFO_LINE_HEIGHT, INFO_ORIGIN};
use sprite_viewer::{
    load_data, parse_color, parse_size, Command, Reaction, Rgb, ScreenSize, SpriteResult, Viewer,
    ViewerConfig, TICK_RATE,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "sprite-viewer", about = "Sprite animation viewer", version)]
struct Cli {
    /// Spritesheet base name, without extension
    #[arg(default_value = "spritesheet")]
    spritesheet: PathBuf,

    /// Display scale
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: u32,

    /// Background colour (e.g. #000000)
    #[arg(long, default_value = "#323232", value_parser = parse_color)]
    bg: Rgb,

    /// Window size (e.g. 800x600)
    #[arg(long, value_parser = parse_size)]
    size: Option<ScreenSize>,

    /// Border width between frames in pixels; defaults to the manifest's
    #[arg(long)]
    border: Option<u32>,

    /// Directory GIF exports are written to
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> ViewerConfig {
        ViewerConfig::new(self.spritesheet)
            .with_scale(self.scale)
            .with_background(self.bg)
            .with_screen_size(self.size)
            .with_border(self.border)
            .with_export_dir(self.out)
    }
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config();
    let viewer = match open_viewer(&config) {
        Ok(viewer) => viewer,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let size = viewer.screen_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([size.width as f32, size.height as f32])
            .with_title("Sprite Viewer"),
        ..Default::default()
    };

    let background = config.background;
    eframe::run_native(
        "Sprite Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(SpriteViewerApp::new(cc, viewer, background)))),
    )
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn open_viewer(config: &ViewerConfig) -> SpriteResult<Viewer> {
    let (manifest, sheet) = load_data(&config.spritesheet, config.border)?;
    Viewer::new(manifest, sheet, config)
}

fn command_for_key(key: egui::Key) -> Option<Command> {
    use egui::Key;

    let command = match key {
        Key::Num0 => Command::SelectAnimation(0),
        Key::Num1 => Command::SelectAnimation(1),
        Key::Num2 => Command::SelectAnimation(2),
        Key::Num3 => Command::SelectAnimation(3),
        Key::Num4 => Command::SelectAnimation(4),
        Key::Num5 => Command::SelectAnimation(5),
        Key::Num6 => Command::SelectAnimation(6),
        Key::Num7 => Command::SelectAnimation(7),
        Key::Num8 => Command::SelectAnimation(8),
        Key::Num9 => Command::SelectAnimation(9),
        Key::ArrowRight => Command::Next,
        Key::ArrowLeft => Command::Previous,
        Key::ArrowUp => Command::Faster,
        Key::ArrowDown => Command::Slower,
        Key::H => Command::ToggleFlipX,
        Key::V => Command::ToggleFlipY,
        Key::L => Command::ToggleLoop,
        Key::Plus | Key::Equals => Command::ZoomIn,
        Key::Minus => Command::ZoomOut,
        Key::Space => Command::TogglePause,
        Key::G => Command::Export,
        _ => return None,
    };
    Some(command)
}

enum Status {
    Info(String),
    Error(String),
}

struct SpriteViewerApp {
    viewer: Viewer,
    textures: Vec<egui::TextureHandle>,
    background: egui::Color32,
    last_tick: Option<Instant>,
    status: Option<Status>,
}

impl SpriteViewerApp {
    fn new(cc: &eframe::CreationContext<'_>, viewer: Viewer, background: Rgb) -> Self {
        let mut app = Self {
            viewer,
            textures: Vec::new(),
            background: egui::Color32::from_rgb(background.r, background.g, background.b),
            last_tick: None,
            status: None,
        };
        app.upload_frames(&cc.egui_ctx);
        app
    }

    fn upload_frames(&mut self, ctx: &egui::Context) {
        let name = &self.viewer.state().name;
        self.textures = self
            .viewer
            .frames()
            .iter()
            .enumerate()
            .map(|(i, frame)| {
                let size = [frame.width() as usize, frame.height() as usize];
                let image = egui::ColorImage::from_rgba_unmultiplied(size, frame.as_raw());
                ctx.load_texture(
                    format!("{}_{}", name, i),
                    image,
                    egui::TextureOptions::NEAREST,
                )
            })
            .collect();
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let commands: Vec<Command> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => command_for_key(*key),
                    _ => None,
                })
                .collect()
        });

        for command in commands {
            self.run_command(ctx, command);
        }
    }

    fn run_command(&mut self, ctx: &egui::Context, command: Command) {
        match self.viewer.apply(command) {
            Ok(Reaction::None) => {}
            Ok(Reaction::FramesChanged) => self.upload_frames(ctx),
            Ok(Reaction::Resized(size)) => {
                self.upload_frames(ctx);
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    size.width as f32,
                    size.height as f32,
                )));
            }
            Ok(Reaction::Exported(path)) => {
                self.status = Some(Status::Info(format!("Saved {}", path.display())));
            }
            Err(e) => {
                log::error!("{:?} failed: {}", command, e);
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    fn draw(&self, ui: &egui::Ui) {
        let painter = ui.painter();
        let area = ui.max_rect();
        let state = self.viewer.state();

        if let Some(texture) = self.textures.get(state.index) {
            let size = texture.size_vec2();
            let screen = ScreenSize::new(area.width() as u32, area.height() as u32);
            let (x, y) = frame_origin(screen, size.x as u32, size.y as u32);
            let rect = egui::Rect::from_min_size(
                area.min + egui::vec2(x as f32, y as f32),
                size,
            );

            let (flip_x, flip_y) = self.viewer.flips();
            let uv = egui::Rect::from_min_max(
                egui::pos2(flip_x as u8 as f32, flip_y as u8 as f32),
                egui::pos2(!flip_x as u8 as f32, !flip_y as u8 as f32),
            );
            painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        }

        let font = egui::FontId::proportional(16.0);
        let mut y = area.min.y + INFO_ORIGIN.1;
        for line in info_lines(&self.viewer) {
            painter.text(
                egui::pos2(area.min.x + INFO_ORIGIN.0, y),
                egui::Align2::LEFT_TOP,
                line,
                font.clone(),
                egui::Color32::WHITE,
            );
            y += INFO_LINE_HEIGHT;
        }

        if let Some(status) = &self.status {
            let (text, color) = match status {
                Status::Info(text) => (text, egui::Color32::GREEN),
                Status::Error(text) => (text, egui::Color32::RED),
            };
            painter.text(
                egui::pos2(area.min.x + INFO_ORIGIN.0, y + INFO_LINE_HEIGHT),
                egui::Align2::LEFT_TOP,
                text,
                font,
                color,
            );
        }
    }
}

impl eframe::App for SpriteViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        let now = Instant::now();
        if let Some(last) = self.last_tick {
            let dt = now.duration_since(last).as_secs_f64();
            self.viewer.tick(dt);
        }
        self.last_tick = Some(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.background))
            .show(ctx, |ui| self.draw(ui));

        ctx.request_repaint_after(Duration::from_secs_f64(1.0 / TICK_RATE));
    }
}
