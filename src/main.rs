use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use sprite_viewer::animation::{FPS_MAX, FPS_MIN};
use sprite_viewer::sheet::data_paths;
use sprite_viewer::{
    load_data, parse_color, ExportSettings, GifExporter, Rgb, SpriteResult, SCALE_MAX, SCALE_MIN,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "spritetool",
    about = "Inspect spritesheet manifests and export animations as GIF",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show sheet geometry and every animation
    Info {
        /// Spritesheet base name, without extension
        spritesheet: PathBuf,

        /// Border width between frames; defaults to the manifest's
        #[arg(long)]
        border: Option<u32>,
    },

    /// Write one animation as an animated GIF
    Export {
        /// Spritesheet base name, without extension
        spritesheet: PathBuf,

        /// Animation name
        animation: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Scale factor
        #[arg(long, default_value_t = 1)]
        scale: u32,

        /// Playback rate; defaults to the manifest's
        #[arg(long)]
        fps: Option<u32>,

        /// Mirror horizontally
        #[arg(long)]
        flip_h: bool,

        /// Mirror vertically
        #[arg(long)]
        flip_v: bool,

        /// Override the manifest's loop flag
        #[arg(long = "loop", value_enum)]
        looping: Option<Toggle>,

        /// Flatten transparency onto this colour (e.g. #000000)
        #[arg(long, value_parser = parse_color)]
        bg: Option<Rgb>,

        /// Border width between frames; defaults to the manifest's
        #[arg(long)]
        border: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Info {
            spritesheet,
            border,
        } => show_info(&spritesheet, border),
        Commands::Export {
            spritesheet,
            animation,
            out,
            scale,
            fps,
            flip_h,
            flip_v,
            looping,
            bg,
            border,
        } => {
            let overrides = Overrides {
                scale,
                fps,
                flip_x: flip_h,
                flip_y: flip_v,
                looping: looping.map(|t| matches!(t, Toggle::On)),
            };
            export(&spritesheet, &animation, out, overrides, bg, border)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

struct Overrides {
    scale: u32,
    fps: Option<u32>,
    flip_x: bool,
    flip_y: bool,
    looping: Option<bool>,
}

fn show_info(spritesheet: &Path, border: Option<u32>) -> SpriteResult<()> {
    let (json_path, image_path) = data_paths(spritesheet);
    let (manifest, sheet) = load_data(spritesheet, border)?;
    let grid = sheet.grid();

    println!();
    println!("{}", "═══ Spritesheet ═══".cyan().bold());
    println!("{} {}", "Manifest:".dimmed(), json_path.display().to_string().yellow());
    println!("{} {}", "Image:   ".dimmed(), image_path.display().to_string().yellow());
    println!(
        "{} {}x{}",
        "Sheet:   ".dimmed(),
        grid.sheet_width.to_string().white(),
        grid.sheet_height.to_string().white()
    );
    println!(
        "{} {}x{} (border {})",
        "Frame:   ".dimmed(),
        grid.frame_width.to_string().white(),
        grid.frame_height.to_string().white(),
        grid.border.to_string().magenta()
    );
    println!(
        "{} {} columns x {} rows ({} cells)",
        "Grid:    ".dimmed(),
        grid.columns().to_string().white(),
        grid.rows().to_string().white(),
        grid.capacity().to_string().cyan()
    );

    println!();
    println!("{}", "═══ Animations ═══".cyan().bold());
    println!(
        "{:>3} {:<16} {:>6} {:>5} {:>6}  {}",
        "#".white().bold(),
        "Name".white().bold(),
        "Frames".white().bold(),
        "FPS".white().bold(),
        "Loop".white().bold(),
        "Indices".white().bold()
    );
    println!("{}", "─".repeat(60).dimmed());

    for (i, def) in manifest.animations.iter().enumerate() {
        let looping = if def.looping { "on".green() } else { "off".red() };
        let fps = if (FPS_MIN..=FPS_MAX).contains(&def.fps) {
            def.fps.to_string().cyan()
        } else {
            format!("{}!", def.fps).yellow()
        };
        let indices: Vec<String> = def.frames.iter().map(|f| f.to_string()).collect();

        println!(
            "{:>3} {:<16} {:>6} {:>5} {:>6}  {}",
            i.to_string().dimmed(),
            def.name.yellow(),
            def.frames.len(),
            fps,
            looping,
            indices.join(",").dimmed()
        );
    }

    println!();
    println!("{}", "✓ Manifest and sheet are consistent".green().bold());

    Ok(())
}

fn export(
    spritesheet: &Path,
    animation: &str,
    out: PathBuf,
    overrides: Overrides,
    bg: Option<Rgb>,
    border: Option<u32>,
) -> SpriteResult<()> {
    let (manifest, sheet) = load_data(spritesheet, border)?;
    let (_, def) = manifest.find(animation)?;

    let defaults = ExportSettings::from_def(def);
    let settings = ExportSettings {
        scale: overrides.scale.clamp(SCALE_MIN, SCALE_MAX),
        fps: overrides
            .fps
            .map_or(defaults.fps, |fps| fps.clamp(FPS_MIN, FPS_MAX)),
        looping: overrides.looping.unwrap_or(defaults.looping),
        flip_x: overrides.flip_x,
        flip_y: overrides.flip_y,
    };

    println!(
        "{} {} → {} ({} frames, {} fps, scale {})",
        "Exporting".cyan().bold(),
        def.name.yellow(),
        out.display().to_string().green(),
        def.frames.len().to_string().white(),
        settings.fps.to_string().magenta(),
        settings.scale.to_string().magenta()
    );

    let exporter = GifExporter::new(out).with_background(bg);
    let path = exporter.export(&sheet, def, &settings)?;
    let size = std::fs::metadata(&path)?.len();

    println!("{}", "✓ Exported successfully!".green().bold());
    println!(
        "  {} {}",
        "File:".dimmed(),
        path.display().to_string().white()
    );
    println!("  {} {} bytes", "Size:".dimmed(), size.to_string().white());

    Ok(())
}
