use clap::{Parser, Subcommand};
use rust_qr_scan::app::ScanApp;
use rust_qr_scan::config::ScanConfig;
use rust_qr_scan::logging::init_tracing;
use rust_qr_scan::platform::{self, StdinLines};
use rust_qr_scan::{ImageQrDetector, ScanFlowController};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qrscan", version, about = "Scan QR codes from a camera feed or a photo")]
struct Cli {
    /// Config file (defaults to <config dir>/qrscan/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `rust_qr_scan=trace`
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive scan session (the default)
    Run {
        /// Directory of frames the camera reads
        #[arg(long)]
        frames_dir: Option<PathBuf>,
        /// Directory the photo picker lists
        #[arg(long)]
        gallery_dir: Option<PathBuf>,
    },
    /// Decode QR codes in image files
    Detect {
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(ScanConfig::default_path);
    let mut config = match ScanConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config {}: {}", config_path.display(), err);
            return ExitCode::from(2);
        }
    };
    if let Some(level) = cli.log_level {
        if let Err(err) = config.override_log_level(level) {
            eprintln!("Invalid --log-level: {err}");
            return ExitCode::from(2);
        }
    }
    if let Err(err) = init_tracing(&config.general) {
        eprintln!("{err}");
        return ExitCode::from(2);
    }
    tracing::debug!(config = %config_path.display(), "qrscan starting");

    match cli.command.unwrap_or(Command::Run {
        frames_dir: None,
        gallery_dir: None,
    }) {
        Command::Run {
            frames_dir,
            gallery_dir,
        } => {
            if frames_dir.is_some() {
                config.camera.frames_dir = frames_dir;
            }
            if gallery_dir.is_some() {
                config.gallery.dir = gallery_dir;
            }
            run_cmd(&config)
        }
        Command::Detect { images } => detect_cmd(&config, &images),
    }
}

fn run_cmd(config: &ScanConfig) -> ExitCode {
    let controller = ScanFlowController::with_camera_config(
        platform::desktop_capabilities(config),
        config.camera.device,
    );
    let mut app = ScanApp::new(controller, StdinLines, std::io::stdout());
    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Terminal error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn detect_cmd(config: &ScanConfig, images: &[PathBuf]) -> ExitCode {
    let detector = ImageQrDetector::with_max_dim(config.detector.max_dim);
    let start = Instant::now();
    let results = detector.detect_batch(images);
    let elapsed = start.elapsed();

    let mut failures = 0usize;
    for (path, result) in results {
        match result {
            Ok(codes) => {
                println!("Image: {}", path.display());
                println!("Found {} QR codes", codes.len());
                for (i, content) in codes.iter().enumerate() {
                    println!("  QR {}: {}", i, content);
                }
            }
            Err(err) => {
                failures += 1;
                eprintln!("Failed to load image {}: {}", path.display(), err);
            }
        }
    }
    tracing::info!(images = images.len(), failures, ?elapsed, "batch detection finished");

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
