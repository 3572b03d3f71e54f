//! gesture_snake: entry point.

use clap::Parser;
use gesture_snake::app::{run, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "gesture_snake", about = "Snake steered by hand gestures")]
struct Args {
    /// Camera device index
    #[arg(long, default_value_t = 0)]
    camera_index: i32,

    /// Do not open the camera preview window
    #[arg(long)]
    no_preview: bool,

    /// Use the mouse-driven simulated hand even if a camera is available
    #[arg(long)]
    simulate: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Gesture Snake: steer with your hand               ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Mode: {}", if args.simulate { "Simulated hand" } else { "Webcam" });
    #[cfg(not(feature = "camera"))]
    println!("  Mode: Simulated hand  (use --features camera for a webcam)");
    println!();

    let cfg = AppConfig {
        camera_index: args.camera_index,
        preview:      !args.no_preview,
        simulate:     args.simulate,
        ..AppConfig::default()
    };

    if let Err(e) = run(cfg) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
