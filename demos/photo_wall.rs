//! Terminal photo wall: decodes images and prints them as captioned tiles.
//!
//! Run: cargo run --bin photo-wall -- photo.png=Caption other.jpg

use std::io;

use flexi_logger::Logger;
use pinboard_core::Bitmap;
use pinboard_crossterm::print_grid;
use pinboard_demos::{TilePool, WallConfig, parse_item, render_wall};
use pinboard_ui::TileViewModel;

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let items: Vec<TileViewModel> = args
        .iter()
        .map(|arg| {
            let (path, caption) = parse_item(arg);
            let image = pinboard_image::open(&path).unwrap_or_else(|e| {
                log::warn!("{e}");
                Bitmap::empty()
            });
            TileViewModel { image, caption }
        })
        .collect();

    let mut pool = TilePool::new();
    let grid = render_wall(&items, &WallConfig::default(), &mut pool);
    log::info!(
        "rendered {} tiles using {} pooled {} instances",
        items.len(),
        pool.created(),
        pool.identifier()
    );
    print_grid(&mut io::stdout().lock(), &grid)?;
    Ok(())
}

fn main() {
    let logger = Logger::try_with_env_or_str("info").and_then(|l| l.log_to_stderr().start());
    let _logger = match logger {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to start logger: {e}");
            None
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: photo-wall PATH[=CAPTION]...");
        std::process::exit(2);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
