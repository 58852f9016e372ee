mod renderer;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glide_core::{Carousel, CarouselConfig};
use tracing_subscriber::EnvFilter;

/// Smallest label pool, so `+` can always grow the list.
const MIN_LABELS: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "glide", about = "Drag-to-scroll carousel in the terminal")]
struct Args {
    /// Number of cards to mount.
    #[arg(default_value_t = 12)]
    item_count: usize,
    /// Card width in px (8 px per terminal column).
    #[arg(long, default_value_t = 240.0)]
    item_width: f64,
    /// Gap between cards in px.
    #[arg(long, default_value_t = 16.0)]
    gap: f64,
    /// Write tracing output to this file.
    #[arg(long)]
    log: Option<PathBuf>,
}

/// Log to a file only: the terminal is in the alternate screen.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glide_core=debug")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_tracing(path)?;
    }

    let config = CarouselConfig::new(args.item_width, args.gap)?;
    let labels: Vec<String> = (1..=args.item_count.max(MIN_LABELS))
        .map(|n| format!("Tour {n}"))
        .collect();
    let carousel = Carousel::new(config, args.item_count);
    tracing::info!(
        items = carousel.item_count(),
        item_width = args.item_width,
        gap = args.gap,
        "starting terminal host"
    );

    renderer::run(carousel, &labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_layout() {
        let args = Args::try_parse_from(["glide"]).unwrap();
        assert_eq!(args.item_count, 12);
        assert_eq!(args.item_width, 240.0);
        assert_eq!(args.gap, 16.0);
        assert!(args.log.is_none());
    }

    #[test]
    fn named_options_are_typed() {
        let args = Args::try_parse_from([
            "glide", "30", "--item-width", "180", "--gap", "8", "--log", "glide.log",
        ])
        .unwrap();
        assert_eq!(args.item_count, 30);
        assert_eq!(args.item_width, 180.0);
        assert_eq!(args.gap, 8.0);
        assert_eq!(args.log, Some(PathBuf::from("glide.log")));

        assert!(Args::try_parse_from(["glide", "--gap", "wide"]).is_err());
    }

    #[test]
    fn help_is_not_an_error_exit() {
        let err = Args::try_parse_from(["glide", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }
}
