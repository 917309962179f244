use std::time::Duration;

use clap::Parser;

use crate::sorting_algorithms::Algorithm;

pub const DEFAULT_ARRAY_SIZE: usize = 10;
pub const MIN_ARRAY_SIZE: usize = 1;
pub const MAX_ARRAY_SIZE: usize = 99;

// Inclusive bounds for generated element values
pub const MIN_VALUE: i32 = 1;
pub const MAX_VALUE: i32 = 100;

// Animation delay slider, in notches
pub const ANIMATION_DELAY_MIN: u64 = 0;
pub const ANIMATION_DELAY_MAX: u64 = 35;
pub const ANIMATION_DELAY_DEFAULT: u64 = (ANIMATION_DELAY_MAX - ANIMATION_DELAY_MIN) / 2;
/// Milliseconds per delay notch.
pub const DELAY_STEP_MS: u64 = 25;

/// How the player pulls frames out of the driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PlaybackMode {
    /// Precompute the whole history, then replay it.
    #[default]
    History,
    /// Ask the driver for one step per tick.
    Stepper,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "sort-visualizer")]
#[command(about = "Step-by-step terminal animation of classic sorting algorithms")]
#[command(version)]
pub struct Args {
    /// Algorithm to animate
    #[arg(short, long, value_enum, default_value_t = Algorithm::Merge)]
    pub algorithm: Algorithm,

    /// Number of elements to sort (1-99)
    #[arg(short, long, default_value_t = DEFAULT_ARRAY_SIZE, value_parser = parse_array_size)]
    pub size: usize,

    /// Animation delay, 0 (fastest) to 35; each notch adds 25ms per frame
    #[arg(
        short,
        long,
        default_value_t = ANIMATION_DELAY_DEFAULT,
        value_parser = clap::value_parser!(u64).range(ANIMATION_DELAY_MIN..=ANIMATION_DELAY_MAX)
    )]
    pub delay: u64,

    /// Replay a precomputed history or step the driver live
    #[arg(short, long, value_enum, default_value_t)]
    pub mode: PlaybackMode,

    /// Seed for a reproducible array
    #[arg(long)]
    pub seed: Option<u64>,

    /// Read +/-/q from the keyboard while playing
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the algorithm's pseudocode and exit
    #[arg(long)]
    pub print_algorithm: bool,

    /// Voice the current element of each frame
    #[cfg(feature = "audio")]
    #[arg(long)]
    pub sound: bool,
}

fn parse_array_size(input: &str) -> Result<usize, String> {
    let size: usize = input
        .trim()
        .parse()
        .map_err(|_| format!("please enter a number between {MIN_ARRAY_SIZE} and {MAX_ARRAY_SIZE}"))?;
    if (MIN_ARRAY_SIZE..=MAX_ARRAY_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!(
            "please enter a number between {MIN_ARRAY_SIZE} and {MAX_ARRAY_SIZE}"
        ))
    }
}

/// Frame interval for a slider position.
pub fn frame_interval(delay: u64) -> Duration {
    Duration::from_millis(delay * DELAY_STEP_MS)
}
