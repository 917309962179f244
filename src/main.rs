use clap::Parser;
use log::{info, LevelFilter};

use sort_visualizer::array_generator;
use sort_visualizer::config::{Args, PlaybackMode};
use sort_visualizer::playback::{FrameSource, Player, RawModeGuard};
use sort_visualizer::sorting_algorithms::{Comparator, SortDriver, Sorter};
use sort_visualizer::sorting_graph::SortGraph;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let elements = array_generator::generate_with_seed(args.size, args.seed)?;
    let mut sorter = Sorter::new(args.algorithm, elements, Comparator::default());

    if args.print_algorithm {
        println!("{}\n\n{}", args.algorithm, sorter.print_algorithm());
        return Ok(());
    }

    info!(
        "{} over {} elements, {:?} mode",
        args.algorithm, args.size, args.mode
    );

    #[cfg(feature = "audio")]
    let mut live_audio = if args.sound {
        let device = sort_visualizer::audio::AudioDevice::new()?;
        Some(device.play_live())
    } else {
        None
    };

    let graph = SortGraph::new(args.algorithm.name()).with_pseudocode(sorter.print_algorithm());
    let player = Player::new(graph, args.delay).interactive(args.interactive);
    #[cfg(feature = "audio")]
    let player = match &live_audio {
        Some(audio) => player.with_audio(audio.sender()),
        None => player,
    };
    let mut player = player;

    SortGraph::clear_screen()?;
    let report = {
        let _raw_mode = if args.interactive {
            Some(RawModeGuard::enable()?)
        } else {
            None
        };
        let source = match args.mode {
            PlaybackMode::History => FrameSource::from_history(sorter.full_sort()),
            PlaybackMode::Stepper => FrameSource::stepper(&mut sorter),
        };
        player.play(source)?
    };

    #[cfg(feature = "audio")]
    if let Some(audio) = live_audio.as_mut() {
        audio.stop();
    }

    println!();
    println!(
        "{}: {} frames{}",
        args.algorithm,
        report.frames,
        if report.cancelled { " (stopped)" } else { "" }
    );
    Ok(())
}
