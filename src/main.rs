use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use midi2hydrogen::{Convertor, MidiData};

#[derive(Parser, Debug)]
#[command(name = "midi2hydrogen")]
#[command(about = "Convert MIDI drum recordings to Hydrogen song files", long_about = None)]
struct Args {
    /// Path to the MIDI file
    midi: PathBuf,

    /// Output file path (default: `<midi-name>.h2song`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Index of the track to convert
    #[arg(short, long, default_value = "0")]
    track: usize,

    /// List the tracks of the MIDI file and exit
    #[arg(long)]
    list_tracks: bool,

    /// Hydrogen drumkit descriptor to use instead of the built-in GMRockKit
    #[arg(short, long)]
    drumkit: Option<PathBuf>,

    /// JSON key-to-instrument mapping, overriding the seeded GM drum map
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Write the active mapping to this JSON file
    #[arg(long)]
    save_mapping: Option<PathBuf>,

    /// Suppress informational messages (only errors)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.midi.exists() {
        anyhow::bail!("MIDI file not found: {}", args.midi.display());
    }

    let midi = MidiData::from_file(&args.midi)
        .with_context(|| format!("Failed to read MIDI file: {}", args.midi.display()))?;

    if args.list_tracks {
        for (index, track) in midi.tracks.iter().enumerate() {
            let name = track.name.as_deref().unwrap_or("(unnamed)");
            println!("{}: {} ({} events)", index, name, track.events.len());
        }
        return Ok(());
    }

    let track = midi
        .tracks
        .get(args.track)
        .with_context(|| format!("MIDI file has no track {}", args.track))?;

    let output_path = args.output.unwrap_or_else(|| {
        let stem = args
            .midi
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        PathBuf::from(format!("{}.h2song", stem))
    });

    let mut convertor = Convertor::new();

    if let Some(kit) = &args.drumkit {
        convertor
            .load_drumkit(kit)
            .with_context(|| format!("Failed to load drumkit {}", kit.display()))?;
        if !args.quiet {
            eprintln!(
                "Loaded drumkit {} ({} instruments)",
                convertor.catalog().drumkit(),
                convertor.catalog().instruments().len()
            );
        }
    }

    convertor.seed_mapping(track);

    if let Some(path) = &args.mapping {
        convertor
            .load_mapping(path)
            .with_context(|| format!("Failed to load mapping {}", path.display()))?;
    }

    if let Some(path) = &args.save_mapping {
        convertor
            .save_mapping(path)
            .with_context(|| format!("Failed to save mapping {}", path.display()))?;
        if !args.quiet {
            eprintln!("Mapping saved to {}", path.display());
        }
    }

    convertor
        .convert_to_file(track, midi.time_division, &output_path)
        .with_context(|| format!("Failed to convert {}", args.midi.display()))?;

    if !args.quiet {
        eprintln!("Output saved to {}", output_path.display());
    }

    Ok(())
}
