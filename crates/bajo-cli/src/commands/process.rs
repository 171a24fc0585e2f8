//! File-based chain processing command.

use super::common::{parse_set, resolve_preset};
use crate::wav::{self, WavSpec};
use bajo_core::Effect;
use bajo_effects::{BassChain, ParamStore};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML file path
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter overrides (e.g., "delay_mix=0.4")
    #[arg(long, value_parser = parse_set, number_of_values = 1)]
    set: Vec<(String, f32)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = wav::read_wav_stereo(&args.input)?;
    let sample_rate = spec.sample_rate as f32;
    let frames = samples.frames();

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        spec.channels,
        spec.sample_rate,
        frames as f32 / sample_rate
    );

    if args.block_size == 0 {
        anyhow::bail!("Block size must be at least 1");
    }

    // Defaults first, then the preset, then --set overrides on top.
    let store = ParamStore::new();
    if let Some(name) = &args.preset {
        let preset = resolve_preset(name)?;
        println!("Loading preset: {}", preset.name);
        preset.apply(&store);
    }
    for (key, value) in &args.set {
        if !store.set_by_key(key, *value) {
            anyhow::bail!("Unknown parameter '{key}'. Use 'bajo stages' to list parameters.");
        }
    }

    let mut chain = BassChain::new(sample_rate);
    // Parameters go in before prepare so the reset snaps the smoothers
    // to them instead of ramping away from the defaults.
    chain.set_parameters(&store.snapshot());
    chain.prepare(sample_rate, args.block_size);

    tracing::debug!("processing {frames} frames at {sample_rate} Hz");

    let input_rms = rms(&samples.left, &samples.right);
    let input_peak = peak(&samples.left, &samples.right);

    println!("Processing...");

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let block_size = args.block_size;
    for (i, (left, right)) in samples
        .left
        .chunks_mut(block_size)
        .zip(samples.right.chunks_mut(block_size))
        .enumerate()
    {
        chain.process_block(left, right);
        pb.set_position(((i + 1) * block_size).min(frames) as u64);
    }

    pb.finish_with_message("done");

    let output_rms = rms(&samples.left, &samples.right);
    let output_peak = peak(&samples.left, &samples.right);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(output_rms),
        linear_to_db(output_peak)
    );

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    wav::write_wav_stereo(&args.output, &samples, out_spec)?;
    println!("Done!");

    Ok(())
}

fn rms(left: &[f32], right: &[f32]) -> f32 {
    let n = left.len() + right.len();
    if n == 0 {
        return 0.0;
    }
    let sum: f32 = left.iter().chain(right).map(|s| s * s).sum();
    (sum / n as f32).sqrt()
}

fn peak(left: &[f32], right: &[f32]) -> f32 {
    left.iter().chain(right).map(|s| s.abs()).fold(0.0, f32::max)
}

fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
