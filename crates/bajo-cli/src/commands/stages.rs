//! Chain stage and parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use super::common::format_value;
use bajo_core::ParamDescriptor;
use bajo_effects::{DESCRIPTORS, index};
use clap::Args;

#[derive(Args)]
pub struct StagesArgs {
    /// Emit machine-readable JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Stage names with their descriptor index ranges, in processing order.
static STAGES: &[(&str, std::ops::Range<usize>)] = &[
    ("Input Gain", index::INPUT_GAIN..index::SHAPE_AMOUNT),
    ("Waveshaper", index::SHAPE_AMOUNT..index::FOLD_AMOUNT),
    ("Foldback", index::FOLD_AMOUNT..index::CRUSH_AMOUNT),
    ("Bit Crusher", index::CRUSH_AMOUNT..index::FORMANT_MORPH),
    ("Formant Filter", index::FORMANT_MORPH..index::DELAY_TIME),
    ("Delay", index::DELAY_TIME..index::FILTER_CUTOFF),
    ("Multi-mode Filter", index::FILTER_CUTOFF..index::HAAS_WIDTH),
    ("Haas Widener", index::HAAS_WIDTH..index::OUTPUT_GAIN),
    ("Output Gain", index::OUTPUT_GAIN..index::COUNT),
];

#[derive(serde::Serialize)]
struct ParamRow {
    stage: &'static str,
    key: &'static str,
    name: &'static str,
    short_name: &'static str,
    unit: &'static str,
    min: f32,
    max: f32,
    default: f32,
    step: f32,
}

pub fn run(args: StagesArgs) -> anyhow::Result<()> {
    if args.json {
        let mut rows = Vec::with_capacity(index::COUNT);
        for &(stage, ref range) in STAGES {
            for desc in &DESCRIPTORS[range.clone()] {
                rows.push(ParamRow {
                    stage,
                    key: desc.key,
                    name: desc.name,
                    short_name: desc.short_name,
                    unit: desc.unit.suffix().trim(),
                    min: desc.min,
                    max: desc.max,
                    default: desc.default,
                    step: desc.step,
                });
            }
        }
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Chain Stages");
    println!("============");
    println!();
    println!("Fixed processing order: input gain -> waveshaper -> foldback");
    println!("-> bit crusher -> formant filter -> delay -> multi-mode filter");
    println!("-> haas widener -> output gain");
    println!();
    println!("  {:16}  {:18}  {:26}  {}", "Key", "Name", "Range", "Default");
    println!("  {:16}  {:18}  {:26}  {}", "---", "----", "-----", "-------");

    for &(stage, ref range) in STAGES {
        println!();
        println!("{stage}");
        for desc in &DESCRIPTORS[range.clone()] {
            println!(
                "  {:16}  {:18}  {:26}  {}",
                desc.key,
                desc.name,
                format_range(desc),
                format_value(desc, desc.default),
            );
        }
    }

    println!();
    println!("Override any parameter with 'bajo process --set key=value'.");

    Ok(())
}

fn format_range(desc: &ParamDescriptor) -> String {
    match desc.key {
        "filter_mode" => "lowpass | bandpass | highpass".to_string(),
        "filter_poles" => "12 dB/oct | 24 dB/oct".to_string(),
        _ => {
            let s = desc.unit.suffix();
            format!("{}{s} .. {}{s}", desc.min, desc.max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ranges_cover_every_descriptor_once() {
        let mut covered = vec![false; index::COUNT];
        for &(_, ref range) in STAGES {
            for i in range.clone() {
                assert!(!covered[i], "descriptor {i} listed twice");
                covered[i] = true;
            }
        }
        assert!(covered.iter().all(|&c| c));
    }

    #[test]
    fn range_formatting_uses_unit_suffixes() {
        assert_eq!(
            format_range(&DESCRIPTORS[index::FILTER_CUTOFF]),
            "20 Hz .. 18000 Hz"
        );
        assert_eq!(
            format_range(&DESCRIPTORS[index::FILTER_MODE]),
            "lowpass | bandpass | highpass"
        );
    }
}
