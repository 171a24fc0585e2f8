//! Criterion benchmarks for the bass chain stages
//!
//! Run with: cargo bench
#![allow(missing_docs)]

use bajo_core::Effect;
use bajo_effects::{
    BassChain, Bitcrusher, Delay, EffectParameters, FilterMode, FilterPoles, Foldback,
    FormantFilter, Gain, HaasWidener, MultiModeFilter, Waveshaper,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 110.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_effect<E: Effect>(c: &mut Criterion, name: &str, mut effect: E) {
    let mut group = c.benchmark_group(name);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut left = vec![0.0; block_size];
                let mut right = vec![0.0; block_size];
                b.iter(|| {
                    left.copy_from_slice(black_box(&input));
                    right.copy_from_slice(black_box(&input));
                    effect.process_block(&mut left, &mut right);
                    black_box(left[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_gain(c: &mut Criterion) {
    let mut effect = Gain::new(SAMPLE_RATE);
    effect.set_gain_db(-6.0);
    bench_effect(c, "Gain", effect);
}

fn bench_waveshaper(c: &mut Criterion) {
    let mut effect = Waveshaper::new(SAMPLE_RATE);
    effect.set_amount(40.0);
    effect.set_mix(1.0);
    bench_effect(c, "Waveshaper", effect);
}

fn bench_foldback(c: &mut Criterion) {
    let mut effect = Foldback::new(SAMPLE_RATE);
    effect.set_amount(25.0);
    effect.set_mix(1.0);
    bench_effect(c, "Foldback", effect);
}

fn bench_bitcrusher(c: &mut Criterion) {
    let mut effect = Bitcrusher::new(SAMPLE_RATE);
    effect.set_amount(0.6);
    effect.set_mix(1.0);
    bench_effect(c, "Bitcrusher", effect);
}

fn bench_formant(c: &mut Criterion) {
    let mut effect = FormantFilter::new(SAMPLE_RATE);
    effect.set_morph(4.5);
    effect.set_mix(1.0);
    bench_effect(c, "FormantFilter", effect);
}

fn bench_delay(c: &mut Criterion) {
    let mut effect = Delay::new(SAMPLE_RATE);
    effect.set_time(0.25);
    effect.set_feedback(0.45);
    effect.set_mix(0.35);
    bench_effect(c, "Delay", effect);
}

fn bench_filter(c: &mut Criterion) {
    let mut effect = MultiModeFilter::new(SAMPLE_RATE);
    effect.set_cutoff_hz(800.0);
    effect.set_resonance(1.2);
    effect.set_mode(FilterMode::Bandpass);
    effect.set_poles(FilterPoles::Two);
    bench_effect(c, "MultiModeFilter", effect);
}

fn bench_haas(c: &mut Criterion) {
    let mut effect = HaasWidener::new(SAMPLE_RATE);
    effect.set_width(0.6);
    bench_effect(c, "HaasWidener", effect);
}

fn bench_bass_chain(c: &mut Criterion) {
    let mut chain = BassChain::new(SAMPLE_RATE);
    chain.set_parameters(&EffectParameters {
        input_gain_db: 3.0,
        waveshaper_amount: 40.0,
        waveshaper_mix: 0.7,
        foldback_amount: 10.0,
        foldback_mix: 0.3,
        crush_amount: 0.4,
        crush_mix: 0.5,
        formant_morph: 4.0,
        formant_mix: 0.4,
        delay_time: 0.3,
        delay_feedback: 0.4,
        delay_mix: 0.25,
        filter_cutoff_hz: 2500.0,
        filter_resonance: 1.0,
        filter_mode: FilterMode::Lowpass,
        filter_poles: FilterPoles::Two,
        haas_width: 0.5,
        output_gain_db: -3.0,
    });
    chain.reset();

    bench_effect(c, "BassChain", chain);
}

criterion_group!(
    benches,
    bench_gain,
    bench_waveshaper,
    bench_foldback,
    bench_bitcrusher,
    bench_formant,
    bench_delay,
    bench_filter,
    bench_haas,
    bench_bass_chain,
);

criterion_main!(benches);
