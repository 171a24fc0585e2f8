//! Multi-mode output filter stage.

use bajo_core::{Effect, SmoothedParam, StateVariableFilter, SvfOutputs};

use crate::params::{FilterMode, FilterPoles};

/// Cutoff range accepted by [`MultiModeFilter::set_cutoff_hz`].
pub const CUTOFF_RANGE_HZ: (f32, f32) = (20.0, 18000.0);

/// Resonance range accepted by [`MultiModeFilter::set_resonance`].
pub const RESONANCE_RANGE: (f32, f32) = (0.70, 2.5);

/// Switchable lowpass/bandpass/highpass filter with a selectable slope.
///
/// One state-variable section gives 12 dB/oct; selecting
/// [`FilterPoles::Two`] cascades a second identical section (same cutoff,
/// same resonance) behind it for 24 dB/oct.
///
/// Cutoff and resonance glide on 10 ms ramps. The mode and pole selectors
/// switch outright, so they are meant to be changed between blocks; the
/// chain applies selector changes only at block boundaries, and the
/// per-block state flush keeps whatever residue a switch strands in the
/// idle section from ringing out later.
pub struct MultiModeFilter {
    a_l: StateVariableFilter,
    b_l: StateVariableFilter,
    a_r: StateVariableFilter,
    b_r: StateVariableFilter,

    cutoff: SmoothedParam,
    resonance: SmoothedParam,

    mode: FilterMode,
    poles: FilterPoles,
}

impl MultiModeFilter {
    /// Create a wide-open lowpass: cutoff 18 kHz, resonance 0.70, one
    /// section.
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            a_l: StateVariableFilter::new(sample_rate),
            b_l: StateVariableFilter::new(sample_rate),
            a_r: StateVariableFilter::new(sample_rate),
            b_r: StateVariableFilter::new(sample_rate),
            cutoff: SmoothedParam::with_config(CUTOFF_RANGE_HZ.1, sample_rate, 10.0),
            resonance: SmoothedParam::with_config(RESONANCE_RANGE.0, sample_rate, 10.0),
            mode: FilterMode::default(),
            poles: FilterPoles::default(),
        };
        filter.apply_current_settings();
        filter
    }

    /// Set the cutoff in Hz, clamped to 20..18000.
    pub fn set_cutoff_hz(&mut self, freq: f32) {
        self.cutoff
            .set_target(freq.clamp(CUTOFF_RANGE_HZ.0, CUTOFF_RANGE_HZ.1));
    }

    /// Set the resonance, clamped to 0.70..2.5.
    pub fn set_resonance(&mut self, q: f32) {
        self.resonance
            .set_target(q.clamp(RESONANCE_RANGE.0, RESONANCE_RANGE.1));
    }

    /// Select the filter output. Change this between blocks, not inside
    /// one.
    pub fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    /// Select the slope. Change this between blocks, not inside one.
    pub fn set_poles(&mut self, poles: FilterPoles) {
        self.poles = poles;
    }

    /// Current cutoff target in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff.target()
    }

    /// Current resonance target.
    pub fn resonance(&self) -> f32 {
        self.resonance.target()
    }

    /// Current output selection.
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Current slope selection.
    pub fn poles(&self) -> FilterPoles {
        self.poles
    }

    fn apply_current_settings(&mut self) {
        let cutoff = self.cutoff.get();
        let resonance = self.resonance.get();
        for section in [
            &mut self.a_l,
            &mut self.b_l,
            &mut self.a_r,
            &mut self.b_r,
        ] {
            section.set_cutoff(cutoff);
            section.set_resonance(resonance);
        }
    }

    #[inline]
    fn pick(outputs: SvfOutputs, mode: FilterMode) -> f32 {
        match mode {
            FilterMode::Lowpass => outputs.lowpass,
            FilterMode::Bandpass => outputs.bandpass,
            FilterMode::Highpass => outputs.highpass,
        }
    }

    #[inline]
    fn run_channel(
        a: &mut StateVariableFilter,
        b: &mut StateVariableFilter,
        input: f32,
        mode: FilterMode,
        poles: FilterPoles,
    ) -> f32 {
        let first = Self::pick(a.process(input), mode);
        match poles {
            FilterPoles::One => first,
            FilterPoles::Two => Self::pick(b.process(first), mode),
        }
    }
}

impl Effect for MultiModeFilter {
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let settled = self.cutoff.is_settled() && self.resonance.is_settled();
        let cutoff = self.cutoff.advance();
        let resonance = self.resonance.advance();
        if !settled {
            for section in [
                &mut self.a_l,
                &mut self.b_l,
                &mut self.a_r,
                &mut self.b_r,
            ] {
                section.set_cutoff(cutoff);
                section.set_resonance(resonance);
            }
        }

        (
            Self::run_channel(&mut self.a_l, &mut self.b_l, left, self.mode, self.poles),
            Self::run_channel(&mut self.a_r, &mut self.b_r, right, self.mode, self.poles),
        )
    }

    fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(
            left.len(),
            right.len(),
            "channel slices must be equal length"
        );

        for i in 0..left.len().min(right.len()) {
            let (l, r) = self.process_stereo(left[i], right[i]);
            left[i] = l;
            right[i] = r;
        }

        // Flush near-zero section states between blocks, including the
        // second section while it is switched out of the path.
        self.a_l.snap_to_zero();
        self.b_l.snap_to_zero();
        self.a_r.snap_to_zero();
        self.b_r.snap_to_zero();
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.a_l.set_sample_rate(sample_rate);
        self.b_l.set_sample_rate(sample_rate);
        self.a_r.set_sample_rate(sample_rate);
        self.b_r.set_sample_rate(sample_rate);
        self.cutoff.set_sample_rate(sample_rate);
        self.resonance.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.a_l.reset();
        self.b_l.reset();
        self.a_r.reset();
        self.b_r.reset();
        self.cutoff.snap_to_target();
        self.resonance.snap_to_target();
        self.apply_current_settings();
    }
}
