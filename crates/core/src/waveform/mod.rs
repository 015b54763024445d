/// Provider of waveform data. The core only needs the scale of the
/// whole-track overview.
pub trait WaveformSource {
    /// Samples per pixel used by the overview.
    fn scale_for_overview(&self) -> u32;
}

/// Source with a known overview scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedScale(pub u32);

impl WaveformSource for FixedScale {
    fn scale_for_overview(&self) -> u32 {
        self.0
    }
}

/// Overview that fits a whole track into a container of `width` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FittedOverview {
    pub total_samples: u64,
    pub width: u32,
}

impl WaveformSource for FittedOverview {
    fn scale_for_overview(&self) -> u32 {
        let width = u64::from(self.width.max(1));
        let scale = self.total_samples.div_ceil(width).max(1);
        u32::try_from(scale).unwrap_or(u32::MAX)
    }
}
