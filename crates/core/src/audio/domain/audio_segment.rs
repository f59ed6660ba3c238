/// Decoded audio ready for recognition: PCM samples normalized to [-1.0, 1.0].
#[derive(Clone, Debug)]
pub struct AudioSegment {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Length in seconds. Zero for a segment with no sample rate or channels.
    pub fn duration(&self) -> f64 {
        let frames_per_second = self.sample_rate as f64 * self.channels as f64;
        if frames_per_second == 0.0 {
            return 0.0;
        }
        self.samples.len() as f64 / frames_per_second
    }
}
