//! Overlay-text formatting for generation runs.
//!
//! The host owns clocks and sampling; this module only turns the numbers it
//! captured into the overlay strings the label compositor renders.

/// Parameters of one generation run, as captured by the host.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct SamplerSummary {
    /// Generation seed.
    pub seed: u64,
    /// Sampling step count.
    pub steps: u32,
    /// Classifier-free guidance scale.
    pub cfg: f64,
    /// Sampler name.
    pub sampler: String,
    /// Scheduler name.
    pub scheduler: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl SamplerSummary {
    /// Format the four-line overlay block describing this run.
    pub fn overlay_text(&self) -> String {
        format!(
            "Seed: {}\nSteps: {} | CFG: {:.1}\n{} | {}\nResolution: {}x{}",
            self.seed, self.steps, self.cfg, self.sampler, self.scheduler, self.width, self.height
        )
    }
}

/// Format an elapsed duration as `Time: 12.34s` (two decimals, seconds).
///
/// Downstream overlays rely on this exact shape; keep it stable.
pub fn format_elapsed(seconds: f64) -> String {
    format!("Time: {seconds:.2}s")
}

/// Append the elapsed-time line to an existing overlay text.
pub fn append_elapsed(text: &str, seconds: f64) -> String {
    if text.is_empty() {
        return format_elapsed(seconds);
    }
    format!("{text}\n{}", format_elapsed(seconds))
}
