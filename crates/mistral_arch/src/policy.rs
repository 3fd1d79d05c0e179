//! Build-time choices for the architecture builder.

use crate::delay::Delay;
use mistral_common::{InternalError, MistralResult};
use mistral_config::{ArchConfig, CLKBUF_SUB_INDEX_COUNT, DEFAULT_CLKBUF_SUB_INDEX};
use mistral_diagnostics::{Diagnostic, DiagnosticSink, CLKBUF_SUB_INDEX_UNVERIFIED};

/// Which primitives are instantiated and how routing edges are timed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildPolicy {
    /// Part number named in build reports, if known.
    pub device: Option<String>,
    /// Instantiate DSP slices.
    pub dsp: bool,
    /// Instantiate clock buffers.
    pub clkbuf: bool,
    /// Instantiate the HPS MPU general-purpose interface.
    pub hps: bool,
    /// Instantiate the control-block oscillator.
    pub control: bool,
    /// Clock-buffer sub-indices that are modelled, in build order.
    ///
    /// The CMUXHG block exposes four sub-indices per coordinate but only
    /// sub-index 2 is known to route correctly.
    pub clkbuf_sub_indices: Vec<u32>,
    /// Delay given to routing edges the geometry has no timing for.
    pub default_pip_delay: Delay,
}

impl Default for BuildPolicy {
    fn default() -> Self {
        Self {
            device: None,
            dsp: true,
            clkbuf: true,
            hps: true,
            control: true,
            clkbuf_sub_indices: vec![DEFAULT_CLKBUF_SUB_INDEX],
            default_pip_delay: Delay::from_ps(100),
        }
    }
}

impl BuildPolicy {
    /// Derives a policy from a parsed configuration.
    ///
    /// Emits `W101` for every clock-buffer sub-index other than the default
    /// one, since those have not been validated against hardware.
    ///
    /// # Errors
    ///
    /// Fails if a sub-index is out of range or repeated, or the default delay
    /// is negative. [`mistral_config::load_config`] rejects these already, so
    /// this only triggers for hand-built configurations.
    pub fn from_config(config: &ArchConfig, sink: &DiagnosticSink) -> MistralResult<Self> {
        let mut sub_indices = Vec::with_capacity(config.clkbuf.sub_indices.len());
        for &z in &config.clkbuf.sub_indices {
            if z >= CLKBUF_SUB_INDEX_COUNT {
                return Err(InternalError::new(format!(
                    "clock-buffer sub-index {z} is out of range (0..{CLKBUF_SUB_INDEX_COUNT})"
                )));
            }
            if sub_indices.contains(&z) {
                return Err(InternalError::new(format!(
                    "clock-buffer sub-index {z} is listed twice"
                )));
            }
            if z != DEFAULT_CLKBUF_SUB_INDEX {
                sink.emit(
                    Diagnostic::warning(
                        CLKBUF_SUB_INDEX_UNVERIFIED,
                        format!("clock-buffer sub-index {z} is enabled"),
                    )
                    .with_note(format!(
                        "only sub-index {DEFAULT_CLKBUF_SUB_INDEX} is known to route on hardware"
                    ))
                    .with_help(format!("remove {z} from [clkbuf] sub_indices")),
                );
            }
            sub_indices.push(z);
        }

        let delay = config.timing.default_pip_delay_ps;
        if delay < 0 {
            return Err(InternalError::new(format!(
                "default routing-edge delay {delay}ps is negative"
            )));
        }

        Ok(Self {
            device: config.device.name.clone(),
            dsp: config.primitives.dsp,
            clkbuf: config.primitives.clkbuf,
            hps: config.primitives.hps,
            control: config.primitives.control,
            clkbuf_sub_indices: sub_indices,
            default_pip_delay: Delay::from_ps(delay),
        })
    }
}
