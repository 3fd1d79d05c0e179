//! Configuration types deserialized from `mistral.toml`.

use serde::Deserialize;

/// Number of clock-buffer sub-indices the CMUXHG block exposes per coordinate.
pub const CLKBUF_SUB_INDEX_COUNT: u32 = 4;

/// The clock-buffer sub-index modelled when nothing else is configured.
pub const DEFAULT_CLKBUF_SUB_INDEX: u32 = 2;

/// The top-level architecture build configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchConfig {
    /// Target device selection.
    #[serde(default)]
    pub device: DeviceConfig,
    /// Which primitive kinds are instantiated.
    #[serde(default)]
    pub primitives: PrimitiveConfig,
    /// Clock-buffer narrowing policy.
    #[serde(default)]
    pub clkbuf: ClkbufConfig,
    /// Routing-edge timing defaults.
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Target device selection.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Full part number (e.g., "5CSEBA6U23I7"). Informational for the builder.
    #[serde(default)]
    pub name: Option<String>,
}

/// Enables or disables each primitive kind the builder knows about.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimitiveConfig {
    /// DSP slices.
    #[serde(default = "enabled")]
    pub dsp: bool,
    /// Clock-buffer muxes.
    #[serde(default = "enabled")]
    pub clkbuf: bool,
    /// HPS MPU general-purpose interface.
    #[serde(default = "enabled")]
    pub hps: bool,
    /// Control block oscillator.
    #[serde(default = "enabled")]
    pub control: bool,
}

fn enabled() -> bool {
    true
}

impl Default for PrimitiveConfig {
    fn default() -> Self {
        Self {
            dsp: true,
            clkbuf: true,
            hps: true,
            control: true,
        }
    }
}

/// Which clock-buffer sub-indices are modelled at each CMUXHG coordinate.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClkbufConfig {
    /// Enabled sub-indices, each below [`CLKBUF_SUB_INDEX_COUNT`].
    #[serde(default = "default_sub_indices")]
    pub sub_indices: Vec<u32>,
}

fn default_sub_indices() -> Vec<u32> {
    vec![DEFAULT_CLKBUF_SUB_INDEX]
}

impl Default for ClkbufConfig {
    fn default() -> Self {
        Self {
            sub_indices: default_sub_indices(),
        }
    }
}

/// Routing-edge timing defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Delay in picoseconds assigned to edges the geometry gives no delay for.
    #[serde(default = "default_pip_delay_ps")]
    pub default_pip_delay_ps: i32,
}

fn default_pip_delay_ps() -> i32 {
    100
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            default_pip_delay_ps: default_pip_delay_ps(),
        }
    }
}
