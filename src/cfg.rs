// SPDX-License-Identifier: Apache-2.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Delay against time, one marker per sample
    #[default]
    Raster,
    /// Empirical cumulative distribution of the delay
    Cdf,
}

#[derive(Debug, Clone, Default)]
pub struct Cfg {
    pub mode: Mode,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// Upper x limit (lower is 0); seconds past the first sample in raster mode
    pub xlim: Option<u64>,
    /// Upper y limit (lower is 0)
    pub ylim: Option<u64>,
}
