// SPDX-License-Identifier: Apache-2.0
/// One distinct delay value of an empirical distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdfPoint {
    pub delay: f64,
    pub frequency: u64,
    pub pdf: f64,
    pub cdf: f64,
}

/// Empirical CDF over the distinct delay values, ascending.
pub fn cdf(delays: &[f64]) -> Vec<CdfPoint> {
    let mut sorted: Vec<f64> = delays.iter().copied().filter(|d| !d.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    let total = sorted.len() as f64;
    let mut points: Vec<CdfPoint> = Vec::new();
    for delay in sorted {
        match points.last_mut() {
            Some(last) if last.delay == delay => last.frequency += 1,
            _ => points.push(CdfPoint {
                delay,
                frequency: 1,
                pdf: 0.0,
                cdf: 0.0,
            }),
        }
    }
    let mut running = 0.0;
    for p in points.iter_mut() {
        p.pdf = p.frequency as f64 / total;
        running += p.pdf;
        p.cdf = running;
    }
    points
}

/// Descriptive statistics of a series, printed before plotting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); NaN for a single value
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

// Linear interpolation between closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

impl Summary {
    pub fn of(delays: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = delays.iter().copied().filter(|d| !d.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let ss: f64 = sorted.iter().map(|d| (d - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };
        Some(Self {
            count: n,
            mean,
            std,
            min: sorted[0],
            p25: quantile(&sorted, 0.25),
            p50: quantile(&sorted, 0.50),
            p75: quantile(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{:<6} {:>14.6}", "count", self.count as f64)?;
        writeln!(f, "{:<6} {:>14.6}", "mean", self.mean)?;
        writeln!(f, "{:<6} {:>14.6}", "std", self.std)?;
        writeln!(f, "{:<6} {:>14.6}", "min", self.min)?;
        writeln!(f, "{:<6} {:>14.6}", "25%", self.p25)?;
        writeln!(f, "{:<6} {:>14.6}", "50%", self.p50)?;
        writeln!(f, "{:<6} {:>14.6}", "75%", self.p75)?;
        write!(f, "{:<6} {:>14.6}", "max", self.max)
    }
}
