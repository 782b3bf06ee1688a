// SPDX-License-Identifier: Apache-2.0
use crate::sample::{Sample, Timestamp};

/// The samples of one process, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub pid: i64,
    pub points: Vec<(Timestamp, f64)>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn delays(&self) -> Vec<f64> {
        self.points.iter().map(|(_, d)| *d).collect()
    }

    pub fn first_time(&self) -> Option<Timestamp> {
        self.points.first().map(|(t, _)| *t)
    }
}

/// One series per requested pid, in request order.
pub fn select(samples: &[Sample], pids: &[i64]) -> Vec<Series> {
    pids.iter()
        .map(|&pid| {
            let points: Vec<_> = samples
                .iter()
                .filter(|s| s.pid == pid)
                .map(|s| (s.time, s.delay))
                .collect();
            if points.is_empty() {
                log::warn!("No samples for pid {pid}");
            } else {
                log::debug!("Selected {} samples for pid {pid}", points.len());
            }
            Series { pid, points }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(secs: i64, pid: i64, delay: f64) -> Sample {
        Sample {
            time: chrono::DateTime::from_timestamp(secs, 0).unwrap().naive_utc(),
            pid,
            delay,
        }
    }

    #[test]
    fn partitions_by_exact_pid_in_request_order() {
        let samples = [
            sample(0, 10, 1.0),
            sample(1, 20, 2.0),
            sample(2, 10, 3.0),
            sample(3, 100, 4.0),
        ];
        let series = select(&samples, &[20, 10]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].pid, 20);
        assert_eq!(series[0].delays(), vec![2.0]);
        assert_eq!(series[1].pid, 10);
        assert_eq!(series[1].delays(), vec![1.0, 3.0]);
        assert_eq!(series[1].first_time(), Some(samples[0].time));
    }

    #[test]
    fn unknown_pid_yields_an_empty_series() {
        let series = select(&[sample(0, 1, 1.0)], &[2, 2]);
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(Series::is_empty));
        assert_eq!(series[0].first_time(), None);
    }
}
