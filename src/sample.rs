// SPDX-License-Identifier: Apache-2.0
pub type Timestamp = chrono::NaiveDateTime;

/// One latency measurement: when it was taken, for which process, and how long it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: Timestamp,
    pub pid: i64,
    /// Microseconds
    pub delay: f64,
}

// The index column can have any header (or none), so every row is projected
// onto these names before deserializing.
const PROJECTION: [&str; 3] = ["time", "pid", "delay"];

#[derive(serde::Deserialize)]
struct Row {
    time: String,
    pid: i64,
    delay: Option<f64>,
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses the timestamp index. Falls back to fractional seconds since the epoch.
pub fn parse_timestamp(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if let Ok(t) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(t.naive_utc());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(t) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    let secs: f64 = s.parse().ok()?;
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
    chrono::DateTime::from_timestamp(whole as i64, nanos).map(|t| t.naive_utc())
}

fn column(headers: &csv::StringRecord, name: &'static str) -> Result<usize, crate::Error> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(crate::Error::MissingColumn(name))
}

pub fn read_samples_from<R: std::io::Read>(rdr: R) -> Result<Vec<Sample>, crate::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers = rdr.headers()?.clone();
    let pid_col = column(&headers, "pid")?;
    let delay_col = column(&headers, "delay")?;
    let projection = csv::StringRecord::from(PROJECTION.to_vec());
    let mut samples = Vec::new();
    let mut skipped = 0usize;
    for r in rdr.records() {
        let record = r?;
        let mut projected = csv::StringRecord::from(vec![
            record.get(0).unwrap_or_default(),
            record.get(pid_col).unwrap_or_default(),
            record.get(delay_col).unwrap_or_default(),
        ]);
        projected.set_position(record.position().cloned());
        let row: Row = projected.deserialize(Some(&projection))?;
        let time = parse_timestamp(&row.time).ok_or_else(|| crate::Error::Timestamp {
            line: record.position().map(|p| p.line()).unwrap_or_default(),
            value: row.time.clone(),
        })?;
        match row.delay {
            Some(delay) if !delay.is_nan() => samples.push(Sample {
                time,
                pid: row.pid,
                delay,
            }),
            _ => skipped += 1,
        }
    }
    log::debug!("Read {} samples, skipped {skipped} without a delay", samples.len());
    Ok(samples)
}

pub fn read_samples(path: impl AsRef<std::path::Path>) -> Result<Vec<Sample>, crate::Error> {
    let path = path.as_ref();
    log::debug!("Reading samples from {}", path.display());
    read_samples_from(std::fs::File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[test]
    fn parses_common_timestamp_forms() {
        let want = ts("2020-05-01 10:00:00.250");
        assert_eq!(parse_timestamp("2020-05-01 10:00:00.250"), Some(want));
        assert_eq!(parse_timestamp("2020-05-01T10:00:00.250"), Some(want));
        assert_eq!(parse_timestamp("2020-05-01T10:00:00.250+00:00"), Some(want));
        assert_eq!(parse_timestamp("2020-05-01T12:00:00.250+02:00"), Some(want));
        assert_eq!(parse_timestamp(" 2020-05-01 10:00:00 "), Some(ts("2020-05-01 10:00:00.0")));
        assert_eq!(parse_timestamp("2020-05-01"), Some(ts("2020-05-01 00:00:00.0")));
    }

    #[test]
    fn parses_epoch_seconds() {
        assert_eq!(parse_timestamp("0"), Some(ts("1970-01-01 00:00:00.0")));
        assert_eq!(parse_timestamp("1.5"), Some(ts("1970-01-01 00:00:01.5")));
        assert_eq!(parse_timestamp("not a time"), None);
        assert_eq!(parse_timestamp("NaN"), None);
    }

    #[test]
    fn reads_rows_in_file_order() {
        let csv = "\
time,comm,pid,delay
2020-05-01 10:00:00,a,7648,4
2020-05-01 10:00:01,b,7653,12.5
2020-05-01 10:00:02,a,7648,3
";
        let samples = read_samples_from(csv.as_bytes()).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].pid, 7648);
        assert_eq!(samples[1].delay, 12.5);
        assert_eq!(samples[2].time, ts("2020-05-01 10:00:02.0"));
    }

    #[test]
    fn columns_may_appear_in_any_order() {
        let csv = ",delay,pid\n2020-05-01 10:00:00,9,1\n";
        let samples = read_samples_from(csv.as_bytes()).unwrap();
        assert_eq!(samples[0].pid, 1);
        assert_eq!(samples[0].delay, 9.0);
    }

    #[test]
    fn rows_without_a_delay_are_skipped() {
        let csv = "time,pid,delay\n2020-05-01 10:00:00,1,\n2020-05-01 10:00:01,1,2\n";
        let samples = read_samples_from(csv.as_bytes()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].delay, 2.0);
    }

    #[test]
    fn missing_columns_are_reported() {
        let csv = "time,pid\n2020-05-01 10:00:00,1\n";
        match read_samples_from(csv.as_bytes()) {
            Err(crate::Error::MissingColumn("delay")) => (),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn malformed_fields_propagate() {
        let csv = "time,pid,delay\n2020-05-01 10:00:00,abc,1\n";
        assert!(matches!(
            read_samples_from(csv.as_bytes()),
            Err(crate::Error::Csv(_))
        ));
        let csv = "time,pid,delay\nsoon,1,1\n";
        match read_samples_from(csv.as_bytes()) {
            Err(crate::Error::Timestamp { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn timestamp_errors_report_the_physical_line() {
        let csv = "time,comm,pid,delay\n2020-05-01 10:00:00,\"two\nlines\",1,1\nsoon,c,1,1\n";
        match read_samples_from(csv.as_bytes()) {
            Err(crate::Error::Timestamp { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            read_samples("/nonexistent/lat-plot/samples.csv"),
            Err(crate::Error::Io(_))
        ));
    }
}
