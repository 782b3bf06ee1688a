// SPDX-License-Identifier: Apache-2.0
/// Plotly names at most eight axis pairs on a layout (`x`, `x2` .. `x8`).
pub const MAX_SUBPLOTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    /// One axes for one pid, a 2x2 grid for four, otherwise a single column.
    pub fn for_count(n: usize) -> Result<Self, crate::Error> {
        match n {
            0 => Err(crate::Error::Layout("At least one pid is required".into())),
            4 => Ok(Self { rows: 2, cols: 2 }),
            n if n <= MAX_SUBPLOTS => Ok(Self { rows: n, cols: 1 }),
            n => Err(crate::Error::Layout(format!(
                "At most {MAX_SUBPLOTS} pids can be plotted, got {n}"
            ))),
        }
    }

    /// Row-major position of the `i`th subplot
    pub fn cell(&self, i: usize) -> (usize, usize) {
        (i / self.cols, i % self.cols)
    }
}

/// Plotly's reference for the `i`th axis pair: ("x", "y"), ("x2", "y2"), ...
pub fn axis_refs(i: usize) -> (String, String) {
    match i {
        0 => ("x".to_string(), "y".to_string()),
        i => (format!("x{}", i + 1), format!("y{}", i + 1)),
    }
}
