//! Convergence traces.
//!
//! A [`ConvergenceTrace`] is the sequence of `(trials, running mean)` pairs
//! recorded while an estimation runs. It is the hand-off point to charting
//! tools: write it as CSV (`trials,mean`) or JSON and plot it elsewhere.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sim_core::{Result, SimError};

/// One recorded point of a running mean.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    /// Trials aggregated so far.
    pub trials: u64,
    /// Running mean after `trials` trials.
    pub mean: f64,
}

/// Running means recorded at a fixed stride.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceTrace {
    points: Vec<TracePoint>,
}

impl ConvergenceTrace {
    /// Empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point.
    pub fn record(&mut self, trials: u64, mean: f64) {
        self.points.push(TracePoint { trials, mean });
    }

    /// Recorded points in trial order.
    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last recorded point.
    pub fn last(&self) -> Option<&TracePoint> {
        self.points.last()
    }

    /// Applies `f` to every running mean, dropping the points where it has
    /// no value, e.g. to turn a crossing rate into a π estimate before
    /// plotting while no needle has crossed yet.
    #[must_use]
    pub fn filter_map_means<F: Fn(f64) -> Option<f64>>(&self, f: F) -> Self {
        Self {
            points: self
                .points
                .iter()
                .filter_map(|p| {
                    f(p.mean).map(|mean| TracePoint {
                        trials: p.trials,
                        mean,
                    })
                })
                .collect(),
        }
    }

    /// Writes the trace as CSV with a `trials,mean` header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in &self.points {
            csv_writer
                .serialize(point)
                .map_err(|e| SimError::Export(e.to_string()))?;
        }
        csv_writer
            .flush()
            .map_err(|e| SimError::Export(e.to_string()))
    }

    /// Serialises the trace as a JSON array of points.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.points).map_err(|e| SimError::Export(e.to_string()))
    }

    /// Saves the trace to `path`: JSON for a `.json` extension, CSV otherwise.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| SimError::Export(format!("{}: {}", path.display(), e)))?;
        let mut writer = BufWriter::new(file);

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let json = self.to_json()?;
            writer
                .write_all(json.as_bytes())
                .and_then(|_| writer.flush())
                .map_err(|e| SimError::Export(e.to_string()))
        } else {
            self.write_csv(writer)
        }
    }
}
