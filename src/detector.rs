// PoseMatch 🕺 MIT License

//! Pose detection seam.
//!
//! Detection itself is an external capability: anything that can produce
//! [`Skeleton`] observations implements [`PoseDetector`] and plugs into the
//! game runner. The detector owns its frame acquisition; the engine only
//! sees the resulting skeletons.
//!
//! Two integration paths ship here: an adapter from the `(N, K, 3)` keypoint
//! arrays pose models emit, and [`ReplayDetector`] for recorded streams.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array3;

use crate::error::{GameError, Result};
use crate::keypoint::{Keypoint, KeypointName, Skeleton};

/// Supplies one detection pass per evaluation tick.
pub trait PoseDetector {
    /// Run detection on the current frame.
    ///
    /// Zero or one primary skeleton is expected; when several are returned
    /// the engine uses only the first. An empty vector is a valid
    /// "nothing detected this tick" answer, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the detector can no longer produce
    /// observations: [`GameError::StreamEnded`] for an exhausted recording,
    /// [`GameError::DetectorError`] for environment failures.
    fn estimate(&mut self) -> Result<Vec<Skeleton>>;
}

/// Convert a pose model's raw keypoint array into named skeletons.
///
/// `data` has shape `(N, K, 3)` with `[x, y, score]` per keypoint and rows
/// in COCO index order, the layout YOLO-style pose models emit. Rows beyond
/// the 17 named landmarks are ignored.
#[must_use]
pub fn skeletons_from_array(data: &Array3<f32>) -> Vec<Skeleton> {
    let shape = data.shape();
    let (count, rows) = (shape[0], shape[1].min(KeypointName::ALL.len()));

    (0..count)
        .map(|i| {
            Skeleton::new(
                (0..rows)
                    .map(|k| {
                        Keypoint::new(
                            KeypointName::ALL[k],
                            data[[i, k, 0]],
                            data[[i, k, 1]],
                            data[[i, k, 2]],
                        )
                    })
                    .collect(),
            )
        })
        .collect()
}

/// [`PoseDetector`] over a recorded pose stream.
///
/// The format is JSON lines: each line is one detection pass, serialized as
/// an array of skeletons. A blank line (or empty array) is a tick with no
/// detection. When the recording runs out, `estimate` answers
/// [`GameError::StreamEnded`].
pub struct ReplayDetector<R> {
    reader: R,
    line: String,
}

impl ReplayDetector<BufReader<File>> {
    /// Open a recorded stream from a `.jsonl` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            GameError::DetectorError(format!("cannot open {}: {e}", path.as_ref().display()))
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplayDetector<R> {
    /// Wrap any buffered reader producing the JSON-lines format.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> PoseDetector for ReplayDetector<R> {
    fn estimate(&mut self) -> Result<Vec<Skeleton>> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Err(GameError::StreamEnded);
        }

        let line = self.line.trim();
        if line.is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(line)?)
    }
}
