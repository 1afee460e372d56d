use std::time::Duration;

/// One frame of the scene-change time series.
///
/// There is deliberately no frame number field: a record's frame index is
/// its position in the sequence returned by the extractor. The parser checks
/// that position against the `frame:` field the tool prints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRecord {
    time: Duration,
    scene_score: f64,
}

impl FrameRecord {
    pub(crate) fn new(time: Duration, scene_score: f64) -> Self {
        Self { time, scene_score }
    }

    /// Presentation timestamp of the frame.
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Scene-change score, `>= 0`. Higher means a likelier cut.
    pub fn scene_score(&self) -> f64 {
        self.scene_score
    }
}
