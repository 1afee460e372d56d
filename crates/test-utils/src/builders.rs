#![allow(dead_code)]

/// Builder for the metadata dump ffmpeg writes with `metadata=print:file=`.
///
/// Frame numbers are assigned in order, matching what the parser expects.
/// Use [`push_raw`](Self::push_raw) to inject malformed lines.
#[derive(Debug, Clone, Default)]
pub struct ArtifactBuilder {
    lines: Vec<String>,
    next_frame: usize,
    time_base_den: u64,
}

impl ArtifactBuilder {
    /// Timestamps are expressed with a 1/90000 time base, like MPEG-TS.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            next_frame: 0,
            time_base_den: 90_000,
        }
    }

    /// Append a well-formed timestamp/score pair.
    pub fn frame(mut self, pts_time: f64, score: f64) -> Self {
        let frame = self.next_frame;
        let pts = (pts_time * self.time_base_den as f64).round() as u64;
        self.lines
            .push(format!("frame:{frame:<4} pts:{pts:<7} pts_time:{pts_time}"));
        self.lines.push(format!("lavfi.scene_score={score:.6}"));
        self.next_frame += 1;
        self
    }

    /// Append `count` frames at `fps`, all scored with `score_of(index)`.
    pub fn frames_at(mut self, count: usize, fps: f64, score_of: impl Fn(usize) -> f64) -> Self {
        for _ in 0..count {
            let index = self.next_frame;
            self = self.frame(index as f64 / fps, score_of(index));
        }
        self
    }

    /// Append an arbitrary line without advancing the frame counter.
    pub fn push_raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The dump as ffmpeg writes it: newline-terminated lines.
    pub fn build(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
