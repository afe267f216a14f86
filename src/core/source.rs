use opencv::prelude::*;
use opencv::videoio;
use std::path::Path;
use tracing::debug;

use super::error::FlipbookError;

/// Interface between the sampler and the concrete decoder.
///
/// Implementations report the stream metadata a run is planned from and
/// decode single frames by absolute index.
pub trait FrameSource {
    fn frame_rate(&self) -> f64;

    fn total_frames(&self) -> i64;

    /// Seeks to an absolute frame index and decodes that one frame.
    /// `None` means the seek or the decode failed; the sampler treats that as
    /// end-of-stream rather than an error.
    fn decode_at(&mut self, index: i64) -> Option<Mat>;
}

/// An opened video plus the metadata needed to plan a sampling run.
/// Owned for the duration of one run only.
#[derive(Debug)]
pub struct VideoSource {
    capture: videoio::VideoCapture,
    frame_rate: f64,
    total_frames: i64,
}

impl VideoSource {
    /// Opens a video file and reads its frame rate and frame count.
    ///
    /// CAP_ANY lets OpenCV pick the platform backend. A missing path, a
    /// corrupt file or an unsupported codec all surface as `SourceUnreadable`,
    /// as does a reported frame rate of zero (which would otherwise poison the
    /// stride computation).
    pub fn open(path: &Path) -> Result<Self, FlipbookError> {
        let unreadable =
            |reason: String| FlipbookError::SourceUnreadable(format!("{}: {reason}", path.display()));

        let capture = videoio::VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)
            .map_err(|e| unreadable(e.to_string()))?;

        if !capture.is_opened().map_err(|e| unreadable(e.to_string()))? {
            return Err(unreadable("failed to open video file".to_string()));
        }

        let frame_rate = capture
            .get(videoio::CAP_PROP_FPS)
            .map_err(|e| unreadable(e.to_string()))?;
        let total_frames = capture
            .get(videoio::CAP_PROP_FRAME_COUNT)
            .map_err(|e| unreadable(e.to_string()))? as i64;

        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(unreadable(format!("unusable frame rate ({frame_rate})")));
        }

        debug!(fps = frame_rate, frames = total_frames, "opened video source");

        Ok(Self {
            capture,
            frame_rate,
            total_frames,
        })
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn total_frames(&self) -> i64 {
        self.total_frames
    }

    pub fn duration_seconds(&self) -> f64 {
        self.total_frames as f64 / self.frame_rate
    }
}

impl FrameSource for VideoSource {
    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn total_frames(&self) -> i64 {
        self.total_frames
    }

    fn decode_at(&mut self, index: i64) -> Option<Mat> {
        let seeked = self
            .capture
            .set(videoio::CAP_PROP_POS_FRAMES, index as f64)
            .unwrap_or(false);
        if !seeked {
            return None;
        }

        let mut frame = Mat::default();
        match self.capture.read(&mut frame) {
            Ok(true) if !frame.empty() => Some(frame),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_source_unreadable() {
        let err = VideoSource::open(Path::new("/nonexistent/clip.mp4")).unwrap_err();
        assert!(matches!(err, FlipbookError::SourceUnreadable(_)));
    }

    #[test]
    fn garbage_file_is_source_unreadable_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_video.mp4");
        fs::write(&path, b"this is definitely not an mp4").unwrap();

        let err = VideoSource::open(&path).unwrap_err();
        assert!(matches!(err, FlipbookError::SourceUnreadable(_)));
    }
}
