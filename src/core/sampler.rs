use opencv::core::Vector;
use opencv::imgcodecs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::FlipbookError;
use super::source::FrameSource;

/// One flip book page: a decoded frame persisted as a JPEG, plus its 1-based
/// position in the book.
#[derive(Debug)]
pub struct SampledFrame {
    pub seq: u32,
    pub path: PathBuf,
}

/// Number of source frames to skip between samples.
///
/// Rounds half away from zero, which keeps the selected frame within half a
/// source frame of the requested time, and never drops below one frame so the
/// loop always advances.
pub fn stride_for(frame_rate: f64, interval: f64) -> i64 {
    ((frame_rate * interval).round() as i64).max(1)
}

/// Pages a run over `total_frames` frames with the given stride will produce.
pub fn expected_pages(total_frames: i64, stride: i64) -> i64 {
    if total_frames <= 0 {
        return 0;
    }
    (total_frames + stride - 1) / stride
}

/// Zero-padded so lexicographic order equals page order.
pub fn page_file_name(seq: u32) -> String {
    format!("page_{seq:04}.jpg")
}

/// Decodes one frame every `interval` seconds of `source` and writes each as a
/// JPEG page under `pages_dir`, named `page_0001.jpg`, `page_0002.jpg`, ...
///
/// A decode failure partway through ends the run early and the pages written
/// so far are a valid result. A run that yields no pages at all reports
/// `EmptyResult`, so the caller can tell a video that opened but produced
/// nothing from one that never opened. Failing to *persist* a decoded frame
/// is neither of those: that is a local I/O fault and fails the run with
/// `PageWriteFailed`.
pub fn sample_frames<S: FrameSource>(
    mut source: S,
    interval: f64,
    pages_dir: &Path,
) -> Result<Vec<SampledFrame>, FlipbookError> {
    if !(interval > 0.0) {
        return Err(FlipbookError::InvalidInterval(interval));
    }

    let stride = stride_for(source.frame_rate(), interval);
    let total = source.total_frames();
    info!(stride, total, interval, "sampling frames");

    let mut pages: Vec<SampledFrame> = Vec::new();
    let mut position: i64 = 0;

    while position < total {
        let Some(frame) = source.decode_at(position) else {
            debug!(position, "decode stopped early, keeping pages written so far");
            break;
        };

        let seq = pages.len() as u32 + 1;
        let path = pages_dir.join(page_file_name(seq));
        let written = imgcodecs::imwrite(&path.to_string_lossy(), &frame, &Vector::new())
            .map_err(|e| FlipbookError::PageWriteFailed(format!("{}: {e}", path.display())))?;
        if !written {
            return Err(FlipbookError::PageWriteFailed(format!(
                "{}: encoder refused the page",
                path.display()
            )));
        }

        pages.push(SampledFrame { seq, path });
        position += stride;
    }

    if pages.is_empty() {
        return Err(FlipbookError::EmptyResult);
    }

    info!(pages = pages.len(), "sampling finished");
    Ok(pages)
}
