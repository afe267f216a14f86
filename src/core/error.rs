/// Outcome taxonomy for one flip book run. Each kind maps to its own
/// user-visible message; an absent input video is the idle state of the
/// surface, not one of these.
#[derive(Debug, thiserror::Error)]
pub enum FlipbookError {
    /// The video could not be opened, or its metadata is unusable.
    #[error("could not read the video: {0}")]
    SourceUnreadable(String),

    /// The video opened but yielded no frames at all.
    #[error("no frames could be sampled from the video; try a different file")]
    EmptyResult,

    /// A decoded frame could not be persisted as a page image. A local I/O
    /// fault (unwritable directory, full disk), not a property of the video,
    /// so it must never masquerade as `EmptyResult`.
    #[error("failed to write page image: {0}")]
    PageWriteFailed(String),

    /// A page could not be read back while assembling the archive. Fatal for
    /// the run; partial archives are never returned.
    #[error("failed to assemble the flip book archive: {0}")]
    ArchiveBuildFailed(String),

    #[error("sampling interval must be greater than zero, got {0}")]
    InvalidInterval(f64),
}
