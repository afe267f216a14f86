use std::fs::File;
use std::io::{self, Cursor};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::error::FlipbookError;
use super::sampler::SampledFrame;

/// Packs the page files into a single in-memory ZIP, one entry per page under
/// its base file name (no directories), in page order.
///
/// Pages are JPEGs, already compressed at the codec level; the deflate layer
/// is a lossless container, so extracting the archive gives back every page
/// byte-identical. Any read failure aborts the whole build — by this point
/// every page has been decoded once, so a vanished file is a real fault, not
/// something to paper over with a partial archive.
pub fn build_archive(pages: &[SampledFrame]) -> Result<Vec<u8>, FlipbookError> {
    let failed = |page: &SampledFrame, reason: String| {
        FlipbookError::ArchiveBuildFailed(format!("{}: {reason}", page.path.display()))
    };

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for page in pages {
        let name = page
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| failed(page, "page path has no file name".to_string()))?;

        let mut file = File::open(&page.path).map_err(|e| failed(page, e.to_string()))?;
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| failed(page, e.to_string()))?;
        io::copy(&mut file, &mut writer).map_err(|e| failed(page, e.to_string()))?;

        debug!(entry = %name, "added page to archive");
    }

    let cursor = writer
        .finish()
        .map_err(|e| FlipbookError::ArchiveBuildFailed(e.to_string()))?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampler::page_file_name;
    use std::fs;
    use std::io::Read;
    use std::path::Path;

    fn fake_pages(dir: &Path, count: u32) -> Vec<SampledFrame> {
        (1..=count)
            .map(|seq| {
                let path = dir.join(page_file_name(seq));
                fs::write(&path, format!("jpeg bytes for page {seq}")).unwrap();
                SampledFrame { seq, path }
            })
            .collect()
    }

    #[test]
    fn archive_preserves_order_names_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let pages = fake_pages(dir.path(), 20);

        let bytes = build_archive(&pages).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 20);

        for (i, page) in pages.iter().enumerate() {
            let mut entry = archive.by_index(i).unwrap();
            assert_eq!(entry.name(), page_file_name(page.seq));

            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            assert_eq!(content, fs::read(&page.path).unwrap());
        }
    }

    #[test]
    fn empty_input_gives_an_empty_but_valid_archive() {
        let bytes = build_archive(&[]).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn unreadable_page_fails_the_whole_build() {
        let dir = tempfile::tempdir().unwrap();
        let mut pages = fake_pages(dir.path(), 3);
        pages[1].path = dir.path().join("vanished.jpg");

        let err = build_archive(&pages).unwrap_err();
        assert!(matches!(err, FlipbookError::ArchiveBuildFailed(_)));
    }
}
