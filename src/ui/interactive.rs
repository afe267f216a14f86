use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::archiver;
use crate::core::sampler;
use crate::core::source::VideoSource;
use crate::core::workspace::Workspace;

const INTERVAL_PRESETS: &[f64] = &[0.1, 0.2, 0.3, 0.5, 1.0, 1.5, 2.0];
const DEFAULT_INTERVAL: f64 = 0.5;
const PREVIEW_PAGES: usize = 5;

pub fn run(videos_dir: &Path) -> Result<()> {
    // 1. Scan for video files
    if !videos_dir.exists() {
        fs::create_dir_all(videos_dir)
            .with_context(|| format!("failed to create {}", videos_dir.display()))?;
    }

    let mut videos: Vec<PathBuf> = fs::read_dir(videos_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            matches!(ext.as_str(), "mp4" | "mov" | "avi" | "mkv")
        })
        .collect();

    videos.sort();

    // An empty directory is the idle state, not an error
    if videos.is_empty() {
        println!(
            "ℹ️  No videos in {} yet. Drop a file there to begin.",
            videos_dir.display()
        );
        return Ok(());
    }

    // 2. Select video
    let video_names: Vec<String> = videos
        .iter()
        .map(|p| p.file_name().unwrap_or_default().to_string_lossy().to_string())
        .collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("🎬 Pick a video")
        .default(0)
        .items(&video_names)
        .interact()?;

    let selected_video = &videos[selection];

    // 3. Select sampling interval
    let interval_labels: Vec<String> = INTERVAL_PRESETS
        .iter()
        .map(|t| format!("{t:.1} s between pages"))
        .collect();
    let default_idx = INTERVAL_PRESETS
        .iter()
        .position(|&t| t == DEFAULT_INTERVAL)
        .unwrap_or(0);

    println!("ℹ️  A smaller interval means more pages");
    let interval_selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("⏱️  Pick a sampling interval")
        .default(default_idx)
        .items(&interval_labels)
        .interact()?;

    let interval = INTERVAL_PRESETS[interval_selection];

    // 4. Sample frames into a scratch workspace
    let workspace = Workspace::new().context("failed to create workspace")?;

    let source = match VideoSource::open(selected_video) {
        Ok(source) => source,
        Err(e) => {
            println!("❌ {e}");
            return Ok(());
        }
    };

    println!("🚀 Sampling {} ...", video_names[selection]);
    let pages = match sampler::sample_frames(source, interval, workspace.pages_dir()) {
        Ok(pages) => pages,
        Err(e) => {
            println!("❌ {e}");
            return Ok(());
        }
    };

    println!("✅ Extracted {} pages for your flip book.", pages.len());

    // 5. Preview the first few pages
    println!("\n📖 Preview:");
    for page in pages.iter().take(PREVIEW_PAGES) {
        let size_kib = fs::metadata(&page.path).map(|m| m.len() / 1024).unwrap_or(0);
        println!(
            "   page {:>4}  {}  ({} KiB)",
            page.seq,
            page.path.file_name().unwrap_or_default().to_string_lossy(),
            size_kib
        );
    }
    if pages.len() > PREVIEW_PAGES {
        println!("   ... and {} more", pages.len() - PREVIEW_PAGES);
    }

    // 6. Archive and write to the chosen output directory
    let out_dir: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("📂 Output directory for flip_book.zip")
        .default(".".to_string())
        .interact_text()?;
    let out_dir = PathBuf::from(out_dir);
    if !out_dir.exists() {
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
    }

    let archive = archiver::build_archive(&pages)?;
    let output = out_dir.join("flip_book.zip");
    fs::write(&output, &archive)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("\n⬇️  Flip book written to {}", output.display());

    println!("\nHow to use your flip book:");
    println!("1. Extract the ZIP archive");
    println!("2. Print the pages (card stock keeps them stiff)");
    println!("3. Cut the pages out and stack them in order");
    println!("4. Bind one edge with staples or a clip");
    println!("5. Flip through the pages to watch the animation");

    Ok(())
}
