use medialib_core::MediaItem;

/// Output format of the `inspect` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One-line summary of an item: type, dimensions, aspect ratio, title.
pub fn summary_line(item: &MediaItem) -> String {
    let dimensions = item
        .resolution()
        .map(|r| format!("{}x{}", r.width, r.height))
        .unwrap_or_else(|| "-".to_string());
    let aspect_ratio = item
        .aspect_ratio()
        .map(|ratio| ratio.as_str())
        .unwrap_or("-");

    format!(
        "{:<9} {:<12} {:<10} {}",
        item.media_type().as_str(),
        dimensions,
        aspect_ratio,
        truncate_string(item.title(), 40)
    )
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
