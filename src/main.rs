use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use feedform::{CodecConfig, Dialect, Feed};

/// SEC-014: Refuse to buffer more than this from stdin, whatever the config says.
const MAX_STDIN_BYTES: u64 = 256 * 1024 * 1024;

/// Replaces `dst` with `content` via a sibling temp file and a rename, so
/// readers see either the old feed or the new one.
fn atomic_write(dst: &Path, content: &[u8]) -> Result<()> {
    // SEC-009: Unpredictable temp name, opened with create_new so a planted
    // symlink makes the open fail instead of being followed.
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = dst.with_extension(format!("feedform.{:x}.{}", nonce, std::process::id()));

    let file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temporary file '{}'", temp_path.display()))?;

    // From here on the temp file is ours to clean up.
    let written = write_synced(file, &temp_path, content).and_then(|()| replace(&temp_path, dst));
    if written.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    written
}

fn write_synced(mut file: std::fs::File, path: &Path, content: &[u8]) -> Result<()> {
    file.write_all(content)
        .with_context(|| format!("Failed to write '{}': disk may be full", path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync '{}' to disk", path.display()))
}

fn replace(temp_path: &Path, dst: &Path) -> Result<()> {
    // rename() does not overwrite on Windows
    #[cfg(windows)]
    if dst.exists() {
        std::fs::remove_file(dst)
            .with_context(|| format!("Failed to remove existing '{}'", dst.display()))?;
    }
    std::fs::rename(temp_path, dst).with_context(|| {
        format!(
            "Failed to move '{}' into place at '{}'",
            temp_path.display(),
            dst.display()
        )
    })
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .take(MAX_STDIN_BYTES)
            .read_to_end(&mut bytes)
            .context("Failed to read feed from stdin")?;
        return Ok(bytes);
    }
    std::fs::read(path).with_context(|| format!("Failed to read feed file: {}", path.display()))
}

#[derive(Parser, Debug)]
#[command(
    name = "feedform",
    about = "Decode RSS, RDF, Atom and JSON feeds and write them back out"
)]
struct Args {
    /// Feed file to read, or "-" for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    input: PathBuf,

    /// Input dialect: rss, rdf, atom or json (guessed from the content when omitted)
    #[arg(long, short)]
    dialect: Option<Dialect>,

    /// Codec settings (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the re-encoded feed here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only decode, then print a one-line summary
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout may carry the encoded feed.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CodecConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CodecConfig::default(),
    };

    let bytes = read_input(&args.input)?;

    let dialect = match args.dialect {
        Some(dialect) => dialect,
        None => Dialect::sniff(&bytes).ok_or_else(|| {
            anyhow::anyhow!(
                "Could not tell which dialect '{}' is; pass --dialect",
                args.input.display()
            )
        })?,
    };
    tracing::debug!(dialect = %dialect, bytes = bytes.len(), "Decoding input");

    let feed = Feed::decode(dialect, &bytes, &config)
        .with_context(|| format!("Failed to decode '{}' as {}", args.input.display(), dialect))?;

    if args.check {
        println!(
            "{}: {} ({} items)",
            feed.dialect(),
            feed.title().unwrap_or("(untitled)"),
            feed.item_count()
        );
        return Ok(());
    }

    let encoded = feed.encode(&config).context("Failed to encode feed")?;

    match &args.output {
        Some(path) => {
            atomic_write(path, &encoded)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = encoded.len(), "Wrote feed");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&encoded).context("Failed to write to stdout")?;
            stdout.write_all(b"\n").context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
