use anyhow::{Context, Result};
use std::path::Path;
use tokio::process::Command;

const MIN_PROBED_SECONDS: f64 = 0.1;

pub async fn check_ffmpeg() -> bool {
    check_tool("ffmpeg").await && check_tool("ffprobe").await
}

async fn check_tool(name: &str) -> bool {
    match Command::new(name).arg("-version").output().await {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}

pub async fn ffprobe_duration_seconds(path: &Path) -> Result<f64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .await
        .with_context(|| format!("ffprobe duration failed: {}", path.display()))?;

    if !output.status.success() {
        anyhow::bail!("ffprobe failed for {}", path.display());
    }

    parse_duration_output(&String::from_utf8_lossy(&output.stdout))
        .with_context(|| format!("Invalid duration for {}", path.display()))
}

fn parse_duration_output(stdout: &str) -> Result<f64> {
    let text = stdout.trim();
    let duration: f64 = text
        .parse()
        .with_context(|| format!("unparseable ffprobe output {:?}", text))?;
    if !duration.is_finite() || duration <= MIN_PROBED_SECONDS {
        anyhow::bail!("duration {} out of range", duration);
    }
    Ok(duration)
}
