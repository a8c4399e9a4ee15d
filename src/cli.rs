use anyhow::Result;
use shorts_timeline::config::TimelineConfig;
use shorts_timeline::ffmpeg;
use shorts_timeline::ingest::FfprobeDuration;
use shorts_timeline::job::{self, JobSpec};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let job_path = args.next().unwrap_or_else(|| "job.json".to_string());
    let config_path = args.next().unwrap_or_else(|| "timeline.json".to_string());

    if !ffmpeg::check_ffmpeg().await {
        eprintln!("[WARNING] ffprobe not found in PATH; videos will use the default duration.");
    }

    let config = TimelineConfig::load_or_default(&config_path).await?;
    let job = JobSpec::load(&job_path).await?;
    let plan = job::run_job(&job, config, &FfprobeDuration).await?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
