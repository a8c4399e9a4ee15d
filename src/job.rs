use crate::config::TimelineConfig;
use crate::ingest::{self, DurationProbe};
use crate::render;
use crate::sequence::TimelinePlan;
use crate::session::AuthoringSession;
use crate::{logi, logok, logw};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

const MANIFEST_FILE: &str = "timeline.json";
const CONCAT_FILE: &str = "concat_list.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    pub media: Vec<PathBuf>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub script_file: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("render")
}

impl JobSpec {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read job: {}", path.as_ref().display()))?;
        let job: JobSpec = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse job: {}", path.as_ref().display()))?;

        if job.script.is_some() && job.script_file.is_some() {
            anyhow::bail!("job: set either script or script_file, not both");
        }
        Ok(job)
    }

    async fn script_text(&self) -> Result<String> {
        if let Some(text) = &self.script {
            return Ok(text.clone());
        }
        match &self.script_file {
            Some(path) => fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read script: {}", path.display())),
            None => Ok(String::new()),
        }
    }
}

/// Builds the plan for one job and writes the render inputs next to it.
///
/// Rejected uploads are skipped with a warning; the job fails only on I/O.
pub async fn run_job<P: DurationProbe>(
    job: &JobSpec,
    config: TimelineConfig,
    probe: &P,
) -> Result<TimelinePlan> {
    let mut session = AuthoringSession::new(config)?;

    for path in &job.media {
        if let Err(err) = ingest::ingest_file(&mut session, probe, path).await {
            logw(format!("{:#}", err));
        }
    }
    if session.is_empty() {
        logw("No usable media in job; plan is narration-only.");
    }

    session.set_script(job.script_text().await?);

    let plan = session.plan();
    logok(format!(
        "Plan: {} item(s), target {:.1}s (media: {}; script: {})",
        plan.items.len(),
        plan.target_duration_seconds,
        if plan.media.detail.is_empty() { "none" } else { plan.media.detail.as_str() },
        if plan.script.detail.is_empty() { "none" } else { plan.script.detail.as_str() },
    ));

    fs::create_dir_all(&job.output_dir)
        .await
        .with_context(|| format!("Failed to create dir {}", job.output_dir.display()))?;

    let manifest = render::manifest(&plan, session.config());
    let manifest_path = job.output_dir.join(MANIFEST_FILE);
    render::write_manifest(&manifest_path, &manifest).await?;
    logi(format!("Wrote manifest: {}", manifest_path.display()));

    let concat_path = job.output_dir.join(CONCAT_FILE);
    render::write_concat_list(&concat_path, &manifest.segments).await?;
    logi(format!("Wrote concat list: {}", concat_path.display()));

    Ok(plan)
}
