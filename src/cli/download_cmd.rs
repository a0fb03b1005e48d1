//! `campusdl download --course <id|code>` — download course resources.

use super::{connect, find_course, output, Credentials};
use crate::resource::Resource;
use anyhow::{bail, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Run the download command. Downloads every resource of the course, or
/// just `--resource <id>`, into `out` with up to `jobs` transfers in
/// flight.
pub async fn run(
    creds: &Credentials,
    course_key: &str,
    resource_id: Option<u64>,
    out: &Path,
    jobs: usize,
) -> Result<()> {
    let s = output::Styled::new();
    let session = connect(creds).await?;
    let course = find_course(&session, course_key).await?;
    let resources = course.resources().await?;

    let targets: Vec<&Resource> = match resource_id {
        Some(id) => resources.iter().filter(|r| r.id() == Some(id)).collect(),
        None => resources.iter().collect(),
    };
    if targets.is_empty() {
        match resource_id {
            Some(id) => bail!("resource {id} not found in {}", course.code()),
            None => bail!("{} has no downloadable resources", course.code()),
        }
    }

    let bar = if output::is_quiet() || output::is_json() {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(targets.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                .expect("progress template is valid"),
        );
        bar
    };

    let results: Vec<(String, crate::PortalResult<u64>)> = stream::iter(targets)
        .map(|resource| {
            let bar = bar.clone();
            async move {
                let result = resource.download(Some(out), None).await;
                bar.inc(1);
                (resource.url().to_string(), result)
            }
        })
        .buffer_unordered(jobs.max(1))
        .collect()
        .await;
    bar.finish_and_clear();

    let mut total_bytes = 0u64;
    let mut failures = Vec::new();
    for (url, result) in &results {
        match result {
            Ok(bytes) => total_bytes += bytes,
            Err(e) => failures.push((url.as_str(), e.to_string())),
        }
    }

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "course": course.code(),
            "downloaded": results.len() - failures.len(),
            "bytes": total_bytes,
            "failures": failures
                .iter()
                .map(|(url, error)| serde_json::json!({ "url": url, "error": error }))
                .collect::<Vec<_>>(),
        }));
    } else if !output::is_quiet() {
        println!(
            "  {} {} file(s), {total_bytes} bytes -> {}",
            s.ok_sym(),
            results.len() - failures.len(),
            out.display()
        );
        for (url, error) in &failures {
            eprintln!("  {} {url}: {error}", s.err_sym());
        }
    }

    if !failures.is_empty() {
        bail!("{} of {} download(s) failed", failures.len(), results.len());
    }
    Ok(())
}
