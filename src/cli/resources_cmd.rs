//! `campusdl resources --course <id|code>` — list a course's resources.

use super::{connect, find_course, output, Credentials};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct ResourceRow<'a> {
    id: Option<u64>,
    url: &'a str,
}

/// Run the resources command.
pub async fn run(creds: &Credentials, course_key: &str) -> Result<()> {
    let session = connect(creds).await?;
    let course = find_course(&session, course_key).await?;
    let resources = course.resources().await?;

    if output::is_json() {
        let rows: Vec<ResourceRow<'_>> = resources
            .iter()
            .map(|r| ResourceRow {
                id: r.id(),
                url: r.url(),
            })
            .collect();
        output::print_json(&serde_json::json!({
            "course": course.code(),
            "resources": rows,
        }));
        return Ok(());
    }

    if resources.is_empty() {
        if !output::is_quiet() {
            let s = output::Styled::new();
            println!(
                "  {} {} has no downloadable resources.",
                s.warn_sym(),
                course.code()
            );
        }
        return Ok(());
    }

    for resource in resources {
        match resource.id() {
            Some(id) => println!("{id:>8}  {}", resource.url()),
            None => println!("{:>8}  {}", "-", resource.url()),
        }
    }
    Ok(())
}
