//! `campusdl courses` — list the dashboard's courses.

use super::{connect, output, Credentials};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct CourseRow<'a> {
    code: &'a str,
    id: Option<u64>,
    url: &'a str,
}

/// Run the courses command.
pub async fn run(creds: &Credentials) -> Result<()> {
    let session = connect(creds).await?;
    let courses = session.courses().await?;

    if output::is_json() {
        let rows: Vec<CourseRow<'_>> = courses
            .iter()
            .map(|c| CourseRow {
                code: c.code(),
                id: c.id(),
                url: c.url(),
            })
            .collect();
        output::print_json(&serde_json::json!({ "courses": rows }));
        return Ok(());
    }

    if courses.is_empty() {
        if !output::is_quiet() {
            let s = output::Styled::new();
            println!("  {} No courses found on the dashboard.", s.warn_sym());
        }
        return Ok(());
    }

    for course in courses {
        match course.id() {
            Some(id) => println!("{:<10} {:>8}  {}", course.code(), id, course.url()),
            None => println!("{:<10} {:>8}  {}", course.code(), "-", course.url()),
        }
    }
    Ok(())
}
