use std::io::Write;
use std::path::Path;

use anyhow::Context;

use studyplan_core::StudyPlanner;
use studyplan_store::PlanStore;

/// Export the active plan's schedule as iCalendar text.
pub fn run_export_ics<S: PlanStore>(
    planner: &StudyPlanner<S>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let ics = planner
        .export_calendar()
        .context("nothing to export; generate a plan first")?;

    let mut writer: Box<dyn Write> = if let Some(path) = output {
        Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create output file: {}", path.display()))?,
        )
    } else {
        Box::new(std::io::stdout().lock())
    };

    writer.write_all(ics.as_bytes())?;
    writer.flush()?;

    if let Some(path) = output {
        let events = ics.matches("BEGIN:VEVENT").count();
        tracing::info!(path = %path.display(), events, "exported calendar");
        println!("Exported {events} events to {}", path.display());
    }

    Ok(())
}
