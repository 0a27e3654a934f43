//! iCalendar export of a study plan.
//!
//! Produces RFC 5545 text with one all-day `VEVENT` per study day. Days are
//! never merged or dropped, even when two days share a date.

use chrono::Duration;
use studyplan_store::{StudyDay, StudyPlan};

const PRODID: &str = "-//studyplan//Study Plan Export//EN";
const SUMMARY_MAX_CHARS: usize = 60;
const FOLD_OCTETS: usize = 75;

/// Render `plan` as an iCalendar document.
pub fn export_schedule_as_calendar(plan: &StudyPlan) -> String {
    let mut out = String::new();
    let stamp = plan.created_at.format("%Y%m%dT%H%M%SZ").to_string();

    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{PRODID}"));
    push_line(&mut out, "CALSCALE:GREGORIAN");

    for (index, day) in plan.days.iter().enumerate() {
        let end = day.date + Duration::days(1);
        push_line(&mut out, "BEGIN:VEVENT");
        push_line(&mut out, &format!("UID:{}-{index}@studyplan", plan.id));
        push_line(&mut out, &format!("DTSTAMP:{stamp}"));
        push_line(
            &mut out,
            &format!("DTSTART;VALUE=DATE:{}", day.date.format("%Y%m%d")),
        );
        push_line(&mut out, &format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")));
        push_line(&mut out, &format!("SUMMARY:{}", escape_text(&summary(day))));
        push_line(
            &mut out,
            &format!("DESCRIPTION:{}", escape_text(&description(day))),
        );
        push_line(&mut out, "END:VEVENT");
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

fn summary(day: &StudyDay) -> String {
    let prefix = if day.is_revision() { "Revision" } else { "Study" };
    let names: Vec<&str> = day.topics.iter().map(|t| t.topic_name.as_str()).collect();
    truncate_chars(&format!("{prefix}: {}", names.join(", ")), SUMMARY_MAX_CHARS)
}

fn description(day: &StudyDay) -> String {
    day.topics
        .iter()
        .map(|t| {
            let mut line = format!("{}: {}", t.unit_title, t.topic_name);
            if !t.subtopics.is_empty() {
                line.push_str(&format!(" ({})", t.subtopics.join(", ")));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Escape a TEXT value (RFC 5545 section 3.3.11).
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Append one content line, folded at 75 octets, terminated by CRLF.
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > FOLD_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}
