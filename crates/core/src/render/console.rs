use std::fmt::Write;

use serde_json::Value;

use crate::inference::client::InferenceResponse;
use crate::render::payload::{classify, ResponsePayload, Segment};
use crate::render::timecode::format_seconds;

/// Renders one terminal panel: a bordered box with the title in the top rule.
pub fn panel(title: &str, body: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count() + 2))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "╭─ {title} {}╮",
        "─".repeat(content_width - title.chars().count() - 1)
    );
    for line in &lines {
        let pad = content_width - line.chars().count();
        let _ = writeln!(out, "│ {line}{} │", " ".repeat(pad));
    }
    let _ = writeln!(out, "╰{}╯", "─".repeat(content_width + 2));
    out
}

/// Renders the segments table: 1-based index, formatted start/end, text.
pub fn segments_table(segments: &[Segment]) -> String {
    let rows: Vec<[String; 4]> = segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| {
            [
                (idx + 1).to_string(),
                format_seconds(segment.start),
                format_seconds(segment.end),
                segment.text.clone(),
            ]
        })
        .collect();

    let headers = ["#", "Start", "End", "Text"];
    let mut widths: [usize; 4] = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::from("Segments\n");
    let _ = writeln!(
        out,
        "{:>iw$}  {:<sw$}  {:<ew$}  {}",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        iw = widths[0],
        sw = widths[1],
        ew = widths[2],
    );
    let _ = writeln!(
        out,
        "{}  {}  {}  {}",
        "─".repeat(widths[0]),
        "─".repeat(widths[1]),
        "─".repeat(widths[2]),
        "─".repeat(widths[3]),
    );
    for row in &rows {
        let _ = writeln!(
            out,
            "{:>iw$}  {:<sw$}  {:<ew$}  {}",
            row[0],
            row[1],
            row[2],
            row[3],
            iw = widths[0],
            sw = widths[1],
            ew = widths[2],
        );
    }
    out
}

/// Renders a successful response: summary first, then transcript panel,
/// segment table, or raw JSON, in the fallback order of [`classify`].
pub fn render_response(response: &InferenceResponse) -> String {
    let mut out = summary_panel(response);

    match classify(&response.body) {
        ResponsePayload::Text(text) => {
            out.push_str(&panel("Transcript", text.trim()));
        }
        ResponsePayload::Result { result, raw } => {
            if let Some(text) = result.trimmed_text() {
                out.push_str(&panel("Transcript", text));
            }
            if !result.segments.is_empty() {
                out.push_str(&segments_table(&result.segments));
            } else {
                out.push_str(&json_panel(&raw));
            }
        }
        ResponsePayload::Unstructured(raw) => {
            out.push_str(&json_panel(&raw));
        }
    }
    out
}

fn summary_panel(response: &InferenceResponse) -> String {
    panel(
        "Request Summary",
        &format!(
            "Status: {}\nElapsed: {:.2}s",
            response.status_line(),
            response.elapsed.as_secs_f64()
        ),
    )
}

fn json_panel(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    panel("Response JSON", &pretty)
}
