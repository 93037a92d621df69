//! Plain-text rendering for CLI output

use crate::models::{CommandResult, ParsedData, Pod};

const COLUMN_GAP: &str = "   ";

/// Left-aligned table with a header row; trailing whitespace is trimmed
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        padded.join(COLUMN_GAP).trim_end().to_string()
    };

    let mut lines = vec![render_row(headers.to_vec())];
    lines.extend(
        rows.iter()
            .map(|row| render_row(row.iter().map(String::as_str).collect())),
    );
    lines.join("\n")
}

/// Pod table in the familiar `kubectl get pods` layout
pub fn pods_table(pods: &[Pod]) -> String {
    let rows: Vec<Vec<String>> = pods
        .iter()
        .map(|pod| {
            vec![
                pod.name.clone(),
                pod.ready.clone(),
                pod.status.clone(),
                pod.restarts.to_string(),
                pod.age.clone(),
                pod.node.clone(),
                if pod.has_owner { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();

    table(
        &["NAME", "READY", "STATUS", "RESTARTS", "AGE", "NODE", "OWNED"],
        &rows,
    )
}

/// Human output for a result: decoded data when present, raw stdout otherwise
pub fn render_result(result: &CommandResult) -> String {
    match &result.parsed_data {
        Some(ParsedData::Contexts(names)) => names.join("\n"),
        Some(ParsedData::CurrentContext(name)) => name.clone(),
        Some(ParsedData::Namespaces(namespaces)) => namespaces
            .iter()
            .map(|ns| ns.name.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        Some(ParsedData::Pods(pods)) if pods.is_empty() => "No pods found.".to_string(),
        Some(ParsedData::Pods(pods)) => pods_table(pods),
        None => result.stdout.trim_end().to_string(),
    }
}

/// One line per transcript entry, oldest first
pub fn transcript_lines(entries: &[CommandResult]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "$ {}  [exit {}, {}ms]",
                entry.command, entry.exit_code, entry.duration_ms
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
