//! Report rendering over loaded event records.
//!
//! The JSON report sorts newest first; the CSV report keeps file order and
//! renders a fixed 12-column layout with no quoting.

use std::cmp::Ordering;

use crate::event::TrackEvent;

/// Column order shared by the CSV header and every row. Matches the field
/// order of [`TrackEvent`].
pub const COLUMNS: [&str; 12] = [
    "ts",
    "lead_id",
    "event",
    "step_index",
    "question",
    "choice",
    "score",
    "score_pct",
    "score_tag",
    "elapsed_ms",
    "href",
    "ua",
];

/// Sort newest first by parsed timestamp.
///
/// Stable: ties keep file order, and records whose `ts` does not parse sort
/// after every record whose `ts` does.
pub fn sort_newest_first(events: &mut [TrackEvent]) {
    events.sort_by(|a, b| match (a.parsed_ts(), b.parsed_ts()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Render the fixed 12-column CSV. Rows follow `events` order; the result
/// carries no trailing newline. An empty slice yields the header row only.
pub fn to_csv(events: &[TrackEvent]) -> String {
    let mut lines = vec![COLUMNS.join(",")];
    for event in events {
        let row = [
            sanitize(&event.ts),
            sanitize(&event.lead_id),
            sanitize(&event.event),
            sanitize(&event.step_index.as_text()),
            sanitize(&event.question),
            sanitize(&event.choice),
            sanitize(&event.score.as_text()),
            sanitize(&event.score_pct.as_text()),
            sanitize(&event.score_tag),
            sanitize(&event.elapsed_ms.as_text()),
            sanitize(&event.href),
            sanitize(&event.ua),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Fields are unquoted; every `\r`, `\n` or `,` inside a value becomes one
/// space so each record stays one row of twelve cells.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '\r' | '\n' | ',') { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NumberOrEmpty;

    fn event(ts: &str, name: &str) -> TrackEvent {
        TrackEvent {
            ts: ts.to_string(),
            event: name.to_string(),
            ..serde_json::from_str("{}").unwrap()
        }
    }

    #[test]
    fn sorts_newest_first_regardless_of_insert_order() {
        let mut events = vec![
            event("2026-08-26T10:00:02.000Z", "t2"),
            event("2026-08-26T10:00:01.000Z", "t3"),
            event("2026-08-26T10:00:03.000Z", "t1"),
        ];
        sort_newest_first(&mut events);
        let names: Vec<_> = events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(names, ["t1", "t2", "t3"]);
    }

    #[test]
    fn unparseable_timestamps_sort_last_and_ties_keep_order() {
        let mut events = vec![
            event("garbage", "bad1"),
            event("2026-08-26T10:00:01.000Z", "tie-a"),
            event("", "bad2"),
            event("2026-08-26T10:00:01.000Z", "tie-b"),
        ];
        sort_newest_first(&mut events);
        let names: Vec<_> = events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(names, ["tie-a", "tie-b", "bad1", "bad2"]);
    }

    #[test]
    fn empty_input_yields_header_only() {
        assert_eq!(
            to_csv(&[]),
            "ts,lead_id,event,step_index,question,choice,score,score_pct,score_tag,elapsed_ms,href,ua"
        );
    }

    #[test]
    fn rows_follow_file_order_not_timestamp_order() {
        let events =
            vec![event("2026-08-26T10:00:01.000Z", "old"), event("2026-08-26T10:00:02.000Z", "new")];
        let csv = to_csv(&events);
        let rows: Vec<_> = csv.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].contains("old"));
        assert!(rows[2].contains("new"));
    }

    #[test]
    fn commas_and_newlines_become_spaces() {
        let mut e = event("2026-08-26T10:00:01.000Z", "answer");
        e.question = "red, green,\nor blue?\r".to_string();
        let csv = to_csv(&[e]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("red  green  or blue? "));
        assert_eq!(row.split(',').count(), 12);
    }

    #[test]
    fn numeric_fields_render_as_numbers() {
        let mut e = event("2026-08-26T10:00:01.000Z", "step");
        e.step_index = NumberOrEmpty::Number(serde_json::Number::from(5));
        e.elapsed_ms = NumberOrEmpty::Number(serde_json::Number::from(1200));
        let csv = to_csv(&[e]);
        let row = csv.lines().nth(1).unwrap();
        let cells: Vec<_> = row.split(',').collect();
        assert_eq!(cells[3], "5");
        assert_eq!(cells[9], "1200");
        // defaulted numerics are empty cells
        assert_eq!(cells[6], "");
    }

    #[test]
    fn no_trailing_newline() {
        let csv = to_csv(&[event("2026-08-26T10:00:01.000Z", "x")]);
        assert!(!csv.ends_with('\n'));
    }
}
