//! Tab-separated export of the row table.

use crate::rows::Row;

/// Header line of the export, without the trailing newline.
pub const EXPORT_HEADER: &str = "No\tProblem\tSolution\tTime Range\tDuration";

/// Serialize rows as a tab-separated block, one `\n`-terminated line each.
pub fn rows_to_tsv(rows: &[Row]) -> String {
    let mut out = String::with_capacity(64 * (rows.len() + 1));
    out.push_str(EXPORT_HEADER);
    out.push('\n');

    for row in rows {
        let cells = [
            row.ordinal.to_string(),
            clean_cell(&row.problem),
            clean_cell(&row.solution),
            row.time_range.clone(),
            row.duration.clone(),
        ];
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

/// Tabs and line breaks inside a cell would split the row.
fn clean_cell(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LunchBreak;
    use crate::marker::MarkerId;
    use crate::model::TimelineModel;
    use crate::rows::FirstRowPolicy;
    use crate::time::TimeRange;

    fn three_marker_model() -> TimelineModel {
        TimelineModel::new(
            TimeRange::new(7.0, 17.0),
            LunchBreak::default(),
            FirstRowPolicy::BoundaryOnly,
            &[0.0, 50.0, 100.0],
        )
        .unwrap()
    }

    #[test]
    fn test_export_three_markers() {
        let model = three_marker_model();
        assert_eq!(
            model.export_tsv(),
            "No\tProblem\tSolution\tTime Range\tDuration\n\
             1\t\t\t07:00 - 12:00\t05:00\n\
             2\t\t\t12:00 - 17:00\t05:00\n"
        );
    }

    #[test]
    fn test_export_includes_annotations() {
        let mut model = three_marker_model();
        model.set_problem(MarkerId(2), "late bus").unwrap();
        model.set_solution(MarkerId(2), "left earlier").unwrap();

        let tsv = model.export_tsv();
        let second = tsv.lines().nth(1).unwrap();
        assert_eq!(second, "1\tlate bus\tleft earlier\t07:00 - 12:00\t05:00");
    }

    #[test]
    fn test_export_keeps_row_structure_with_tabs_in_text() {
        let mut model = three_marker_model();
        model.set_problem(MarkerId(3), "a\tb\nc").unwrap();

        let tsv = model.export_tsv();
        assert_eq!(tsv.lines().count(), 3);
        for line in tsv.lines() {
            assert_eq!(line.split('\t').count(), 5);
        }
        assert!(tsv.contains("a b c"));
    }

    #[test]
    fn test_export_header_only_for_no_rows() {
        assert_eq!(rows_to_tsv(&[]), format!("{EXPORT_HEADER}\n"));
    }
}
