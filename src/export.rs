//! Markdown concatenation of a record collection.

use crate::record::Record;

/// Concatenate records into one Markdown document, sorted by timestamp
/// ascending.
///
/// Aware and naive timestamps compare on a single naive-UTC basis. Records
/// without a timestamp keep their input order after all dated records. Each
/// record renders as a heading with its body, separated by a horizontal
/// rule.
pub fn notes_to_markdown(records: &[Record]) -> String {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by_key(|record| match record.timestamp {
        Some(ts) => (0u8, Some(ts.naive_utc())),
        None => (1u8, None),
    });

    let mut content = String::new();
    for record in sorted {
        content.push_str(&format!(
            "# {}\n\n{}\n\n---\n\n",
            record.title, record.text_content
        ));
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_timestamp;

    fn dated(title: &str, date: Option<&str>) -> Record {
        Record {
            identifier: format!("{title}.md"),
            title: title.to_string(),
            text_content: format!("{title} body"),
            timestamp: date.and_then(parse_timestamp),
            ..Default::default()
        }
    }

    #[test]
    fn sorts_by_timestamp_ascending() {
        let records = vec![
            dated("Later", Some("2025-02-01")),
            dated("Earlier", Some("2025-01-01")),
        ];
        let markdown = notes_to_markdown(&records);
        let earlier = markdown.find("# Earlier").unwrap();
        let later = markdown.find("# Later").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn undated_records_sort_last_in_input_order() {
        let records = vec![
            dated("NoDateA", None),
            dated("Dated", Some("2025-01-01")),
            dated("NoDateB", None),
        ];
        let markdown = notes_to_markdown(&records);
        let dated_pos = markdown.find("# Dated").unwrap();
        let a = markdown.find("# NoDateA").unwrap();
        let b = markdown.find("# NoDateB").unwrap();
        assert!(dated_pos < a && a < b);
    }

    #[test]
    fn aware_and_naive_timestamps_share_a_comparison_basis() {
        // 02:00+03:00 is 23:00 UTC the previous day, before 08:00 naive.
        let records = vec![
            dated("Naive", Some("2025-01-02 08:00")),
            dated("Aware", Some("2025-01-02T02:00:00+03:00")),
        ];
        let markdown = notes_to_markdown(&records);
        assert!(markdown.find("# Aware").unwrap() < markdown.find("# Naive").unwrap());
    }

    #[test]
    fn renders_heading_body_and_rule() {
        let markdown = notes_to_markdown(&[dated("Solo", Some("2025-01-01"))]);
        assert_eq!(markdown, "# Solo\n\nSolo body\n\n---\n\n");
    }
}
