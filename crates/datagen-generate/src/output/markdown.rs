use datagen_core::Record;

use crate::session::columns;

/// Markdown document holding the batch as a pipe table.
pub fn records_to_markdown(records: &[Record]) -> Vec<u8> {
    let header = columns(records);
    let mut out = String::from("# Generated records\n\n");
    if header.is_empty() {
        out.push_str("_No records._\n");
        return out.into_bytes();
    }

    out.push_str(&row(header.iter().map(String::as_str)));
    out.push_str(&row(header.iter().map(|_| "---")));
    for record in records {
        let cells: Vec<String> = header
            .iter()
            .map(|label| {
                record
                    .get(label)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
            .collect();
        out.push_str(&row(cells.iter().map(String::as_str)));
    }
    out.push_str(&format!("\n{} record(s)\n", records.len()));
    out.into_bytes()
}

fn row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let cells: Vec<String> = cells.map(escape).collect();
    format!("| {} |\n", cells.join(" | "))
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}
