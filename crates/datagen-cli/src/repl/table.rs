use datagen_generate::Batch;

/// Rows printed before the table is truncated.
pub const MAX_PREVIEW_ROWS: usize = 25;

/// Plain-text table of the batch with aligned columns.
pub fn render_table(batch: &Batch, max_rows: usize) -> String {
    let header = batch.columns();
    if header.is_empty() {
        return "(no fields)\n".to_string();
    }

    let rows: Vec<Vec<String>> = batch
        .records
        .iter()
        .take(max_rows)
        .map(|record| {
            header
                .iter()
                .map(|label| {
                    record
                        .get(label)
                        .map(|value| value.to_string())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            rows.iter()
                .map(|row| row[idx].chars().count())
                .chain(std::iter::once(label.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&line(&header, &widths));
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&line(&rule, &widths));
    for row in &rows {
        out.push_str(&line(row, &widths));
    }
    if batch.len() > rows.len() {
        out.push_str(&format!("... {} more\n", batch.len() - rows.len()));
    }
    out
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}
