//! Column layout for help topic lists.
//!
//! Names fill columns top to bottom, using the fewest rows that fit the
//! display width, with two spaces between columns.

/// Lay out `items` in as few rows as fit within `display_width`.
///
/// An empty list renders as `<empty>`. Every row ends with a newline.
#[must_use]
pub fn columnize(items: &[&str], display_width: usize) -> String {
    match items {
        [] => return "<empty>\n".to_string(),
        [only] => return format!("{only}\n"),
        _ => {}
    }

    let size = items.len();
    let (rows, widths) = fit_rows(items, display_width).unwrap_or((size, vec![0]));
    let cols = widths.len();

    let mut out = String::new();
    for row in 0..rows {
        let mut texts: Vec<&str> = (0..cols)
            .map(|col| items.get(row + rows * col).copied().unwrap_or(""))
            .collect();
        while texts.last().is_some_and(|t| t.is_empty()) {
            texts.pop();
        }
        let line = texts
            .iter()
            .zip(&widths)
            .map(|(text, &width)| format!("{text:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Smallest row count whose layout fits, with the column widths it needs.
///
/// Every column is padded to its width, the last one included.
fn fit_rows(items: &[&str], display_width: usize) -> Option<(usize, Vec<usize>)> {
    let size = items.len();
    for rows in 1..size {
        let cols = size.div_ceil(rows);
        let mut widths = Vec::with_capacity(cols);
        let mut fits = true;
        for col in 0..cols {
            let width = (0..rows)
                .filter_map(|row| items.get(row + rows * col))
                .map(|item| item.chars().count())
                .max()
                .unwrap_or(0);
            widths.push(width);
            // two spaces between columns
            let total = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
            if total > display_width {
                fits = false;
                break;
            }
        }
        if fits {
            return Some((rows, widths));
        }
    }
    None
}

/// A titled topic section: header, `=` ruler, columns, blank line.
///
/// Nothing is rendered for an empty list.
#[must_use]
pub fn print_topics(header: &str, items: &[&str], max_col: usize) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!("{header}\n{}\n", "=".repeat(header.chars().count()));
    out.push_str(&columnize(items, max_col.saturating_sub(1)));
    out.push('\n');
    out
}
