//! Dataset summaries: class distribution, head and random samples.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::dataset::reader::{Row, read_rows};
use crate::error::Result;

/// Default number of rows shown by previews and samples.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Width of the longest bar in text charts.
pub const BAR_WIDTH: usize = 40;

/// Number of rows carrying a given raw label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Count rows per raw label, most frequent first (ties by label).
pub fn label_counts(rows: &[Row]) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.label.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    counts
}

/// Up to `n` distinct rows in random order.
pub fn sample<'a, R: Rng + ?Sized>(rows: &'a [Row], n: usize, rng: &mut R) -> Vec<&'a Row> {
    rows.choose_multiple(rng, n).collect()
}

/// Render label counts as a horizontal text bar chart.
pub fn bar_chart(counts: &[LabelCount], width: usize) -> String {
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let label_width = counts
        .iter()
        .map(|c| display_label(&c.label).len())
        .max()
        .unwrap_or(0);

    let mut chart = String::new();
    for c in counts {
        let bar = if max == 0 {
            0
        } else {
            (c.count * width).div_ceil(max)
        };
        chart.push_str(&format!(
            "{:>label_width$} | {} {}\n",
            display_label(&c.label),
            "#".repeat(bar),
            c.count
        ));
    }
    chart
}

fn display_label(label: &str) -> &str {
    if label.is_empty() { "(empty)" } else { label }
}

/// Overview of a dataset file.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetPreview {
    pub path: PathBuf,
    pub total_rows: usize,
    pub label_counts: Vec<LabelCount>,
    pub head: Vec<Row>,
}

impl DatasetPreview {
    /// Summarize already-parsed rows.
    pub fn from_rows<P: Into<PathBuf>>(path: P, rows: &[Row], head_rows: usize) -> Self {
        DatasetPreview {
            path: path.into(),
            total_rows: rows.len(),
            label_counts: label_counts(rows),
            head: rows.iter().take(head_rows).cloned().collect(),
        }
    }

    /// Read and summarize a dataset file.
    pub fn load<P: AsRef<Path>>(path: P, head_rows: usize) -> Result<Self> {
        let path = path.as_ref();
        let rows = read_rows(path)?;
        Ok(Self::from_rows(path, &rows, head_rows))
    }
}

impl fmt::Display for DatasetPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} rows)", self.path.display(), self.total_rows)?;
        writeln!(f)?;
        writeln!(f, "Class distribution:")?;
        write!(f, "{}", bar_chart(&self.label_counts, BAR_WIDTH))?;

        if !self.head.is_empty() {
            writeln!(f)?;
            writeln!(f, "First {} rows:", self.head.len())?;
            write!(f, "{}", format_rows(self.head.iter()))?;
        }
        Ok(())
    }
}

/// Render rows as a two-column `label | text` listing.
pub fn format_rows<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter()
        .map(|row| format!("{:>7} | {}\n", display_label(&row.label), row.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn row(line: u64, label: &str, text: &str) -> Row {
        Row {
            line,
            label: label.to_string(),
            text: text.to_string(),
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            row(2, "ham", "Ok done."),
            row(3, "spam", "Win cash"),
            row(4, "ham", "See you"),
            row(5, "", "stray"),
            row(6, "ham", "Thanks"),
        ]
    }

    #[test]
    fn test_label_counts_sorted() {
        let counts = label_counts(&rows());
        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.label.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("ham", 3), ("", 1), ("spam", 1)]);
    }

    #[test]
    fn test_bar_chart() {
        let chart = bar_chart(&label_counts(&rows()), 6);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "    ham | ###### 3");
        assert_eq!(lines[1], "(empty) | ## 1");
        assert_eq!(bar_chart(&[], 10), "");
    }

    #[test]
    fn test_sample_is_bounded_and_distinct() {
        let rows = rows();
        let mut rng = StdRng::seed_from_u64(42);

        let picked = sample(&rows, 3, &mut rng);
        assert_eq!(picked.len(), 3);
        let mut lines: Vec<u64> = picked.iter().map(|r| r.line).collect();
        lines.sort();
        lines.dedup();
        assert_eq!(lines.len(), 3);

        assert_eq!(sample(&rows, 50, &mut rng).len(), rows.len());
    }

    #[test]
    fn test_preview_display() {
        let preview = DatasetPreview::from_rows("data/spam.csv", &rows(), 2);
        assert_eq!(preview.total_rows, 5);
        assert_eq!(preview.head.len(), 2);

        let rendered = preview.to_string();
        assert!(rendered.contains("data/spam.csv (5 rows)"));
        assert!(rendered.contains("First 2 rows:"));
        assert!(rendered.contains("    ham | Ok done."));
    }
}
