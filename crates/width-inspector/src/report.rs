//! Width measurements laid out as a table.

use std::fmt;

use indexmap::IndexMap;

use crate::axes::Coordinates;

/// Cell text for an axis an instance has no value for.
pub const PLACEHOLDER: &str = "-";

/// Title of the instance-name column.
pub const INSTANCE_COLUMN: &str = "Instance";

/// One compiled instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// File stem of the compiled binary
    pub instance: String,
    pub axes: Coordinates,
    /// Shaped advance width in font units
    pub width: i32,
}

/// Measurements of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub text: String,
    /// Axis columns, sorted
    pub axes: Vec<String>,
    pub rows: Vec<Row>,
}

impl Report {
    pub fn new(text: &str) -> Self {
        Self { text: text.to_string(), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `Instance`, the axis tags, then `{text} Width`.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.axes.len() + 2);
        columns.push(INSTANCE_COLUMN.to_string());
        columns.extend(self.axes.iter().cloned());
        columns.push(format!("{} Width", self.text));
        columns
    }

    /// Rendered cells of `row`, aligned with [`Report::columns`].
    pub fn cells(&self, row: &Row) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.axes.len() + 2);
        cells.push(row.instance.clone());
        cells.extend(self.axes.iter().map(|tag| {
            row.axes.get(tag).map_or_else(|| PLACEHOLDER.to_string(), |v| format_value(*v))
        }));
        cells.push(row.width.to_string());
        cells
    }

    /// Every row as a column-title to cell map.
    pub fn records(&self) -> Vec<IndexMap<String, String>> {
        let columns = self.columns();
        self.rows
            .iter()
            .map(|row| columns.iter().cloned().zip(self.cells(row)).collect())
            .collect()
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl fmt::Display for Report {
    /// Plain-text table with left-aligned columns.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.columns();
        let body: Vec<Vec<String>> = self.rows.iter().map(|row| self.cells(row)).collect();

        let mut widths: Vec<usize> = header.iter().map(|c| c.chars().count()).collect();
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for line in std::iter::once(&header).chain(&body) {
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            writeln!(f, "{}", cells.join("  ").trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        Report {
            text: "Hamburg".into(),
            axes: vec!["opsz".into(), "wght".into()],
            rows: vec![
                Row {
                    instance: "Crispy-Bold".into(),
                    axes: IndexMap::from([("wght".to_string(), 700.0)]),
                    width: 4210,
                },
                Row { instance: "Crispy-Light".into(), axes: IndexMap::new(), width: 3985 },
            ],
        }
    }

    #[test]
    fn columns_wrap_axes() {
        assert_eq!(report().columns(), ["Instance", "opsz", "wght", "Hamburg Width"]);
    }

    #[test]
    fn missing_axes_render_placeholder() {
        let report = report();
        assert_eq!(report.cells(&report.rows[0]), ["Crispy-Bold", "-", "700", "4210"]);
        assert_eq!(report.cells(&report.rows[1]), ["Crispy-Light", "-", "-", "3985"]);
    }

    #[test]
    fn records_are_keyed_by_column() {
        let records = report().records();
        assert_eq!(records[0]["wght"], "700");
        assert_eq!(records[1]["Hamburg Width"], "3985");
    }

    #[test]
    fn fractional_values_keep_decimals() {
        assert_eq!(format_value(12.5), "12.5");
        assert_eq!(format_value(-3.0), "-3");
    }

    #[test]
    fn table_text() {
        let text = report().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Instance      opsz  wght  Hamburg Width");
        assert_eq!(lines[1], "Crispy-Bold   -     700   4210");
        assert_eq!(lines[2], "Crispy-Light  -     -     3985");
    }

    #[test]
    fn empty_report() {
        let report = Report::new("H");
        assert!(report.is_empty());
        assert_eq!(report.columns(), ["Instance", "H Width"]);
    }
}
