use crate::model::JoinedRecord;

use std::fmt;

/// Columns of a JoinedRecord that can enter a correlation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    MeanNegative,
    MeanNeutral,
    MeanPositive,
    MeanCompound,
    AdjClose,
    Volume,
}

impl Column {
    /// The four sentiment dimensions, in lexicon order.
    pub const SENTIMENT: [Column; 4] = [
        Column::MeanNegative,
        Column::MeanNeutral,
        Column::MeanPositive,
        Column::MeanCompound,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Column::MeanNegative => "neg",
            Column::MeanNeutral => "neu",
            Column::MeanPositive => "pos",
            Column::MeanCompound => "compound",
            Column::AdjClose => "Adj Close",
            Column::Volume => "Volume",
        }
    }

    pub fn value(&self, record: &JoinedRecord) -> f64 {
        match self {
            Column::MeanNegative => record.mean_negative,
            Column::MeanNeutral => record.mean_neutral,
            Column::MeanPositive => record.mean_positive,
            Column::MeanCompound => record.mean_compound,
            Column::AdjClose => record.adj_close,
            Column::Volume => record.volume as f64,
        }
    }
}

/// Pairwise-complete Pearson correlations between two column sets. A cell
/// is `None` when fewer than 2 paired finite observations exist or when
/// either side has zero variance; it is never silently zero.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    rows: Vec<Column>,
    cols: Vec<Column>,
    cells: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn cell(&self, row: Column, col: Column) -> Option<f64> {
        let i = self.rows.iter().position(|c| *c == row)?;
        let j = self.cols.iter().position(|c| *c == col)?;
        self.cells[i][j]
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>12}", "")?;
        for col in &self.cols {
            write!(f, " {:>10}", col.label())?;
        }
        writeln!(f)?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{:>12}", row.label())?;
            for cell in &self.cells[i] {
                match cell {
                    Some(value) => write!(f, " {:>10.4}", value)?,
                    None => write!(f, " {:>10}", "n/a")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds the correlation matrix for the requested row/column sets over the
/// joined records.
pub fn correlation_matrix(
    records: &[JoinedRecord],
    rows: &[Column],
    cols: &[Column],
) -> CorrelationMatrix {
    let cells = rows
        .iter()
        .map(|row| cols.iter().map(|col| correlate(records, *row, *col)).collect())
        .collect();

    CorrelationMatrix {
        rows: rows.to_vec(),
        cols: cols.to_vec(),
        cells,
    }
}

/// One cell: gather the pairs where both values are finite, then Pearson.
/// A column paired with itself is exactly 1.0 whenever its correlation is
/// defined at all.
fn correlate(records: &[JoinedRecord], a: Column, b: Column) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .map(|record| (a.value(record), b.value(record)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let x: Vec<f64> = pairs.iter().map(|(x, _)| *x).collect();
    let y: Vec<f64> = pairs.iter().map(|(_, y)| *y).collect();

    if a == b {
        // self-correlation: defined iff the variance is non-zero
        return pearson(&x, &y).map(|_| 1.0);
    }
    pearson(&x, &y)
}

/// Pearson product-moment correlation coefficient between two slices.
/// Returns None if the slices differ in length, are empty, or either side
/// has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.is_empty() {
        return None;
    }
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let numerator: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
        .sum();
    let denominator_x: f64 = x.iter().map(|xi| (xi - mean_x).powi(2)).sum();
    let denominator_y: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
    let denominator = (denominator_x * denominator_y).sqrt();
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}
