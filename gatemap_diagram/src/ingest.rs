// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning tabular course data into typed records.
//!
//! Reading files is the host's job; this module starts from a header row and
//! data rows of text cells, as a CSV reader would produce them.
//!
//! - Column names are normalized: lowercased, spaces replaced by underscores
//!   (`"Center X"` becomes `center_x`).
//! - Rows that are empty or whose first cell is empty are skipped.
//! - Numeric cells are trimmed and must hold finite numbers.
//!
//! ```
//! use gatemap_diagram::ingest::{RecordTable, checkpoints};
//!
//! let table = RecordTable::from_rows(
//!     ["Checkpoint", "Center X", "Center Y", "Center Z", "Right X", "Right Y", "Right Z", "Track Width"],
//!     [
//!         vec!["0", "0", "0", "0", "1", "0", "0", "120"],
//!         vec![],
//!         vec!["1", "10", "0", "5", "1", "0", "0", ""],
//!     ],
//! );
//! let cps = checkpoints(&table).unwrap();
//! assert_eq!(cps.len(), 2);
//! assert_eq!(cps[0].track_width, 120.0);
//! assert_eq!(cps[1].track_width, 90.0);
//! ```

use std::collections::BTreeSet;

use gatemap_geometry::color::assign_ramp;
use gatemap_geometry::{
    Checkpoint, CheckpointId, Crossing, DEFAULT_TRACK_WIDTH, PathPoint, Vec3,
};

use crate::error::IngestError;

/// Value of the crossing `success` column that marks a success.
pub const SUCCESS_MARK: &str = "Y";

/// Normalizes a header cell: lowercase, spaces become underscores.
pub fn normalize_column(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// A header plus data rows of text cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    /// Creates a table with the given header and no rows.
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: header
                .into_iter()
                .map(|name| normalize_column(name.as_ref()))
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Creates a table from a header and rows.
    pub fn from_rows<I, S, R, C, T>(header: I, rows: R) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut table = Self::new(header);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Appends a data row.
    pub fn push_row<C, T>(&mut self, row: C)
    where
        C: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Normalized column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether the header has `column` (already normalized).
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Non-empty data rows, in order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| cells.first().is_some_and(|first| !first.is_empty()))
            .map(|(index, cells)| Record {
                table: self,
                index,
                cells,
            })
    }

    fn require(&self, columns: &[&'static str]) -> Result<(), IngestError> {
        match columns.iter().copied().find(|c| !self.has_column(c)) {
            Some(column) => Err(IngestError::MissingColumn { column }),
            None => Ok(()),
        }
    }
}

/// One non-empty row of a [`RecordTable`].
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    table: &'a RecordTable,
    index: usize,
    cells: &'a [String],
}

impl<'a> Record<'a> {
    /// Zero-based position among all data rows, including skipped ones.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell under `column`, if the header has it and the row reaches it.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let position = self.table.columns.iter().position(|c| c == column)?;
        self.cells.get(position).map(String::as_str)
    }

    fn bad_number(&self, column: &'static str) -> IngestError {
        IngestError::BadNumber {
            row: self.index,
            column,
            text: self.get(column).unwrap_or_default().to_owned(),
        }
    }

    fn number(&self, column: &'static str) -> Result<f64, IngestError> {
        self.get(column)
            .and_then(|text| text.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .ok_or_else(|| self.bad_number(column))
    }

    /// `None` for a missing or blank cell.
    fn optional_number(&self, column: &'static str) -> Result<Option<f64>, IngestError> {
        match self.get(column) {
            Some(text) if !text.trim().is_empty() => self.number(column).map(Some),
            _ => Ok(None),
        }
    }

    fn integer(&self, column: &'static str) -> Result<CheckpointId, IngestError> {
        self.get(column)
            .and_then(|text| text.trim().parse().ok())
            .ok_or_else(|| self.bad_number(column))
    }

    fn vec3(&self, [x, y, z]: [&'static str; 3]) -> Result<Vec3, IngestError> {
        Ok(Vec3::new(self.number(x)?, self.number(y)?, self.number(z)?))
    }
}

/// Reads checkpoints and colors them along the checkpoint ramp in row order.
///
/// Required columns: `checkpoint`, `center_x/y/z`, `right_x/y/z`. The track
/// width comes from a non-blank `true_width`, else a non-blank `track_width`,
/// else [`DEFAULT_TRACK_WIDTH`].
pub fn checkpoints(table: &RecordTable) -> Result<Vec<Checkpoint>, IngestError> {
    const CENTER: [&str; 3] = ["center_x", "center_y", "center_z"];
    const RIGHT: [&str; 3] = ["right_x", "right_y", "right_z"];
    table.require(&["checkpoint"])?;
    table.require(&CENTER)?;
    table.require(&RIGHT)?;

    let mut out = Vec::new();
    for record in table.records() {
        let track_width = match record.optional_number("true_width")? {
            Some(width) => width,
            None => record
                .optional_number("track_width")?
                .unwrap_or(DEFAULT_TRACK_WIDTH),
        };
        out.push(
            Checkpoint::new(
                record.integer("checkpoint")?,
                record.vec3(CENTER)?,
                record.vec3(RIGHT)?,
            )
            .with_track_width(track_width),
        );
    }
    assign_ramp(&mut out);
    Ok(out)
}

/// Reads an ordered path from `x`, `y`, `z` columns.
pub fn path_points(table: &RecordTable) -> Result<Vec<PathPoint>, IngestError> {
    const XYZ: [&str; 3] = ["x", "y", "z"];
    table.require(&XYZ)?;
    table.records().map(|record| record.vec3(XYZ)).collect()
}

/// Reads the crossings recorded on `course`.
///
/// Rows for other courses are dropped before any number is parsed.
pub fn crossings(table: &RecordTable, course: &str) -> Result<Vec<Crossing>, IngestError> {
    const START: [&str; 3] = ["x1", "y1", "z1"];
    const END: [&str; 3] = ["x2", "y2", "z2"];
    table.require(&["track", "success"])?;
    table.require(&START)?;
    table.require(&END)?;

    table
        .records()
        .filter(|record| record.get("track") == Some(course))
        .map(|record| {
            Ok(Crossing {
                start: record.vec3(START)?,
                end: record.vec3(END)?,
                success: record.get("success") == Some(SUCCESS_MARK),
                track: course.to_owned(),
            })
        })
        .collect()
}

/// Course codes that have at least one crossing row.
pub fn courses_with_crossings(table: &RecordTable) -> Result<BTreeSet<String>, IngestError> {
    table.require(&["track"])?;
    Ok(table
        .records()
        .filter_map(|record| record.get("track"))
        .map(str::to_owned)
        .collect())
}
