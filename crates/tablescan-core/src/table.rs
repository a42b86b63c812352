// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Table domain types — recognised cells, logical cells/rows/tables, and
// tables positioned on a page — plus their nested-mapping persisted form.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::geometry::{Contour, Region};

/// A contour paired with the text recognised inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectedCell {
    pub text: String,
    pub contour: Contour,
}

impl DetectedCell {
    pub fn new(text: impl Into<String>, contour: Contour) -> Self {
        Self {
            text: text.into(),
            contour,
        }
    }

    /// Build a cell from recognised lines, one per output line.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], contour: Contour) -> Self {
        let text = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<&str>>()
            .join("\n");
        Self { text, contour }
    }
}

fn one() -> u32 {
    1
}

/// A logical table cell with its span in grid units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell<T> {
    pub content: T,
    #[serde(default = "one")]
    pub colspan: u32,
    #[serde(default = "one")]
    pub rowspan: u32,
}

impl<T> Cell<T> {
    /// A 1×1 cell.
    pub fn new(content: T) -> Self {
        Self {
            content,
            colspan: 1,
            rowspan: 1,
        }
    }

    pub fn with_span(content: T, colspan: u32, rowspan: u32) -> Self {
        Self {
            content,
            colspan,
            rowspan,
        }
    }

    pub fn try_map_content<U, E>(self, f: &mut impl FnMut(T) -> std::result::Result<U, E>) -> std::result::Result<Cell<U>, E> {
        Ok(Cell {
            content: f(self.content)?,
            colspan: self.colspan,
            rowspan: self.rowspan,
        })
    }
}

/// Cells of one row, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row<T> {
    pub cells: Vec<Cell<T>>,
}

impl<T> Row<T> {
    pub fn new(cells: Vec<Cell<T>>) -> Self {
        Self { cells }
    }

    pub fn try_map_content<U, E>(self, f: &mut impl FnMut(T) -> std::result::Result<U, E>) -> std::result::Result<Row<U>, E> {
        let cells = self
            .cells
            .into_iter()
            .map(|cell| cell.try_map_content(f))
            .collect::<std::result::Result<Vec<_>, E>>()?;
        Ok(Row { cells })
    }
}

/// Header rows followed by body rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table<T> {
    pub headers: Vec<Row<T>>,
    pub rows: Vec<Row<T>>,
}

impl<T> Table<T> {
    pub fn new(headers: Vec<Row<T>>, rows: Vec<Row<T>>) -> Self {
        Self { headers, rows }
    }

    /// Apply a fallible conversion to every cell's content, headers first.
    pub fn try_map_content<U, E>(self, mut f: impl FnMut(T) -> std::result::Result<U, E>) -> std::result::Result<Table<U>, E> {
        let headers = self
            .headers
            .into_iter()
            .map(|row| row.try_map_content(&mut f))
            .collect::<std::result::Result<Vec<_>, E>>()?;
        let rows = self
            .rows
            .into_iter()
            .map(|row| row.try_map_content(&mut f))
            .collect::<std::result::Result<Vec<_>, E>>()?;
        Ok(Table { headers, rows })
    }

    pub fn map_content<U>(self, mut f: impl FnMut(T) -> U) -> Table<U> {
        match self.try_map_content(|content| Ok::<U, std::convert::Infallible>(f(content))) {
            Ok(table) => table,
            Err(never) => match never {},
        }
    }

    /// Decode from the nested mapping form, converting every leaf `content`
    /// with `factory`.
    pub fn from_value_with(value: Value, factory: impl FnMut(Value) -> Result<T>) -> Result<Self> {
        let raw: Table<Value> = serde_json::from_value(value)?;
        raw.try_map_content(factory)
    }
}

impl<T: Serialize> Table<T> {
    /// Encode to the nested mapping form (`headers`, `rows`, `cells`, ...).
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<T: DeserializeOwned> Table<T> {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// A table and its bounding box on the source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedTable<T> {
    pub table: Table<T>,
    pub h_pos: i32,
    pub v_pos: i32,
    pub height: i32,
    pub width: i32,
}

impl<T> LocatedTable<T> {
    /// Footprint of the table on the page.
    pub fn region(&self) -> Region {
        Region {
            h_pos: self.h_pos,
            v_pos: self.v_pos,
            width: self.width,
            height: self.height,
        }
    }

    pub fn map_content<U>(self, f: impl FnMut(T) -> U) -> LocatedTable<U> {
        LocatedTable {
            table: self.table.map_content(f),
            h_pos: self.h_pos,
            v_pos: self.v_pos,
            height: self.height,
            width: self.width,
        }
    }

    pub fn from_value_with(value: Value, factory: impl FnMut(Value) -> Result<T>) -> Result<Self> {
        let raw: LocatedTable<Value> = serde_json::from_value(value)?;
        Ok(LocatedTable {
            table: raw.table.try_map_content(factory)?,
            h_pos: raw.h_pos,
            v_pos: raw.v_pos,
            height: raw.height,
            width: raw.width,
        })
    }
}

impl<T: Serialize> LocatedTable<T> {
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<T: DeserializeOwned> LocatedTable<T> {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
