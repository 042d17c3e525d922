// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::util::OutputFormat;

/// Renders rows either as an aligned, colored table or as a JSON array.
pub struct Table<'a, T, C: TableColumn<T>> {
    format: OutputFormat,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(format: OutputFormat, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            format,
            columns,
            data,
        }
    }

    fn write_basic(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let widths = get_column_max_width(&table, self.columns.len());
        for (cells, row) in table.iter().zip(self.data) {
            for (j, (col, cell)) in self.columns.iter().zip(cells).enumerate() {
                let last = j == self.columns.len() - 1;
                let cell = match col.padding_direction() {
                    // Last column does not need padding if it's left-aligned
                    PaddingDirection::Left if last => cell.to_string(),
                    PaddingDirection::Left => pad(cell, widths[j], true),
                    PaddingDirection::Right => pad(cell, widths[j], false),
                };
                match col.get_color(row) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                if last {
                    writeln!(f)?;
                } else {
                    write!(f, " ")?;
                }
            }
        }
        Ok(())
    }

    fn write_json(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = self
            .data
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| {
                        let value = serde_json::Value::String(col.format(row).into_owned());
                        (col.name().into_owned(), value)
                    })
                    .collect()
            })
            .collect();

        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        writeln!(f, "{json}")
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            OutputFormat::Table => self.write_basic(f),
            OutputFormat::Json => self.write_json(f),
        }
    }
}

pub trait TableColumn<T> {
    /// Key of the column in JSON output.
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

fn pad(cell: &str, width: usize, left: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    if left {
        format!("{cell}{fill}")
    } else {
        format!("{fill}{cell}")
    }
}

fn get_column_max_width(table: &[Vec<Cow<'_, str>>], columns: usize) -> Vec<usize> {
    let mut max_width = vec![0; columns];
    for row in table {
        for (i, cell) in row.iter().enumerate() {
            max_width[i] = max_width[i].max(cell.width());
        }
    }
    max_width
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Word;

    impl TableColumn<(u32, &'static str)> for Word {
        fn name(&self) -> Cow<'_, str> {
            "word".into()
        }

        fn format<'a>(&self, data: &'a (u32, &'static str)) -> Cow<'a, str> {
            data.1.into()
        }
    }

    struct Number;

    impl TableColumn<(u32, &'static str)> for Number {
        fn name(&self) -> Cow<'_, str> {
            "number".into()
        }

        fn format<'a>(&self, data: &'a (u32, &'static str)) -> Cow<'a, str> {
            data.0.to_string().into()
        }

        fn padding_direction(&self) -> PaddingDirection {
            PaddingDirection::Right
        }
    }

    enum Col {
        Number(Number),
        Word(Word),
    }

    impl TableColumn<(u32, &'static str)> for Col {
        fn name(&self) -> Cow<'_, str> {
            match self {
                Col::Number(c) => c.name(),
                Col::Word(c) => c.name(),
            }
        }

        fn format<'a>(&self, data: &'a (u32, &'static str)) -> Cow<'a, str> {
            match self {
                Col::Number(c) => c.format(data),
                Col::Word(c) => c.format(data),
            }
        }

        fn padding_direction(&self) -> PaddingDirection {
            match self {
                Col::Number(c) => c.padding_direction(),
                Col::Word(c) => c.padding_direction(),
            }
        }
    }

    fn rows() -> Vec<(u32, &'static str)> {
        vec![(7, "seven"), (12, "twelve")]
    }

    #[test]
    fn test_basic_table_aligns_columns() {
        let columns = [Col::Number(Number), Col::Word(Word)];
        let data = rows();
        let out = Table::new(OutputFormat::Table, &columns, &data).to_string();
        assert_eq!(out, " 7 seven\n12 twelve\n");
    }

    #[test]
    fn test_json_table_uses_column_names() {
        let columns = [Col::Number(Number), Col::Word(Word)];
        let data = rows();
        let out = Table::new(OutputFormat::Json, &columns, &data).to_string();

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[1]["number"], "12");
        assert_eq!(parsed[1]["word"], "twelve");
    }

    #[test]
    fn test_empty_table_prints_nothing() {
        let columns = [Col::Word(Word)];
        let data: Vec<(u32, &'static str)> = vec![];
        assert_eq!(Table::new(OutputFormat::Table, &columns, &data).to_string(), "");
    }
}
