use crate::{
    barcode::{Barcode, BarcodeBase},
    error::{DrawError, ParseError},
    layout::Layout,
    painter::{ColorSelector, Painter},
};

use super::module;

const NAME: &str = "matrix";

/// A matrix symbol drawn module by module.
///
/// Rows are separated by `';'` and must all have the same length. Module
/// width and height follow the base's `scale_x` and `scale_y`.
#[derive(Debug, Default)]
pub struct ModuleMatrix {
    base: BarcodeBase,
    rows: Vec<Vec<bool>>,
}

impl ModuleMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }
}

impl Barcode for ModuleMatrix {
    fn base(&self) -> &BarcodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BarcodeBase {
        &mut self.base
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn parse(&mut self, text: &str) -> Result<(), ParseError> {
        let name = self.name();
        if text.is_empty() {
            return Err(ParseError::new(name, "No data has been entered."));
        }

        let rows = text
            .split(';')
            .map(|row| {
                row.chars()
                    .enumerate()
                    .map(|(index, ch)| module(name, index, ch))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let columns = rows[0].len();
        if let Some(row) = rows.iter().position(|row| row.len() != columns) {
            return Err(ParseError::new(
                name,
                format!("Row {row} has {} modules, expected {columns}.", rows[row].len()),
            ));
        }

        self.rows = rows;
        Ok(())
    }

    fn dimension(&self, width: u32, height: u32) -> Result<Layout, DrawError> {
        let columns = u32::try_from(self.columns()).unwrap_or(u32::MAX);
        let rows = u32::try_from(self.rows()).unwrap_or(u32::MAX);
        self.base
            .dimension(width.saturating_add(columns), height.saturating_add(rows))
    }

    fn draw(&self, painter: &mut Painter<'_>) {
        for (y, row) in self.rows.iter().enumerate() {
            for (x, _) in row.iter().enumerate().filter(|(_, dark)| **dark) {
                painter.draw_pixel(x as i32, y as i32, ColorSelector::Foreground);
            }
        }
        painter.draw_text(0, 0, self.columns() as i32, self.rows() as i32);
    }
}
