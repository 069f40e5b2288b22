use crate::{
    barcode::{Barcode, BarcodeBase},
    error::{DrawError, ParseError},
    layout::Layout,
    painter::{ColorSelector, Painter},
};

use super::module;

const NAME: &str = "bars";

/// A linear symbol drawn directly from its modules.
///
/// # Example
///
/// ```
/// # use barcodekit::{barcode::Barcode, symbology::Bars};
/// let mut bars = Bars::new();
/// bars.parse("1011001").unwrap();
/// assert_eq!(bars.dimension(0, 0).unwrap().size().width(), 7);
/// ```
#[derive(Debug)]
pub struct Bars {
    base: BarcodeBase,
    modules: Vec<bool>,
    bar_height: u32,
}

impl Bars {
    pub fn new() -> Self {
        Self {
            base: BarcodeBase::new(),
            modules: Vec::new(),
            bar_height: 30,
        }
    }

    /// Height of the bars in modules.
    pub fn bar_height(&self) -> u32 {
        self.bar_height
    }

    pub fn set_bar_height(&mut self, bar_height: u32) {
        self.bar_height = bar_height.max(1);
    }

    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Runs of consecutive bars as inclusive `(start, end)` module indices.
    fn runs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let mut index = 0;
        std::iter::from_fn(move || {
            while index < self.modules.len() && !self.modules[index] {
                index += 1;
            }
            if index == self.modules.len() {
                return None;
            }
            let start = index;
            while index < self.modules.len() && self.modules[index] {
                index += 1;
            }
            Some((start, index - 1))
        })
    }
}

impl Default for Bars {
    fn default() -> Self {
        Self::new()
    }
}

impl Barcode for Bars {
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
        self.modules = text
            .chars()
            .enumerate()
            .map(|(index, ch)| module(name, index, ch))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn dimension(&self, width: u32, height: u32) -> Result<Layout, DrawError> {
        let length = u32::try_from(self.modules.len()).unwrap_or(u32::MAX);
        self.base
            .dimension(width.saturating_add(length), height.saturating_add(self.bar_height))
    }

    fn draw(&self, painter: &mut Painter<'_>) {
        let bottom = self.bar_height as i32 - 1;
        for (start, end) in self.runs() {
            painter.draw_filled_rectangle(start as i32, 0, end as i32, bottom, ColorSelector::Foreground);
        }
        painter.draw_text(0, 0, self.modules.len() as i32, self.bar_height as i32);
    }
}

#[cfg(test)]
mod tests {
    use barcodekit_core::geometry::{PushOffset, Size};

    use super::*;
    use crate::{layout::Transform, painter::tests::RecordingSurface, painter::Palette};

    fn parsed(text: &str) -> Bars {
        let mut bars = Bars::new();
        bars.parse(text).unwrap();
        bars
    }

    #[test]
    fn test_parse_rejects_other_characters() {
        let mut bars = Bars::new();
        let err = bars.parse("10a1").unwrap_err();
        assert_eq!(err.barcode(), bars.name());
        assert_eq!(err.barcode(), "bars");
        assert!(err.message().contains("'a'"));
        assert!(err.message().contains("position 2"));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        let mut bars = Bars::new();
        let err = bars.parse("").unwrap_err();
        assert_eq!(err.barcode(), bars.name());
    }

    #[test]
    fn test_dimension() {
        let mut bars = parsed("1010011010");
        bars.set_bar_height(1);
        bars.base_mut().set_scale(3).unwrap();
        assert_eq!(bars.dimension(0, 0).unwrap().size(), Size::new(30, 3));
    }

    #[test]
    fn test_dimension_too_large() {
        let mut bars = parsed("11");
        bars.set_bar_height(u32::MAX);
        assert_eq!(bars.dimension(0, 0), Err(DrawError::TooLarge));
    }

    #[test]
    fn test_runs() {
        let bars = parsed("0110100111");
        assert_eq!(bars.runs().collect::<Vec<_>>(), vec![(1, 2), (4, 4), (7, 9)]);
        assert_eq!(parsed("000").runs().count(), 0);
    }

    #[test]
    fn test_draw_fills_each_run() {
        let mut bars = parsed("1101");
        bars.set_bar_height(2);
        let mut surface = RecordingSurface::default();
        let mut painter = Painter::new(
            &mut surface,
            Transform::new(2, 1, 1, 0, 0),
            PushOffset::default(),
            Palette::new(bars.base().foreground_color(), bars.base().background_color()),
            Vec::new(),
        );
        bars.draw(&mut painter);
        drop(painter);

        let rects: Vec<_> = surface.fills.iter().map(|&(x1, y1, x2, y2, _)| (x1, y1, x2, y2)).collect();
        assert_eq!(rects, vec![(0, 0, 3, 3), (6, 0, 7, 3)]);
    }
}
