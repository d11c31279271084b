//! Style resolution onto worksheet cells, ranges and columns
//!
//! Styles reach a cell in three layers: the row's named style, the cell's
//! named style, then ad-hoc attribute directives. Each layer is merged on top
//! of the previous one, so a directive overrides only the fields it sets.

use sheetmark_core::{
    BorderEdge, BorderLineStyle, BorderStyle, CellRange, Color, DataValidation,
    HorizontalAlignment, StyleDescriptor, Underline, VerticalAlignment, Worksheet,
};

use crate::conditional::parse_conditional;
use crate::error::{Error, Result};
use crate::registry::StyleRegistry;
use crate::schema::Annotation;

/// Cell directives that produce style fragments, in application order
pub const STYLE_DIRECTIVES: &[Annotation] = &[
    Annotation::Format,
    Annotation::Align,
    Annotation::Valign,
    Annotation::Wrap,
    Annotation::BgColor,
    Annotation::FontSize,
    Annotation::Border,
    Annotation::BorderColor,
    Annotation::Locked,
    Annotation::FontColor,
    Annotation::FontBold,
    Annotation::FontItalic,
    Annotation::FontUnderline,
    Annotation::FontName,
    Annotation::Conditional,
];

/// Translate one directive attribute into a style fragment
///
/// Returns `None` for attributes that are not style directives and for values
/// that can't be read (invalid colors, sizes or keywords).
pub fn directive_fragment(annotation: Annotation, value: &str) -> Option<StyleDescriptor> {
    let style = StyleDescriptor::new();
    let fragment = match annotation {
        Annotation::Format => style.number_format(value),
        Annotation::Align => style.horizontal_alignment(HorizontalAlignment::from_keyword(value)),
        Annotation::Valign => style.vertical_alignment(VerticalAlignment::from_keyword(value)),
        Annotation::Wrap => style.wrap_text(value == "true"),
        Annotation::BgColor => style.fill_color(Color::from_hex(value)?),
        Annotation::FontColor => style.font_color(Color::from_hex(value)?),
        Annotation::FontSize => {
            let size: f64 = value.trim().parse().ok().filter(|s: &f64| *s > 0.0)?;
            style.font_size(size)
        }
        Annotation::Border => {
            let line = BorderLineStyle::from_keyword(value)?;
            style.border(BorderStyle::all(BorderEdge::styled(line)))
        }
        Annotation::BorderColor => {
            let color = Color::from_hex(value)?;
            style.border(BorderStyle::all(BorderEdge::colored(color)))
        }
        Annotation::Locked => style.locked(value == "true"),
        Annotation::FontBold => style.bold(value == "true"),
        Annotation::FontItalic => style.italic(value == "true"),
        Annotation::FontUnderline => style.underline(Underline::from_keyword(value)?),
        Annotation::FontName if !value.is_empty() => style.font_name(value),
        Annotation::Conditional => style.conditional(parse_conditional(value)?),
        _ => return None,
    };
    Some(fragment)
}

/// Default look of a hyperlinked cell
pub fn link_look() -> StyleDescriptor {
    StyleDescriptor::new()
        .font_color(Color::HYPERLINK)
        .underline(Underline::Single)
}

/// Applies named styles and ad-hoc directives to a worksheet
#[derive(Debug, Clone, Copy)]
pub struct SheetStyler<'a> {
    registry: &'a StyleRegistry,
}

impl<'a> SheetStyler<'a> {
    /// Create a styler reading from `registry`
    pub fn new(registry: &'a StyleRegistry) -> Self {
        Self { registry }
    }

    /// The backing registry
    pub fn registry(&self) -> &'a StyleRegistry {
        self.registry
    }

    /// Look up a named style
    pub fn named(&self, name: &str) -> Result<&'a StyleDescriptor> {
        Ok(self.registry.get(name)?)
    }

    /// Merge a named style onto one cell
    pub fn apply_named_style(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        col: u32,
        name: &str,
    ) -> Result<()> {
        let style = self.named(name)?;
        sheet
            .apply_cell_style_at(row, col, style)
            .map_err(Error::from_core)
    }

    /// Merge a named style onto every cell of a range
    pub fn apply_named_style_to_range(
        &self,
        sheet: &mut Worksheet,
        range: &CellRange,
        name: &str,
    ) -> Result<()> {
        let style = self.named(name)?;
        sheet
            .apply_range_style(range, style)
            .map_err(Error::from_core)
    }

    /// Merge a named style onto a whole column
    ///
    /// Existing cells of the column are restyled; cells created later start
    /// from the column style.
    pub fn apply_named_style_to_column(
        &self,
        sheet: &mut Worksheet,
        col: u32,
        name: &str,
    ) -> Result<()> {
        let style = self.named(name)?;
        let rows: Vec<u32> = sheet
            .iter_cells()
            .filter(|(addr, _)| addr.col == col)
            .map(|(addr, _)| addr.row)
            .collect();
        for row in rows {
            sheet
                .apply_cell_style_at(row, col, style)
                .map_err(Error::from_core)?;
        }
        sheet
            .apply_column_style(col, style)
            .map_err(Error::from_core)
    }

    /// Set the number format code of a cell
    pub fn apply_number_format(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        col: u32,
        format: &str,
    ) -> Result<()> {
        apply_fragment(sheet, row, col, &StyleDescriptor::new().number_format(format))
    }

    /// Set horizontal alignment; unknown keywords mean general
    pub fn apply_align(&self, sheet: &mut Worksheet, row: u32, col: u32, keyword: &str) -> Result<()> {
        let style =
            StyleDescriptor::new().horizontal_alignment(HorizontalAlignment::from_keyword(keyword));
        apply_fragment(sheet, row, col, &style)
    }

    /// Set vertical alignment; unknown keywords mean bottom
    pub fn apply_valign(&self, sheet: &mut Worksheet, row: u32, col: u32, keyword: &str) -> Result<()> {
        let style =
            StyleDescriptor::new().vertical_alignment(VerticalAlignment::from_keyword(keyword));
        apply_fragment(sheet, row, col, &style)
    }

    /// Toggle text wrapping
    pub fn apply_wrap(&self, sheet: &mut Worksheet, row: u32, col: u32, wrap: bool) -> Result<()> {
        apply_fragment(sheet, row, col, &StyleDescriptor::new().wrap_text(wrap))
    }

    /// Attach an inline choice list to a cell
    pub fn apply_list_validation<I, S>(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        col: u32,
        items: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cell = sheet.cell_mut_at(row, col).map_err(Error::from_core)?;
        cell.validation = Some(DataValidation::list(items));
        Ok(())
    }
}

fn apply_fragment(sheet: &mut Worksheet, row: u32, col: u32, style: &StyleDescriptor) -> Result<()> {
    sheet
        .apply_cell_style_at(row, col, style)
        .map_err(Error::from_core)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetmark_core::{CfOperator, ValidationType};

    fn setup() -> (StyleRegistry, Worksheet) {
        (StyleRegistry::new(), Worksheet::new("Test"))
    }

    #[test]
    fn test_named_style_on_cell() {
        let (registry, mut sheet) = setup();
        let styler = SheetStyler::new(&registry);
        styler.apply_named_style(&mut sheet, 1, 1, "th").unwrap();

        let style = sheet.cell_style_at(1, 1);
        assert_eq!(style.font.bold, Some(true));
        assert_eq!(style.alignment.horizontal, Some(HorizontalAlignment::Center));
    }

    #[test]
    fn test_unknown_named_style() {
        let (registry, mut sheet) = setup();
        let err = SheetStyler::new(&registry)
            .apply_named_style(&mut sheet, 1, 1, "nope")
            .unwrap_err();
        assert!(matches!(err, Error::Lookup(ref e) if e.name == "nope"));
        assert!(err.to_string().contains("th"));
    }

    #[test]
    fn test_named_style_on_range_and_column() {
        let (registry, mut sheet) = setup();
        let styler = SheetStyler::new(&registry);
        sheet.set_cell_value_at(3, 2, 12.0).unwrap();

        let range = CellRange::parse("A1:B2").unwrap();
        styler.apply_named_style_to_range(&mut sheet, &range, "warn").unwrap();
        assert_eq!(
            sheet.cell_style_at(2, 2).fill.color,
            Some(Color::rgb(0xFF, 0xFF, 0x99))
        );

        styler.apply_named_style_to_column(&mut sheet, 2, "int").unwrap();
        assert_eq!(
            sheet.cell_style_at(3, 2).number_format.as_deref(),
            Some("# ##0")
        );
        // untouched rows fall back to the column style
        assert_eq!(
            sheet.cell_style_at(50, 2).number_format.as_deref(),
            Some("# ##0")
        );
        // merge keeps the earlier fill
        assert!(sheet.cell_style_at(2, 2).fill.color.is_some());
    }

    #[test]
    fn test_ad_hoc_directives_merge() {
        let (registry, mut sheet) = setup();
        let styler = SheetStyler::new(&registry);
        styler.apply_named_style(&mut sheet, 1, 1, "money").unwrap();
        styler.apply_align(&mut sheet, 1, 1, "center").unwrap();
        styler.apply_valign(&mut sheet, 1, 1, "middle").unwrap();
        styler.apply_wrap(&mut sheet, 1, 1, true).unwrap();

        let style = sheet.cell_style_at(1, 1);
        assert_eq!(style.alignment.horizontal, Some(HorizontalAlignment::Center));
        assert_eq!(style.alignment.vertical, Some(VerticalAlignment::Center));
        assert_eq!(style.alignment.wrap_text, Some(true));
        assert_eq!(
            style.number_format.as_deref(),
            Some("# ##0,00 [$€-fr-FR]")
        );

        styler.apply_number_format(&mut sheet, 1, 1, "0.0").unwrap();
        assert_eq!(sheet.cell_style_at(1, 1).number_format.as_deref(), Some("0.0"));
    }

    #[test]
    fn test_unknown_alignment_keywords() {
        let (registry, mut sheet) = setup();
        let styler = SheetStyler::new(&registry);
        styler.apply_align(&mut sheet, 1, 1, "sideways").unwrap();
        styler.apply_valign(&mut sheet, 1, 1, "sideways").unwrap();
        let style = sheet.cell_style_at(1, 1);
        assert_eq!(style.alignment.horizontal, Some(HorizontalAlignment::General));
        assert_eq!(style.alignment.vertical, Some(VerticalAlignment::Bottom));
    }

    #[test]
    fn test_list_validation() {
        let (registry, mut sheet) = setup();
        SheetStyler::new(&registry)
            .apply_list_validation(&mut sheet, 2, 3, ["Oui", "Non", "Peut-être \"?\""])
            .unwrap();
        let validation = sheet.cell_at(2, 3).unwrap().validation.clone().unwrap();
        assert_eq!(
            validation.validation_type,
            ValidationType::List("\"Oui,Non,Peut-être \"\"?\"\"\"".into())
        );
        assert!(validation.allow_blank);
        assert!(validation.show_dropdown);
    }

    #[test]
    fn test_directive_fragments() {
        assert_eq!(
            directive_fragment(Annotation::BgColor, "#FFFF00"),
            Some(StyleDescriptor::new().fill_color(Color::rgb(0xFF, 0xFF, 0)))
        );
        assert_eq!(
            directive_fragment(Annotation::FontSize, "14"),
            Some(StyleDescriptor::new().font_size(14.0))
        );
        assert_eq!(
            directive_fragment(Annotation::FontUnderline, "double"),
            Some(StyleDescriptor::new().underline(Underline::Double))
        );
        assert_eq!(
            directive_fragment(Annotation::Locked, "false"),
            Some(StyleDescriptor::new().locked(false))
        );

        let border = directive_fragment(Annotation::Border, "medium").unwrap();
        assert_eq!(
            border.border.left.unwrap().style,
            Some(BorderLineStyle::Medium)
        );
        assert_eq!(border.border.top, border.border.bottom);

        let rule = directive_fragment(Annotation::Conditional, "value>10|bold").unwrap();
        assert_eq!(rule.conditionals[0].operator, CfOperator::GreaterThan);
    }

    #[test]
    fn test_unreadable_directives_are_skipped() {
        assert_eq!(directive_fragment(Annotation::BgColor, "red"), None);
        assert_eq!(directive_fragment(Annotation::FontSize, "-1"), None);
        assert_eq!(directive_fragment(Annotation::Border, "dashed"), None);
        assert_eq!(directive_fragment(Annotation::Conditional, "value"), None);
        assert_eq!(directive_fragment(Annotation::FontName, ""), None);
        assert_eq!(directive_fragment(Annotation::Sheet, "Data"), None);
    }

    #[test]
    fn test_border_style_and_color_combine() {
        let mut style = directive_fragment(Annotation::Border, "thin").unwrap();
        style.merge(&directive_fragment(Annotation::BorderColor, "FF0000").unwrap());
        let edge = style.border.right.unwrap();
        assert_eq!(edge.style, Some(BorderLineStyle::Thin));
        assert_eq!(edge.color, Some(Color::RED));
    }

    #[test]
    fn test_link_look() {
        let look = link_look();
        assert_eq!(look.font.color, Some(Color::HYPERLINK));
        assert_eq!(look.font.underline, Some(Underline::Single));
    }
}
