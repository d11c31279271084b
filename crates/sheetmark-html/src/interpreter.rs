//! Annotated table walker
//!
//! Every `<table data-xls-sheet>` of the document becomes one worksheet, in
//! document order. Rows are numbered from 1 across `thead`, `tbody`, `tfoot`
//! and bare `tr` children; cells are placed left to right with a column
//! cursor that advances by each cell's colspan.

use log::{debug, warn};
use sheetmark_core::{
    CellAddress, CellComment, CellRange, CellValue, Color, Drawing, Error as CoreError, FitMode,
    Hyperlink, Merge, PageMargins, PageOrientation, StyleDescriptor, Workbook, Worksheet, MAX_COLS,
};

use crate::coerce::{coerce, ForcedType};
use crate::dom::{find_elements, parse_html, trim_markup, Element, Node};
use crate::error::{Error, Result};
use crate::image::resolve_image;
use crate::options::{InterpretOptions, MergePolicy};
use crate::registry::StyleRegistry;
use crate::schema::Annotation;
use crate::sheet_name::{dedupe_sheet_name, sanitize_sheet_name};
use crate::styler::{directive_fragment, link_look, SheetStyler, STYLE_DIRECTIVES};
use crate::validator::AttributeValidator;

/// Converts annotated tables into a [`Workbook`]
///
/// ## Example
///
/// ```rust
/// use sheetmark_html::{InterpretOptions, StyleRegistry, TableInterpreter};
///
/// let registry = StyleRegistry::new();
/// let interpreter = TableInterpreter::new(&registry, InterpretOptions::default());
/// let workbook = interpreter
///     .from_html(r#"<table data-xls-sheet="Data"><tr><td>42</td></tr></table>"#)
///     .unwrap();
/// assert_eq!(workbook.sheet_names(), vec!["Data"]);
/// ```
#[derive(Debug, Clone)]
pub struct TableInterpreter<'a> {
    styler: SheetStyler<'a>,
    validator: AttributeValidator,
    options: InterpretOptions,
}

impl<'a> TableInterpreter<'a> {
    /// Create an interpreter
    pub fn new(registry: &'a StyleRegistry, options: InterpretOptions) -> Self {
        Self {
            styler: SheetStyler::new(registry),
            validator: AttributeValidator::new(options.strict),
            options,
        }
    }

    /// The options in use
    pub fn options(&self) -> &InterpretOptions {
        &self.options
    }

    /// Parse an HTML string and interpret it
    pub fn from_html(&self, html: &str) -> Result<Workbook> {
        self.interpret(&parse_html(html))
    }

    /// Interpret a markup tree
    ///
    /// Fails without a partial result on the first error; errors raised
    /// inside a table are wrapped in [`Error::Table`].
    pub fn interpret(&self, nodes: &[Node]) -> Result<Workbook> {
        let sheet_attr = Annotation::Sheet.name();
        let tables = find_elements(nodes, |el| el.is("table") && el.has_attr(sheet_attr));
        if tables.is_empty() {
            return Err(Error::Structural);
        }

        let mut workbook = Workbook::new();
        for (index, table) in tables.into_iter().enumerate() {
            let raw_name = table.attr(sheet_attr).unwrap_or_default();
            let sheet = self
                .build_sheet(table, &workbook)
                .map_err(|source| Error::Table {
                    index,
                    sheet: raw_name.to_string(),
                    source: Box::new(source),
                })?;
            debug!(
                "Table #{} -> sheet '{}' ({} cells, {} merges)",
                index,
                sheet.name(),
                sheet.cell_count(),
                sheet.merges().len()
            );
            workbook.push_worksheet(sheet);
        }

        Ok(workbook)
    }

    fn build_sheet(&self, table: &Element, workbook: &Workbook) -> Result<Worksheet> {
        self.validate_attrs(table)?;

        let raw_name = table.attr(Annotation::Sheet.name()).unwrap_or_default();
        let mut name = sanitize_sheet_name(raw_name);
        if self.options.dedupe_sheet_names {
            name = dedupe_sheet_name(&name, workbook.sheet_names());
        }

        let mut sheet = Worksheet::new(name);
        self.apply_table_attrs(&mut sheet, table);
        self.apply_columns(&mut sheet, table)?;

        let rows = table_rows(table);
        for (i, tr) in rows.into_iter().enumerate() {
            self.apply_row(&mut sheet, tr, i as u32 + 1)?;
        }

        self.apply_autosize(&mut sheet, table);
        Ok(sheet)
    }

    fn validate_attrs(&self, element: &Element) -> Result<()> {
        for (name, value) in &element.attrs {
            if Annotation::is_annotation_name(name) {
                self.validator.assert_allowed(name, value)?;
            }
        }
        Ok(())
    }

    fn apply_table_attrs(&self, sheet: &mut Worksheet, table: &Element) {
        let attr = |a: Annotation| table.attr_non_empty(a.name());

        if let Some(v) = attr(Annotation::Freeze) {
            match CellAddress::parse(v) {
                Ok(addr) => sheet.set_freeze_pane(addr),
                Err(_) => skipped(Annotation::Freeze, v),
            }
        }
        if let Some(v) = attr(Annotation::Autofilter) {
            match CellRange::parse(v) {
                Ok(range) => sheet.set_auto_filter(range),
                Err(_) => skipped(Annotation::Autofilter, v),
            }
        }
        if let Some(v) = attr(Annotation::DefaultColWidth) {
            match parse_positive(v) {
                Some(width) => sheet.set_default_column_width(width),
                None => skipped(Annotation::DefaultColWidth, v),
            }
        }
        if let Some(v) = attr(Annotation::Zoom) {
            match v.trim().parse::<u32>() {
                Ok(zoom) if zoom > 0 => sheet.set_zoom(zoom),
                _ => skipped(Annotation::Zoom, v),
            }
        }
        if let Some(v) = attr(Annotation::PrintOrientation) {
            sheet.page_setup_mut().orientation = if v == "landscape" {
                PageOrientation::Landscape
            } else {
                PageOrientation::Portrait
            };
        }
        if let Some(v) = attr(Annotation::PrintFit) {
            match FitMode::from_keyword(v) {
                Some(fit) => sheet.page_setup_mut().fit = fit,
                None => skipped(Annotation::PrintFit, v),
            }
        }
        if let Some(v) = attr(Annotation::PageMargins) {
            let values: Vec<f64> = v
                .split(',')
                .take(6)
                .map(|m| m.trim().parse().unwrap_or(0.0))
                .collect();
            sheet.page_setup_mut().margins = Some(PageMargins::from_values(&values));
        }
        if let Some(v) = attr(Annotation::TabColor) {
            match Color::from_hex(v) {
                Some(color) => sheet.set_tab_color(Some(color)),
                None => skipped(Annotation::TabColor, v),
            }
        }
        if let Some(v) = attr(Annotation::Gridlines) {
            sheet.set_show_gridlines(v == "on");
        }
    }

    fn apply_columns(&self, sheet: &mut Worksheet, table: &Element) -> Result<()> {
        let cols = table
            .child_elements()
            .filter(|el| el.is("colgroup"))
            .flat_map(|group| group.child_elements().filter(|el| el.is("col")));

        for (i, col) in cols.enumerate() {
            let index = i as u32 + 1;
            self.validate_attrs(col)?;

            if let Some(v) = col.attr_non_empty(Annotation::Width.name()) {
                match parse_positive(v) {
                    Some(width) => sheet.set_column_width(index, width).map_err(Error::from_core)?,
                    None => skipped(Annotation::Width, v),
                }
            }
            if col.attr(Annotation::Hidden.name()) == Some("true") {
                sheet.set_column_hidden(index, true).map_err(Error::from_core)?;
            }
            if let Some(name) = col.attr_non_empty(Annotation::Apply.name()) {
                self.styler.apply_named_style_to_column(sheet, index, name)?;
            }
        }
        Ok(())
    }

    fn apply_row(&self, sheet: &mut Worksheet, tr: &Element, row: u32) -> Result<()> {
        self.validate_attrs(tr)?;

        if let Some(v) = tr.attr_non_empty(Annotation::Height.name()) {
            match parse_positive(v) {
                Some(height) => sheet.set_row_height(row, height).map_err(Error::from_core)?,
                None => skipped(Annotation::Height, v),
            }
        }
        let row_style = tr.attr_non_empty(Annotation::Apply.name());

        let mut col = 1;
        for cell in tr.child_elements().filter(|el| el.is("td") || el.is("th")) {
            if self.options.merge_policy == MergePolicy::SkipCovered {
                while sheet.covering_merge(row, col).is_some() {
                    col += 1;
                }
            }
            let colspan = self.apply_cell(sheet, cell, row, col, row_style)?;
            col = col.checked_add(colspan).ok_or_else(|| {
                Error::from_core(CoreError::ColumnOutOfBounds(u32::MAX, MAX_COLS))
            })?;
        }
        Ok(())
    }

    /// Write one cell and return its colspan
    fn apply_cell(
        &self,
        sheet: &mut Worksheet,
        cell: &Element,
        row: u32,
        col: u32,
        row_style: Option<&str>,
    ) -> Result<u32> {
        self.validate_attrs(cell)?;
        let attr = |a: Annotation| cell.attr_non_empty(a.name());

        let colspan = parse_span(Annotation::Colspan, attr(Annotation::Colspan));
        let rowspan = parse_span(Annotation::Rowspan, attr(Annotation::Rowspan));

        self.write_payload(sheet, cell, row, col)?;
        self.apply_cell_style(sheet, cell, row, col, row_style)?;

        let link = attr(Annotation::Link).or_else(|| attr(Annotation::Hyperlink));
        if let Some(url) = link {
            let mut hyperlink = Hyperlink::new(url);
            if let Some(tooltip) = attr(Annotation::LinkTooltip) {
                hyperlink = hyperlink.with_tooltip(tooltip);
            }
            sheet.cell_mut_at(row, col).map_err(Error::from_core)?.hyperlink = Some(hyperlink);
        }

        if let Some(text) = attr(Annotation::Comment) {
            let mut comment = match attr(Annotation::CommentAuthor) {
                Some(author) => CellComment::new(author, text),
                None => CellComment::text_only(text),
            };
            comment = comment
                .with_visible(attr(Annotation::CommentVisible) == Some("true"))
                .with_size(
                    attr(Annotation::CommentWidth).and_then(parse_positive),
                    attr(Annotation::CommentHeight).and_then(parse_positive),
                );
            sheet.cell_mut_at(row, col).map_err(Error::from_core)?.comment = Some(comment);
        }

        if let Some(list) = attr(Annotation::DvList) {
            self.styler
                .apply_list_validation(sheet, row, col, list.split('|'))?;
        }

        if colspan > 1 || rowspan > 1 {
            let merge = Merge::new(CellAddress::new(row, col), colspan, rowspan);
            sheet.merge_cells(merge).map_err(Error::from_core)?;
        }

        Ok(colspan)
    }

    fn write_payload(&self, sheet: &mut Worksheet, cell: &Element, row: u32, col: u32) -> Result<()> {
        let attr = |a: Annotation| cell.attr_non_empty(a.name());

        if let Some(formula) = attr(Annotation::Formula) {
            return sheet
                .set_cell_formula_at(row, col, formula)
                .map_err(Error::from_core);
        }

        if let Some(src) = attr(Annotation::Image) {
            let source = resolve_image(src, self.options.temp_dir.as_deref())?;
            let drawing = Drawing::new(CellAddress::new(row, col), source).with_size(
                attr(Annotation::ImgWidth).and_then(parse_lenient_int),
                attr(Annotation::ImgHeight).and_then(parse_lenient_int),
            );
            let index = sheet.add_drawing(drawing);
            return sheet
                .set_cell_value_at(row, col, CellValue::Image(index))
                .map_err(Error::from_core);
        }

        let text = cell.text_content();
        let text = trim_markup(&text);
        let forced = attr(Annotation::Type).and_then(|t| {
            let forced = ForcedType::from_keyword(t);
            if forced.is_none() {
                skipped(Annotation::Type, t);
            }
            forced
        });
        let locale = attr(Annotation::NumberLocale).or(self.options.number_locale.as_deref());

        let scalar = coerce(text, forced, locale);
        let result = if scalar.is_explicit() {
            sheet.set_cell_string_explicit_at(row, col, text)
        } else {
            sheet.set_cell_value_at(row, col, CellValue::from(scalar))
        };
        result.map_err(Error::from_core)
    }

    fn apply_cell_style(
        &self,
        sheet: &mut Worksheet,
        cell: &Element,
        row: u32,
        col: u32,
        row_style: Option<&str>,
    ) -> Result<()> {
        let mut style = StyleDescriptor::new();

        if let Some(name) = row_style {
            style.merge(self.styler.named(name)?);
        }
        if let Some(name) = cell.attr_non_empty(Annotation::Apply.name()) {
            style.merge(self.styler.named(name)?);
        }
        if cell.attr_non_empty(Annotation::Link.name()).is_some() {
            style.merge(&link_look());
        }
        for &annotation in STYLE_DIRECTIVES {
            let Some(value) = cell.attr_non_empty(annotation.name()) else {
                continue;
            };
            match directive_fragment(annotation, value) {
                Some(fragment) => style.merge(&fragment),
                None => skipped(annotation, value),
            }
        }

        if style.is_empty() {
            return Ok(());
        }
        sheet
            .apply_cell_style_at(row, col, &style)
            .map_err(Error::from_core)
    }

    fn apply_autosize(&self, sheet: &mut Worksheet, table: &Element) {
        let Some(columns_attr) = table.attr_non_empty(Annotation::Autosize.name()) else {
            return;
        };

        let columns = match autosize_columns(columns_attr, sheet) {
            Some(columns) => columns,
            None => {
                skipped(Annotation::Autosize, columns_attr);
                return;
            }
        };
        for col in columns {
            if let Err(e) = sheet.set_column_auto_size(col, true) {
                warn!("Cannot autosize column {}: {}", col, e);
            }
        }
    }
}

/// Rows of `thead`, `tbody`, `tfoot` and bare `tr` children, in document order
fn table_rows(table: &Element) -> Vec<&Element> {
    let mut rows = Vec::new();
    for child in table.child_elements() {
        match child.tag.as_str() {
            "thead" | "tbody" | "tfoot" => {
                rows.extend(child.child_elements().filter(|el| el.is("tr")));
            }
            "tr" => rows.push(child),
            _ => {}
        }
    }
    rows
}

/// Columns named by an autosize directive
///
/// `true` means every used column; otherwise a letter (`B`), a range (`A:D`)
/// or a list (`A,C,E`).
fn autosize_columns(columns_attr: &str, sheet: &Worksheet) -> Option<Vec<u32>> {
    if columns_attr == "true" {
        return Some(sheet.used_columns());
    }
    if let Some((start, end)) = columns_attr.split_once(':') {
        let start = CellAddress::letters_to_column(start.trim()).ok()?;
        let end = CellAddress::letters_to_column(end.trim()).ok()?;
        return Some((start.min(end)..=start.max(end)).collect());
    }
    columns_attr.split(',')
        .map(|letters| CellAddress::letters_to_column(letters.trim()).ok())
        .collect()
}

/// Span attribute: leading digits, at least 1
fn parse_span(annotation: Annotation, value: Option<&str>) -> u32 {
    let Some(value) = value else {
        return 1;
    };
    parse_lenient_int(value).unwrap_or_else(|| {
        skipped(annotation, value);
        1
    })
}

/// Leading digits of a value, like `12px` -> 12
fn parse_lenient_int(value: &str) -> Option<u32> {
    let value = value.trim();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok().filter(|n| *n > 0)
}

fn parse_positive(value: &str) -> Option<f64> {
    value.trim().parse().ok().filter(|n: &f64| *n > 0.0)
}

fn skipped(annotation: Annotation, value: &str) {
    warn!("Ignoring {}=\"{}\": value not understood", annotation, value);
}
