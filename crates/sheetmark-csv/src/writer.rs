//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{CsvError, CsvResult};
use crate::options::{CsvWriteOptions, LineTerminator};
use sheetmark_core::{CellValue, Workbook, Worksheet};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write one sheet of a workbook to a writer
    pub fn write_sheet<W: Write>(
        workbook: &Workbook,
        index: usize,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let sheet = workbook
            .worksheet(index)
            .ok_or(CsvError::SheetOutOfBounds {
                index,
                count: workbook.sheet_count(),
            })?;
        Self::write(sheet, writer, options)
    }

    /// Write a worksheet to a writer
    ///
    /// The grid always starts at A1 and extends to the last used row and
    /// column; covered merge cells come out empty.
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(false)
            .from_writer(writer);

        if let Some(range) = worksheet.used_range() {
            for row in 1..=range.end.row {
                let mut record = Vec::with_capacity(range.end.col as usize);

                for col in 1..=range.end.col {
                    let field = worksheet
                        .value_at(row, col)
                        .map(|v| format_value(v, options))
                        .unwrap_or_default();
                    record.push(field);
                }

                csv_writer.write_record(&record)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn format_value(value: &CellValue, options: &CsvWriteOptions) -> String {
    match value {
        CellValue::Date(serial) => match serial_to_datetime(*serial) {
            Some(dt) if dt.num_seconds_from_midnight() == 0 => {
                dt.format(&options.date_format).to_string()
            }
            Some(dt) => dt.format(&options.datetime_format).to_string(),
            None => serial.to_string(),
        },
        other => other.to_string(),
    }
}

/// Convert a 1900-system spreadsheet serial into a calendar date/time
///
/// Serials below 60 predate the phantom 1900-02-29 and are counted from
/// 1899-12-31; later serials from 1899-12-30.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let days = serial.trunc() as i64;
    let base = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let seconds = ((serial - serial.trunc()) * 86_400.0).round() as i64;
    base.and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetmark_core::{CellAddress, Merge};

    fn to_string(ws: &Worksheet, options: &CsvWriteOptions) -> String {
        let mut buf = Vec::new();
        CsvWriter::write(ws, &mut buf, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_grid_from_a1() {
        let mut ws = Worksheet::new("S");
        ws.set_cell_value("B2", "x").unwrap();
        ws.set_cell_value("C2", 1234.5).unwrap();

        let options = CsvWriteOptions::default().with_line_terminator(LineTerminator::LF);
        assert_eq!(to_string(&ws, &options), ",,\n,x,1234.5\n");
    }

    #[test]
    fn test_write_typed_values() {
        let mut ws = Worksheet::new("S");
        ws.set_cell_value("A1", true).unwrap();
        ws.set_cell_value("B1", CellValue::Date(45292.0)).unwrap();
        ws.set_cell_value("C1", CellValue::Date(45292.5)).unwrap();
        ws.set_cell_formula_at(1, 4, "SUM(A2:A3)").unwrap();
        ws.set_cell_value("E1", "a,b").unwrap();

        let options = CsvWriteOptions::default()
            .with_delimiter(b';')
            .with_line_terminator(LineTerminator::LF);
        assert_eq!(
            to_string(&ws, &options),
            "TRUE;2024-01-01;2024-01-01 12:00:00;=SUM(A2:A3);a,b\n"
        );
    }

    #[test]
    fn test_merged_cells_are_empty() {
        let mut ws = Worksheet::new("S");
        ws.set_cell_value("A1", "Title").unwrap();
        ws.merge_cells(Merge::new(CellAddress::new(1, 1), 3, 1))
            .unwrap();
        ws.set_cell_value("C2", 1.0).unwrap();

        let options = CsvWriteOptions::default();
        assert_eq!(to_string(&ws, &options), "Title,,\r\n,,1\r\n");
    }

    #[test]
    fn test_sheet_out_of_bounds() {
        let wb = Workbook::new();
        let err = CsvWriter::write_sheet(&wb, 0, Vec::new(), &CsvWriteOptions::default())
            .unwrap_err();
        assert!(matches!(err, CsvError::SheetOutOfBounds { index: 0, count: 0 }));
    }

    #[test]
    fn test_serial_to_datetime() {
        let dt = serial_to_datetime(1.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
        let dt = serial_to_datetime(61.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(1900, 3, 1).unwrap());
        assert!(serial_to_datetime(f64::NAN).is_none());
    }
}
