//! # sheetmark-html
//!
//! Interpreter for HTML tables annotated with `data-xls-*` attributes.
//!
//! Each `<table data-xls-sheet="...">` becomes a worksheet of a
//! [`sheetmark_core::Workbook`]. Attributes on `table`, `col`, `tr` and
//! `td`/`th` elements drive sheet settings, column and row dimensions, cell
//! types, styles, merges, hyperlinks, comments, list validations and images.
//!
//! ## Example
//!
//! ```rust
//! use sheetmark_core::CellValue;
//! use sheetmark_html::{InterpretOptions, StyleRegistry, TableInterpreter};
//!
//! let html = r#"
//!   <table data-xls-sheet="Sales" data-xls-freeze="A2">
//!     <thead><tr><th data-xls-apply="th">Total</th></tr></thead>
//!     <tbody><tr><td data-xls-type="number" data-xls-number-locale="fr-FR">1 234,56</td></tr></tbody>
//!   </table>"#;
//!
//! let registry = StyleRegistry::new();
//! let workbook = TableInterpreter::new(&registry, InterpretOptions::default())
//!     .from_html(html)
//!     .unwrap();
//!
//! let sheet = workbook.worksheet(0).unwrap();
//! assert_eq!(sheet.value_at(2, 1), Some(&CellValue::Number(1234.56)));
//! ```

pub mod coerce;
pub mod conditional;
pub mod dom;
pub mod error;
pub mod image;
pub mod interpreter;
pub mod options;
pub mod presets;
pub mod registry;
pub mod schema;
pub mod sheet_name;
pub mod styler;
pub mod validator;

pub use coerce::{coerce, parse_date_serial, parse_number, ForcedType, TypedScalar};
pub use conditional::parse_conditional;
pub use dom::{parse_html, Element, Node};
pub use error::{Error, LookupError, Result, ValidationError};
pub use interpreter::TableInterpreter;
pub use options::{InterpretOptions, MergePolicy};
pub use presets::presets;
pub use registry::StyleRegistry;
pub use schema::Annotation;
pub use sheet_name::{dedupe_sheet_name, sanitize_sheet_name};
pub use styler::{directive_fragment, SheetStyler};
pub use validator::AttributeValidator;
