//! Workbook construction: layout, formats, formula text, and the builder
//! that assembles the six sheets and writes the .xlsx file.

pub mod formulas;
pub mod layout;
mod styles;
mod template;

pub use styles::SheetFormats;
pub use template::TemplateBuilder;
