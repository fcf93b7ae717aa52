//! Shared cell formats for the generated workbook.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder};

/// Currency display: thousands separator, two decimals, negatives in red
pub const CURRENCY_NUM_FORMAT: &str = "#,##0.00_);[Red](#,##0.00)";

const HEADER_FILL: Color = Color::RGB(0xF2F2F2);
const BORDER_GREY: Color = Color::RGB(0xCCCCCC);

/// The fixed set of formats every sheet builder draws from
#[derive(Debug, Clone)]
pub struct SheetFormats {
    /// Bold on a grey fill with thin borders, for header rows
    pub header: Format,
    pub currency: Format,
    pub bold: Format,
    pub bold_currency: Format,
    /// Summary banner: bold, 14pt, centered
    pub title: Format,
}

impl SheetFormats {
    pub fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_background_color(HEADER_FILL)
            .set_border(FormatBorder::Thin)
            .set_border_color(BORDER_GREY)
            .set_align(FormatAlign::VerticalCenter);

        let currency = Format::new().set_num_format(CURRENCY_NUM_FORMAT);
        let bold = Format::new().set_bold();
        let bold_currency = Format::new().set_bold().set_num_format(CURRENCY_NUM_FORMAT);
        let title = Format::new()
            .set_bold()
            .set_font_size(14)
            .set_align(FormatAlign::Center);

        Self {
            header,
            currency,
            bold,
            bold_currency,
            title,
        }
    }
}

impl Default for SheetFormats {
    fn default() -> Self {
        Self::new()
    }
}
