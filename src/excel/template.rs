//! Workbook template builder.
//!
//! One-shot transformation: a resolved [`RateRegistry`] in, a six-sheet
//! workbook out. "Inputs & Rates" is built first and "Summary" last, which
//! is also the tab order users see.

use super::formulas;
use super::layout;
use super::styles::SheetFormats;
use crate::error::BudgetResult;
use crate::rates::RateRegistry;
use crate::types::{MaterialCategory, Role, TransportType};
use rust_xlsxwriter::{DataValidation, DataValidationRule, Formula, Workbook, Worksheet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Builds the field-trip cost template workbook
pub struct TemplateBuilder {
    registry: RateRegistry,
    formats: SheetFormats,
}

impl TemplateBuilder {
    pub fn new(registry: RateRegistry) -> Self {
        Self {
            registry,
            formats: SheetFormats::new(),
        }
    }

    pub fn registry(&self) -> &RateRegistry {
        &self.registry
    }

    /// Build the in-memory workbook with all six sheets
    pub fn build(&self) -> BudgetResult<Workbook> {
        let mut workbook = Workbook::new();

        self.build_rates_sheet(&mut workbook)?;
        self.build_staff_sheet(&mut workbook)?;
        self.build_hours_sheet(&mut workbook)?;
        self.build_travel_sheet(&mut workbook)?;
        self.build_materials_sheet(&mut workbook)?;
        self.build_summary_sheet(&mut workbook)?;

        Ok(workbook)
    }

    /// Build the workbook and write it to `output_path`.
    ///
    /// Parent directories are created as needed; an existing file at the
    /// path is overwritten.
    pub fn save(&self, output_path: &Path) -> BudgetResult<()> {
        let mut workbook = self.build()?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        workbook.save(output_path)?;
        debug!(path = %output_path.display(), "workbook written");
        Ok(())
    }

    /// Inputs & Rates: one row per rate parameter, each bound to a
    /// workbook-level defined name so formulas reference it symbolically.
    fn build_rates_sheet(&self, workbook: &mut Workbook) -> BudgetResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(layout::RATES_SHEET)?;

        self.write_header_row(worksheet, &["Item", "Value (EUR)", "Notes"])?;
        set_column_widths(worksheet, &layout::rates::WIDTHS)?;

        for (idx, param) in self.registry.entries().iter().enumerate() {
            let row = layout::rates::FIRST_DATA_ROW + idx as u32 - 1;
            worksheet.write_string(row, layout::rates::COL_ITEM, &param.label)?;
            if param.currency {
                worksheet.write_number_with_format(
                    row,
                    layout::rates::COL_VALUE,
                    param.value,
                    &self.formats.currency,
                )?;
            } else {
                worksheet.write_number(row, layout::rates::COL_VALUE, param.value)?;
            }
            worksheet.write_string(row, layout::rates::COL_NOTES, &param.note)?;
        }

        for (idx, param) in self.registry.entries().iter().enumerate() {
            let sheet_row = layout::rates::FIRST_DATA_ROW + idx as u32;
            workbook.define_name(&param.name, &formulas::rate_name_target(sheet_row))?;
        }

        debug!(
            sheet = layout::RATES_SHEET,
            rates = self.registry.len(),
            "sheet built"
        );
        Ok(())
    }

    /// Staff & Participants: one row per person, with per-diem, overnight
    /// and wage columns derived from the rates and the Hours Log.
    fn build_staff_sheet(&self, workbook: &mut Workbook) -> BudgetResult<()> {
        use layout::staff::*;

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(layout::STAFF_SHEET)?;

        self.write_header_row(
            worksheet,
            &[
                "First name",
                "Last name",
                "Role (WiMi/VA/Hiwi/Unpaid student)",
                "Trip start (date/time)",
                "Trip end (date/time)",
                "Full-day count",
                "Partial-day count (>8h or arr/dep)",
                "Per-diem total (EUR)",
                "Nights",
                "Overnight cost per night (EUR)",
                "Overnight total (EUR)",
                "Hours (from Hours Log)",
                "Hourly rate (EUR)",
                "Wages total (EUR)",
                "Participant subtotal (EUR)",
            ],
        )?;
        set_column_widths(worksheet, &WIDTHS)?;

        let roles = Role::dropdown_labels();
        let role_validation = DataValidation::new().allow_list_strings(&roles)?;
        worksheet.add_data_validation(
            FIRST_DATA_ROW - 1,
            COL_ROLE,
            LAST_DATA_ROW - 1,
            COL_ROLE,
            &role_validation,
        )?;

        for sheet_row in FIRST_DATA_ROW..=LAST_DATA_ROW {
            let row = sheet_row - 1;
            self.write_currency_formula(
                worksheet,
                row,
                COL_PER_DIEM_TOTAL,
                &formulas::per_diem_total(sheet_row),
            )?;
            self.write_currency_formula(
                worksheet,
                row,
                COL_OVERNIGHT_RATE,
                &formulas::overnight_rate_default(),
            )?;
            self.write_currency_formula(
                worksheet,
                row,
                COL_OVERNIGHT_TOTAL,
                &formulas::overnight_total(sheet_row),
            )?;
            worksheet.write_formula(
                row,
                COL_HOURS,
                Formula::new(formulas::hours_from_log(sheet_row)),
            )?;
            self.write_currency_formula(
                worksheet,
                row,
                COL_HOURLY_RATE,
                &formulas::hourly_rate(sheet_row),
            )?;
            self.write_currency_formula(
                worksheet,
                row,
                COL_WAGES_TOTAL,
                &formulas::wages_total(sheet_row),
            )?;
            self.write_currency_formula(
                worksheet,
                row,
                COL_SUBTOTAL,
                &formulas::participant_subtotal(sheet_row),
            )?;
        }

        let totals_row = TOTALS_ROW - 1;
        worksheet.write_string_with_format(
            totals_row,
            COL_PARTIAL_DAYS,
            "Totals:",
            &self.formats.bold,
        )?;
        for col in [
            COL_PER_DIEM_TOTAL,
            COL_OVERNIGHT_TOTAL,
            COL_HOURS,
            COL_WAGES_TOTAL,
            COL_SUBTOTAL,
        ] {
            let sum = formulas::column_sum(col, FIRST_DATA_ROW, LAST_DATA_ROW);
            if col == COL_HOURS {
                worksheet.write_formula(totals_row, col, Formula::new(sum))?;
            } else {
                self.write_currency_formula(worksheet, totals_row, col, &sum)?;
            }
        }

        worksheet.set_freeze_panes(1, 0)?;
        debug!(sheet = layout::STAFF_SHEET, rows = LAST_DATA_ROW - 1, "sheet built");
        Ok(())
    }

    /// Hours Log: append-only table, aggregated into the participant sheet
    /// by exact name match. Hours must be non-negative.
    fn build_hours_sheet(&self, workbook: &mut Workbook) -> BudgetResult<()> {
        use layout::hours::*;

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(layout::HOURS_SHEET)?;

        self.write_header_row(
            worksheet,
            &[
                "Date",
                "Task/Activity",
                "First name",
                "Last name",
                "Role (opt.)",
                "Hours",
            ],
        )?;
        set_column_widths(worksheet, &WIDTHS)?;

        let non_negative =
            DataValidation::new().allow_decimal_number(DataValidationRule::GreaterThanOrEqualTo(0.0));
        worksheet.add_data_validation(
            FIRST_DATA_ROW - 1,
            COL_HOURS,
            LAST_DATA_ROW - 1,
            COL_HOURS,
            &non_negative,
        )?;

        worksheet.set_freeze_panes(1, 0)?;
        debug!(sheet = layout::HOURS_SHEET, "sheet built");
        Ok(())
    }

    /// Travel & Vehicles: ticket/day-rate lines. The rental and private-car
    /// columns stay in the schema but are pinned to zero; shuttle cost is
    /// computed once, centrally, on the Summary sheet.
    fn build_travel_sheet(&self, workbook: &mut Workbook) -> BudgetResult<()> {
        use layout::travel::*;

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(layout::TRAVEL_SHEET)?;

        self.write_header_row(
            worksheet,
            &[
                "Date",
                "Type (Train/Flight/Rental/Private/Taxi/PT)",
                "Route / Purpose / Notes",
                "Ticket/Day rate (EUR)",
                "Qty (days / tickets)",
                "Line item (EUR)",
                "Rental km (estimate)",
                "Rental per-km (EUR)",
                "Rental variable (EUR)",
                "Private-car km",
                "Private-car reimb. (EUR)",
                "Travel subtotal (EUR)",
            ],
        )?;
        set_column_widths(worksheet, &WIDTHS)?;

        let types = TransportType::dropdown_labels();
        let type_validation = DataValidation::new().allow_list_strings(&types)?;
        worksheet.add_data_validation(
            FIRST_DATA_ROW - 1,
            COL_TYPE,
            LAST_DATA_ROW - 1,
            COL_TYPE,
            &type_validation,
        )?;

        for sheet_row in FIRST_DATA_ROW..=LAST_DATA_ROW {
            let row = sheet_row - 1;
            self.write_currency_formula(
                worksheet,
                row,
                COL_LINE_TOTAL,
                &formulas::travel_line_total(sheet_row),
            )?;
            // COL_RENTAL_PER_KM intentionally left empty
            worksheet.write_formula(
                row,
                COL_RENTAL_VARIABLE,
                Formula::new(formulas::suppressed_zero()),
            )?;
            worksheet.write_formula(
                row,
                COL_PRIVATE_REIMB,
                Formula::new(formulas::suppressed_zero()),
            )?;
            self.write_currency_formula(
                worksheet,
                row,
                COL_SUBTOTAL,
                &formulas::travel_row_subtotal(sheet_row),
            )?;
        }

        let totals_row = TOTALS_ROW - 1;
        worksheet.write_string_with_format(totals_row, COL_ROUTE, "Totals:", &self.formats.bold)?;
        for col in [
            COL_LINE_TOTAL,
            COL_RENTAL_VARIABLE,
            COL_PRIVATE_REIMB,
            COL_SUBTOTAL,
        ] {
            self.write_currency_formula(
                worksheet,
                totals_row,
                col,
                &formulas::column_sum(col, FIRST_DATA_ROW, LAST_DATA_ROW),
            )?;
        }

        worksheet.set_freeze_panes(1, 0)?;
        debug!(sheet = layout::TRAVEL_SHEET, rows = LAST_DATA_ROW - 1, "sheet built");
        Ok(())
    }

    /// Material Expenses: consumables, equipment rentals, shipping, permits
    fn build_materials_sheet(&self, workbook: &mut Workbook) -> BudgetResult<()> {
        use layout::materials::*;

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(layout::MATERIALS_SHEET)?;

        self.write_header_row(
            worksheet,
            &[
                "Date",
                "Item / Description",
                "Category (consumables/equipment/shipping/permits/other)",
                "Units",
                "Unit cost (EUR)",
                "Line total (EUR)",
                "Notes",
            ],
        )?;
        set_column_widths(worksheet, &WIDTHS)?;

        let categories = MaterialCategory::dropdown_labels();
        let category_validation = DataValidation::new().allow_list_strings(&categories)?;
        worksheet.add_data_validation(
            FIRST_DATA_ROW - 1,
            COL_CATEGORY,
            LAST_DATA_ROW - 1,
            COL_CATEGORY,
            &category_validation,
        )?;

        for sheet_row in FIRST_DATA_ROW..=LAST_DATA_ROW {
            self.write_currency_formula(
                worksheet,
                sheet_row - 1,
                COL_LINE_TOTAL,
                &formulas::material_line_total(sheet_row),
            )?;
        }

        let totals_row = TOTALS_ROW - 1;
        worksheet.write_string_with_format(totals_row, COL_CATEGORY, "Totals:", &self.formats.bold)?;
        self.write_currency_formula(
            worksheet,
            totals_row,
            COL_LINE_TOTAL,
            &formulas::column_sum(COL_LINE_TOTAL, FIRST_DATA_ROW, LAST_DATA_ROW),
        )?;

        worksheet.set_freeze_panes(1, 0)?;
        debug!(sheet = layout::MATERIALS_SHEET, rows = LAST_DATA_ROW - 1, "sheet built");
        Ok(())
    }

    /// Summary: six category subtotals and the grand total. The shuttle
    /// lump-sum-vs-computed branch lives here and nowhere else.
    fn build_summary_sheet(&self, workbook: &mut Workbook) -> BudgetResult<()> {
        use layout::summary::*;

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(layout::SUMMARY_SHEET)?;
        set_column_widths(worksheet, &WIDTHS)?;

        worksheet.merge_range(
            TITLE_ROW - 1,
            COL_CATEGORY,
            TITLE_ROW - 1,
            COL_NOTES,
            "Field Trip Cost Summary",
            &self.formats.title,
        )?;

        for (col, text) in [(COL_CATEGORY, "Category"), (COL_SUBTOTAL, "Subtotal (EUR)"), (COL_NOTES, "Notes")] {
            worksheet.write_string_with_format(HEADER_ROW - 1, col, text, &self.formats.header)?;
        }

        let categories: [(&str, String, &str); 6] = [
            (
                "Per-diems (total)",
                formulas::summary_pull(
                    layout::STAFF_SHEET,
                    layout::staff::COL_PER_DIEM_TOTAL,
                    layout::staff::TOTALS_ROW,
                ),
                "Staff, lab assistants & Hiwis; unpaid students excluded.",
            ),
            (
                "Overnights",
                formulas::summary_pull(
                    layout::STAFF_SHEET,
                    layout::staff::COL_OVERNIGHT_TOTAL,
                    layout::staff::TOTALS_ROW,
                ),
                "Nights x cost per night.",
            ),
            (
                "Hiwi wages",
                formulas::summary_pull(
                    layout::STAFF_SHEET,
                    layout::staff::COL_WAGES_TOTAL,
                    layout::staff::TOTALS_ROW,
                ),
                "Logged hours x hourly rate.",
            ),
            (
                "Tickets / day-rates (travel)",
                formulas::summary_pull(
                    layout::TRAVEL_SHEET,
                    layout::travel::COL_LINE_TOTAL,
                    layout::travel::TOTALS_ROW,
                ),
                "Trains, flights, taxis, public transport.",
            ),
            (
                "Shuttle cars (base + km) or lump sum",
                formulas::shuttle_cost(),
                "A lump sum > 0 overrides the computed cost.",
            ),
            (
                "Materials & other",
                formulas::summary_pull(
                    layout::MATERIALS_SHEET,
                    layout::materials::COL_LINE_TOTAL,
                    layout::materials::TOTALS_ROW,
                ),
                "Consumables, equipment, shipping, permits.",
            ),
        ];

        for (idx, (label, formula, note)) in categories.iter().enumerate() {
            let row = FIRST_CATEGORY_ROW + idx as u32 - 1;
            worksheet.write_string(row, COL_CATEGORY, *label)?;
            self.write_currency_formula(worksheet, row, COL_SUBTOTAL, formula)?;
            worksheet.write_string(row, COL_NOTES, *note)?;
        }

        let total_row = GRAND_TOTAL_ROW - 1;
        worksheet.write_string_with_format(
            total_row,
            COL_CATEGORY,
            "Grand total (EUR)",
            &self.formats.bold,
        )?;
        worksheet.write_formula_with_format(
            total_row,
            COL_SUBTOTAL,
            Formula::new(formulas::grand_total()),
            &self.formats.bold_currency,
        )?;
        worksheet.write_string(total_row, COL_NOTES, "Sum of the six categories above.")?;

        worksheet.write_string_with_format(NOTES_ROW - 1, COL_CATEGORY, "Notes", &self.formats.bold)?;
        worksheet.write_string(
            NOTES_ROW - 1,
            COL_NOTES,
            "Set rates in 'Inputs & Rates'. Staff, lab assistants & Hiwis may receive \
             per-diems; unpaid students receive overnights only.",
        )?;

        worksheet.set_freeze_panes(HEADER_ROW, 0)?;
        debug!(sheet = layout::SUMMARY_SHEET, "sheet built");
        Ok(())
    }

    fn write_header_row(&self, worksheet: &mut Worksheet, headers: &[&str]) -> BudgetResult<()> {
        for (col, text) in headers.iter().enumerate() {
            worksheet.write_string_with_format(
                layout::HEADER_ROW - 1,
                col as u16,
                *text,
                &self.formats.header,
            )?;
        }
        Ok(())
    }

    fn write_currency_formula(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        formula: &str,
    ) -> BudgetResult<()> {
        worksheet.write_formula_with_format(row, col, Formula::new(formula), &self.formats.currency)?;
        Ok(())
    }
}

fn set_column_widths(worksheet: &mut Worksheet, widths: &[f64]) -> BudgetResult<()> {
    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn builder() -> TemplateBuilder {
        TemplateBuilder::new(RateRegistry::with_defaults())
    }

    #[test]
    fn test_build_succeeds_with_defaults() {
        assert!(builder().build().is_ok());
    }

    #[test]
    fn test_save_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("template.xlsx");

        builder().save(&path).unwrap();

        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/template.xlsx");

        builder().save(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("template.xlsx");
        fs::write(&path, b"stale").unwrap();

        builder().save(&path).unwrap();

        assert!(fs::metadata(&path).unwrap().len() > 5, "replaced the stale file");
    }

    #[test]
    fn test_build_with_overridden_registry() {
        let mut registry = RateRegistry::with_defaults();
        registry.set_value(crate::rates::PER_DIEM, 28.0).unwrap();

        let builder = TemplateBuilder::new(registry);
        assert_eq!(builder.registry().get(crate::rates::PER_DIEM).unwrap().value, 28.0);
        assert!(builder.build().is_ok());
    }
}
