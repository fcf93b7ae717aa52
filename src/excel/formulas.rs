//! Formula text for every derived cell in the workbook.
//!
//! All arithmetic is deferred to the spreadsheet application; this module
//! only assembles the strings. Two rules hold throughout:
//!
//! - Rates are referenced by defined name, never by literal value, so one
//!   edit on "Inputs & Rates" recalculates every dependent cell.
//! - Every derived computation over user-entered cells is wrapped in
//!   `IFERROR(...,0)` so a blank or malformed input degrades to 0 instead of
//!   poisoning the totals chain. Plain sums of already-guarded cells and the
//!   shuttle branch (whose inputs are numeric rate cells) stay unwrapped.

use super::layout::{self, cell, col_letter, sheet_cell, sheet_col_range};
use crate::rates;
use crate::types::Role;

fn iferror_zero(expr: &str) -> String {
    format!("=IFERROR({},0)", expr)
}

/// Per-diem total for one participant row.
///
/// Unpaid students receive no per-diem regardless of day counts. Partial
/// days are billed at the full-day rate; the two terms are kept separate so
/// a reduced partial rate is a one-term edit.
pub fn per_diem_total(row: u32) -> String {
    format!(
        "=IF({role}=\"{unpaid}\",0,IFERROR({full}*{rate}+{partial}*{rate},0))",
        role = cell(layout::staff::COL_ROLE, row),
        unpaid = Role::UnpaidStudent.label(),
        full = cell(layout::staff::COL_FULL_DAYS, row),
        partial = cell(layout::staff::COL_PARTIAL_DAYS, row),
        rate = rates::PER_DIEM,
    )
}

/// Per-row overnight rate: the registry default, editable per row
pub fn overnight_rate_default() -> String {
    format!("={}", rates::OVERNIGHT_DEFAULT)
}

pub fn overnight_total(row: u32) -> String {
    iferror_zero(&format!(
        "{}*{}",
        cell(layout::staff::COL_NIGHTS, row),
        cell(layout::staff::COL_OVERNIGHT_RATE, row)
    ))
}

/// Hours aggregated from the Hours Log by exact first+last name match
pub fn hours_from_log(row: u32) -> String {
    let log = |col| {
        sheet_col_range(
            layout::HOURS_SHEET,
            col,
            layout::hours::FIRST_DATA_ROW,
            layout::hours::LAST_DATA_ROW,
        )
    };
    iferror_zero(&format!(
        "SUMIFS({hours},{first},{first_crit},{last},{last_crit})",
        hours = log(layout::hours::COL_HOURS),
        first = log(layout::hours::COL_FIRST_NAME),
        first_crit = cell(layout::staff::COL_FIRST_NAME, row),
        last = log(layout::hours::COL_LAST_NAME),
        last_crit = cell(layout::staff::COL_LAST_NAME, row),
    ))
}

/// Hourly rate: the registry rate for the hourly-paid role, 0 for all others
pub fn hourly_rate(row: u32) -> String {
    format!(
        "=IF({role}=\"{hourly}\",{rate},0)",
        role = cell(layout::staff::COL_ROLE, row),
        hourly = Role::StudentAssistant.label(),
        rate = rates::HIWI_RATE,
    )
}

pub fn wages_total(row: u32) -> String {
    iferror_zero(&format!(
        "{}*{}",
        cell(layout::staff::COL_HOURS, row),
        cell(layout::staff::COL_HOURLY_RATE, row)
    ))
}

/// Per-diem + overnight + wages; each term already degrades to 0 on its own
pub fn participant_subtotal(row: u32) -> String {
    format!(
        "={}+{}+{}",
        cell(layout::staff::COL_PER_DIEM_TOTAL, row),
        cell(layout::staff::COL_OVERNIGHT_TOTAL, row),
        cell(layout::staff::COL_WAGES_TOTAL, row)
    )
}

/// Ticket/day-rate line: unit rate times quantity
pub fn travel_line_total(row: u32) -> String {
    iferror_zero(&format!(
        "{}*{}",
        cell(layout::travel::COL_UNIT_RATE, row),
        cell(layout::travel::COL_QTY, row)
    ))
}

/// Shuttle cost is computed once, centrally, on the Summary sheet. The
/// per-row vehicle columns are pinned to zero so no rental or private-car
/// amount can be double counted at the line level.
pub fn suppressed_zero() -> String {
    "=0".to_string()
}

pub fn travel_row_subtotal(row: u32) -> String {
    format!(
        "={}+{}+{}",
        cell(layout::travel::COL_LINE_TOTAL, row),
        cell(layout::travel::COL_RENTAL_VARIABLE, row),
        cell(layout::travel::COL_PRIVATE_REIMB, row)
    )
}

pub fn material_line_total(row: u32) -> String {
    iferror_zero(&format!(
        "{}*{}",
        cell(layout::materials::COL_UNITS, row),
        cell(layout::materials::COL_UNIT_COST, row)
    ))
}

/// Column sum for a totals row
pub fn column_sum(col: u16, first_row: u32, last_row: u32) -> String {
    format!(
        "=SUM({}{}:{}{})",
        col_letter(col),
        first_row,
        col_letter(col),
        last_row
    )
}

/// Summary pull of another sheet's totals cell, degraded to 0 on error
pub fn summary_pull(sheet: &str, col: u16, row: u32) -> String {
    iferror_zero(&sheet_cell(sheet, col, row))
}

/// Central shuttle cost: the lump sum wins when set (> 0), otherwise
/// cars * base + kilometers * per-km. This is the only place the branch
/// exists in the workbook.
pub fn shuttle_cost() -> String {
    format!(
        "=IF({lump}>0,{lump},{cars}*{base}+{km}*{per_km})",
        lump = rates::SHUTTLE_LUMPSUM,
        cars = rates::SHUTTLE_CAR_COUNT,
        base = rates::SHUTTLE_BASE,
        km = rates::TOTAL_KM,
        per_km = rates::SHUTTLE_PER_KM,
    )
}

/// Grand total over the six summary categories, and nothing else
pub fn grand_total() -> String {
    column_sum(
        layout::summary::COL_SUBTOTAL,
        layout::summary::FIRST_CATEGORY_ROW,
        layout::summary::LAST_CATEGORY_ROW,
    )
}

/// Defined-name target for a rate cell: "='Inputs & Rates'!$B$2"
pub fn rate_name_target(row: u32) -> String {
    format!(
        "={}!{}",
        layout::sheet_ref(layout::RATES_SHEET),
        layout::abs_cell(layout::rates::COL_VALUE, row)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_per_diem_total_guards_unpaid_students() {
        assert_eq!(
            per_diem_total(2),
            "=IF(C2=\"Student (unpaid)\",0,IFERROR(F2*PER_DIEM+G2*PER_DIEM,0))"
        );
    }

    #[test]
    fn test_overnight_formulas() {
        assert_eq!(overnight_rate_default(), "=OVERNIGHT_DEFAULT");
        assert_eq!(overnight_total(5), "=IFERROR(I5*J5,0)");
    }

    #[test]
    fn test_hours_matches_log_name_columns() {
        assert_eq!(
            hours_from_log(2),
            "=IFERROR(SUMIFS('Hours Log'!$F$2:$F$1000,\
             'Hours Log'!$C$2:$C$1000,A2,'Hours Log'!$D$2:$D$1000,B2),0)"
        );
    }

    #[test]
    fn test_hourly_rate_gates_on_role() {
        assert_eq!(
            hourly_rate(2),
            "=IF(C2=\"Hiwi (student assistant)\",HIWI_RATE,0)"
        );
    }

    #[test]
    fn test_wages_and_subtotal() {
        assert_eq!(wages_total(2), "=IFERROR(L2*M2,0)");
        assert_eq!(participant_subtotal(2), "=H2+K2+N2");
    }

    #[test]
    fn test_travel_row_formulas() {
        assert_eq!(travel_line_total(2), "=IFERROR(D2*E2,0)");
        assert_eq!(suppressed_zero(), "=0");
        assert_eq!(travel_row_subtotal(2), "=F2+I2+K2");
    }

    #[test]
    fn test_material_line_total() {
        assert_eq!(material_line_total(17), "=IFERROR(D17*E17,0)");
    }

    #[test]
    fn test_column_sum() {
        assert_eq!(column_sum(5, 2, 501), "=SUM(F2:F501)");
        assert_eq!(column_sum(7, 2, 301), "=SUM(H2:H301)");
    }

    #[test]
    fn test_summary_pull_wraps_iferror() {
        assert_eq!(
            summary_pull(layout::STAFF_SHEET, layout::staff::COL_PER_DIEM_TOTAL, 302),
            "=IFERROR('Staff & Participants'!H302,0)"
        );
    }

    #[test]
    fn test_shuttle_cost_lump_sum_wins() {
        assert_eq!(
            shuttle_cost(),
            "=IF(SHUTTLE_LUMPSUM>0,SHUTTLE_LUMPSUM,\
             SHUTTLE_CAR_COUNT*SHUTTLE_BASE+TOTAL_KM*SHUTTLE_PER_KM)"
        );
    }

    #[test]
    fn test_grand_total_sums_exactly_six_categories() {
        assert_eq!(grand_total(), "=SUM(B4:B9)");
    }

    #[test]
    fn test_rate_name_target() {
        assert_eq!(rate_name_target(2), "='Inputs & Rates'!$B$2");
        assert_eq!(rate_name_target(9), "='Inputs & Rates'!$B$9");
    }
}
