use std::fs;
use std::io;
use std::path::Path;

use crate::engine::ScheduleRow;
use crate::types::Money;

/// Column header shared by the schedule table and the CSV download.
pub const SCHEDULE_HEADER: &str = "Month,Interest,Principal,Payment,Remaining Balance";

/// Render a schedule as delimited text.
///
/// One line per row in month order, plain 2-decimal numerics with no
/// currency symbol or grouping, comma separated, no trailing newline.
/// Any standard CSV reader reproduces the values at the emitted precision.
pub fn to_delimited_text(schedule: &[ScheduleRow]) -> String {
    let mut out = String::with_capacity(SCHEDULE_HEADER.len() + schedule.len() * 40);
    out.push_str(SCHEDULE_HEADER);
    for row in schedule {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{},{}",
            row.month,
            cents(row.interest),
            cents(row.principal),
            cents(row.payment),
            cents(row.balance),
        ));
    }
    out
}

/// Write the delimited schedule to a path chosen by the caller.
pub fn write_csv_file(schedule: &[ScheduleRow], path: &Path) -> io::Result<()> {
    fs::write(path, to_delimited_text(schedule))
}

/// Fixed 2-decimal rendering. Row values arrive already rounded to cents,
/// so rescaling only pads trailing zeros.
fn cents(value: Money) -> String {
    let mut v = value;
    v.rescale(2);
    v.to_string()
}
