use color_eyre::Result;
use polars::prelude::DataFrame;
use std::io::{BufRead, Write};

use crate::prompt::Console;

/// Rows `[offset, offset + len)` of `trips`; empty once past the end.
pub fn page(trips: &DataFrame, offset: usize, len: usize) -> DataFrame {
    if offset >= trips.height() {
        return trips.clear();
    }
    trips.slice(offset as i64, len)
}

/// Page through `trips` while the user keeps answering "yes".
///
/// Returns the number of pages shown.
pub fn view_rows<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    trips: &DataFrame,
    rows_per_page: usize,
) -> Result<usize> {
    let mut offset = 0;
    let mut pages = 0;
    let mut prompt =
        format!("\nWould you like to view the first {rows_per_page} rows of data? Enter yes or no.");

    while console.confirm(&prompt)? {
        let rows = page(trips, offset, rows_per_page);
        if rows.height() == 0 {
            console.say("There are no more rows to display.")?;
            break;
        }
        console.say(&rows)?;
        offset += rows_per_page;
        pages += 1;
        prompt =
            format!("\nWould you like to view the next {rows_per_page} rows of data? Enter yes or no.");
    }

    console.separator()?;
    Ok(pages)
}
