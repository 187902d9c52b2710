use chrono::{Local, NaiveDateTime};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Builds a console table with highlighted headers.
pub fn build_table<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|header| Cell::new(header.as_ref()).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row.clone());
    }
    table
}
