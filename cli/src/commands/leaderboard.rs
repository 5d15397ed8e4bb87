use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use localsearch_core::Leaderboard;
use std::path::Path;

pub fn handle_leaderboard(file: &Path, clicks: &[usize]) -> Result<()> {
    let mut board = Leaderboard::from_file(file)?;
    for &column in clicks {
        board.click_header(column);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Model").add_attribute(Attribute::Bold)];
    for i in 0..board.columns().len() {
        let mut cell = Cell::new(board.header(i)).add_attribute(Attribute::Bold);
        if board.state().direction_of(i).is_some() {
            cell = cell.fg(Color::Cyan);
        }
        header.push(cell);
    }
    table.set_header(header);

    for i in 1..=board.columns().len() {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in board.rows() {
        let mut cells = vec![Cell::new(&row.label)];
        for i in 0..board.columns().len() {
            cells.push(match row.cells.get(i).copied().flatten() {
                Some(v) => Cell::new(format!("{:.2}", v)),
                None => Cell::new("-"),
            });
        }
        if row.is_average {
            cells = cells
                .into_iter()
                .map(|c| c.add_attribute(Attribute::Italic).fg(Color::Yellow))
                .collect();
        }
        table.add_row(cells);
    }

    println!("\n{}", table);
    Ok(())
}
