use chat_markdown_engine::{TableCellNode, TableNode, TableRow};
use dioxus::prelude::*;

#[component]
pub fn TableView(table: TableNode) -> Element {
    rsx! {
        table {
            thead {
                {row(table.header, true)}
            }
            tbody {
                for body_row in table.rows {
                    {row(body_row, false)}
                }
            }
        }
    }
}

fn row(row: TableRow, header: bool) -> Element {
    rsx! {
        tr {
            for cell in row.cells {
                {table_cell(cell, header)}
            }
        }
    }
}

fn table_cell(cell: TableCellNode, header: bool) -> Element {
    let style = format!("text-align: {}", cell.align.as_css());
    let text = cell.text;
    if header {
        rsx! { th { style, "{text}" } }
    } else {
        rsx! { td { style, "{text}" } }
    }
}
