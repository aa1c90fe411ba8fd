//! Example 02: Tabs and Search
//!
//! This example demonstrates the view filter: completion tabs, free-text
//! search, and mapping displayed rows back to task ids.
//!
//! Run with: cargo run --example 02_filtering

use eyre::Result;
use tasklist::{Store, Tab, ViewState, filter};

fn main() -> Result<()> {
    println!("TaskList Filtering Example");
    println!("==========================\n");

    let mut store = Store::new();
    for title in ["Buy Milk", "clean house", "BUY bread", "Pay rent"] {
        store.add_task(title)?;
    }
    store.toggle_at(3)?;

    // Filter 1: each tab
    for tab in Tab::ALL_TABS {
        let shown = filter(store.tasks(), tab, "");
        println!("{} ({} tasks):", tab, shown.len());
        for task in shown {
            println!("   - {}", task.title);
        }
    }
    println!();

    // Filter 2: case-insensitive search, order preserved
    println!("Search \"  buy \":");
    for task in filter(store.tasks(), Tab::All, "  buy ") {
        println!("   - {}", task.title);
    }
    println!();

    // Rows refer to the filtered view, not the full list
    let mut view = ViewState::new(Tab::Todo);
    view.set_search("buy");
    println!("Rows in TODO + \"buy\":");
    for row in view.rows(&store) {
        println!("   {}. {}", row.number, row.title);
    }

    let id = view.resolve(&store, 2)?;
    store.toggle_task(id)?;
    println!("\nToggled row 2 -> {}", store.get(id).map(|t| t.title.as_str()).unwrap_or("?"));

    println!("\nExample complete!");
    Ok(())
}
