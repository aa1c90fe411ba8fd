//! Example 01: Basic Usage
//!
//! This example demonstrates adding, toggling and deleting tasks in a
//! TaskList store.
//!
//! Run with: cargo run --example 01_basic_usage

use eyre::Result;
use tasklist::{Store, StoreError};

fn main() -> Result<()> {
    println!("TaskList Basic Usage Example");
    println!("============================\n");

    // Start from the built-in demo list
    let mut store = Store::with_demo_tasks();
    println!("Store opened with {} demo tasks.\n", store.len());

    // ADD: titles are trimmed before they are stored
    println!("1. ADD - Appending a new task...");
    let id = store.add_task("  Buy milk  ")?;
    if let Some(task) = store.get(id) {
        println!("   Added {:?} with ID: {}\n", task.title, id);
    }

    // ADD: blank titles are ignored
    println!("2. ADD - Trying a blank title...");
    match store.add_task("   ") {
        Err(StoreError::EmptyInput) => println!("   Ignored, still {} tasks.\n", store.len()),
        other => println!("   Unexpected result: {:?}\n", other),
    }

    // TOGGLE: by id
    println!("3. TOGGLE - Marking the new task finished...");
    let finished = store.toggle_task(id)?;
    println!("   Finished = {}\n", finished);

    // DELETE: by position in the full list
    println!("4. DELETE - Removing the first task...");
    let removed = store.delete_at(0)?;
    println!("   Removed: {}\n", removed.title);

    // Out-of-range positions are reported, not ignored
    println!("5. DELETE - Position past the end...");
    if let Err(e) = store.delete_at(100) {
        println!("   Error: {}\n", e);
    }

    println!("Final list:");
    for task in store.tasks() {
        let mark = if task.is_finished { "x" } else { " " };
        println!("   [{}] {}", mark, task.title);
    }

    println!("\nExample complete!");
    Ok(())
}
