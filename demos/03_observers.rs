//! Example 03: Observing Changes
//!
//! This example demonstrates subscribing to store changes. Each observer is
//! called after a mutation with the change and the full task list.
//!
//! Run with: cargo run --example 03_observers

use eyre::Result;
use std::cell::RefCell;
use std::rc::Rc;
use tasklist::Store;

fn main() -> Result<()> {
    println!("TaskList Observer Example");
    println!("=========================\n");

    let mut store = Store::with_demo_tasks();

    // Observer 1: print every change
    let printer = store.subscribe(|change, tasks| {
        println!("   {:?} -> {} tasks", change, tasks.len());
    });

    // Observer 2: count finished tasks after each change
    let finished_counts = Rc::new(RefCell::new(Vec::new()));
    store.subscribe({
        let finished_counts = finished_counts.clone();
        move |_, tasks| {
            let finished = tasks.iter().filter(|t| t.is_finished).count();
            finished_counts.borrow_mut().push(finished);
        }
    });

    println!("Mutating the store:");
    let id = store.add_task("Write the release notes")?;
    store.toggle_task(id)?;
    store.delete_at(0)?;

    // Failed operations notify nobody
    let _ = store.add_task("");
    let _ = store.toggle_at(99);

    println!("\nUnsubscribing the printer...");
    store.unsubscribe(printer);
    store.add_task("Quiet change")?;

    println!("\nFinished counts seen: {:?}", finished_counts.borrow());

    println!("\nExample complete!");
    Ok(())
}
