//! Interactive console menu over the task store.
//!
//! One user action at a time: each menu choice runs to completion,
//! including the synchronous write, before the next prompt is shown.
//! Invalid numeric input is reported and the loop continues.

use chrono::Local;
use std::io::{self, BufRead, Write};
use taskpad_lib::shared::errors::StoreError;
use taskpad_lib::store::types::Task;
use taskpad_lib::store::TaskStore;

pub fn run(store: &mut TaskStore) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Task file: {}", store.path().display());

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "> ")? else {
            break;
        };

        match choice.trim() {
            "1" => list(store),
            "2" => add(store, &mut input)?,
            "3" => toggle(store, &mut input)?,
            "4" => rename(store, &mut input)?,
            "5" => delete(store, &mut input)?,
            "6" => move_task(store, &mut input)?,
            "7" => search(store, &mut input)?,
            "8" => purge(store),
            "0" => break,
            "" => {}
            other => println!("Unknown option: {}", other),
        }
    }

    Ok(())
}

fn print_menu() {
    println!();
    println!("1) List  2) Add  3) Toggle  4) Rename  5) Delete");
    println!("6) Move  7) Search  8) Clear completed  0) Quit");
}

fn list(store: &TaskStore) {
    println!("--- Tasks  {} ---", Local::now().format("%Y-%m-%d %H:%M"));
    if store.is_empty() {
        println!("No tasks yet.");
        return;
    }
    for (pos, task) in store.tasks().iter().enumerate() {
        print_task(pos, task);
    }
}

fn print_task(pos: usize, task: &Task) {
    let mark = if task.done { "x" } else { " " };
    if task.has_date() {
        println!("{:>3}. [{}] [{}] {}", pos + 1, mark, task.date, task.title);
    } else {
        println!("{:>3}. [{}] {}", pos + 1, mark, task.title);
    }
}

fn add(store: &mut TaskStore, input: &mut impl BufRead) -> io::Result<()> {
    let Some(title) = prompt(input, "Task: ")? else {
        return Ok(());
    };
    let Some(date) = prompt(input, "Due date (YYYY-MM-DD, empty for none): ")? else {
        return Ok(());
    };
    report(store.append(&title, Some(&date)));
    Ok(())
}

fn toggle(store: &mut TaskStore, input: &mut impl BufRead) -> io::Result<()> {
    let Some(index) = read_selection(input, "Task number: ")? else {
        return Ok(());
    };
    report(store.toggle(index));
    Ok(())
}

fn rename(store: &mut TaskStore, input: &mut impl BufRead) -> io::Result<()> {
    let Some(index) = read_selection(input, "Task number: ")? else {
        return Ok(());
    };
    let Some(title) = prompt(input, "New title: ")? else {
        return Ok(());
    };
    report(store.rename(index, &title));
    Ok(())
}

fn delete(store: &mut TaskStore, input: &mut impl BufRead) -> io::Result<()> {
    let Some(index) = read_selection(input, "Task number: ")? else {
        return Ok(());
    };
    report(store.remove(index));
    Ok(())
}

fn move_task(store: &mut TaskStore, input: &mut impl BufRead) -> io::Result<()> {
    let Some(from) = read_selection(input, "Move task number: ")? else {
        return Ok(());
    };
    let Some(to) = read_selection(input, "To position: ")? else {
        return Ok(());
    };
    report(store.reorder(from, to));
    Ok(())
}

fn search(store: &mut TaskStore, input: &mut impl BufRead) -> io::Result<()> {
    let Some(query) = prompt(input, "Search: ")? else {
        return Ok(());
    };
    let matches = store.filter(&query);
    if matches.is_empty() {
        println!("No matching tasks.");
        return Ok(());
    }
    for (pos, task) in matches {
        print_task(pos, task);
    }
    Ok(())
}

fn purge(store: &mut TaskStore) {
    match store.purge_completed() {
        Ok(removed) => println!("Removed {} completed task(s).", removed),
        Err(err) => report(Err(err)),
    }
}

/// Prints the outcome of a mutating operation. Persistence failures are
/// shown as well as logged, so the user knows the file was not updated.
fn report(result: Result<(), StoreError>) {
    match result {
        Ok(()) => {}
        Err(err) if err.is_user_error() => println!("!! {}", err),
        Err(err) => {
            tracing::error!(target: "store", %err, "Persistence failure");
            println!("!! Could not save your tasks: {}", err);
        }
    }
}

/// Prints a label, reads one line. None means end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn read_selection(input: &mut impl BufRead, label: &str) -> io::Result<Option<usize>> {
    let Some(raw) = prompt(input, label)? else {
        return Ok(None);
    };
    match parse_selection(&raw) {
        Some(index) => Ok(Some(index)),
        None => {
            println!("Please enter a task number (as shown in the list).");
            Ok(None)
        }
    }
}

/// Parses a 1-indexed selection into a 0-based index. Range checking is the
/// store's job; this only rejects non-numeric and zero input.
fn parse_selection(raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Some(n - 1),
        _ => None,
    }
}
