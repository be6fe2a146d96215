// Entry point and high-level CLI flow.
//
// The binary is the console host for the KPI report:
// - Option [1] loads the extracted-data JSON, printing diagnostics.
// - Option [2] renders the categorized KPI report with an interactive
//   expand/collapse sub-loop.
// - Option [3] exports the raw KPI list to a date-stamped CSV file.
// - After viewing or exporting, the user can choose to go back to the
//   selection menu or exit.
mod classify;
mod export;
mod loader;
mod types;
mod util;
mod view;

use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use types::ExtractedCarbonData;

// Simple in-memory app state so we only load the extracted data once but
// can view and export multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<ExtractedCarbonData>,
}

const DEFAULT_INPUT: &str = "extracted_carbon_data.json";

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
///
/// The prompt is reused for both the main menu and the view sub-loop.
fn read_choice() -> String {
    read_line("Enter choice: ")
}

/// Ask the user whether to go back to the selection menu after viewing or
/// exporting.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        let resp = read_line("Back to Menu (Y/N): ").to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load the extracted-data JSON file.
///
/// On success, we store the `ExtractedCarbonData` in `APP_STATE` and print
/// a short textual summary of what happened.
fn handle_load() {
    let input = read_line(&format!("Path to extracted data JSON [{}]: ", DEFAULT_INPUT));
    let path = if input.is_empty() {
        DEFAULT_INPUT
    } else {
        input.as_str()
    };
    match loader::load_extract(path) {
        Ok((data, report)) => {
            println!(
                "Processing extracted data... ({} records read, {} KPIs loaded)",
                util::format_int(report.total_records as i64),
                util::format_int(report.loaded_records as i64)
            );
            if report.skipped_records > 0 {
                println!(
                    "Note: {} records skipped (missing name or value).",
                    util::format_int(report.skipped_records as i64)
                );
            }
            if report.synthesized_ids > 0 {
                println!(
                    "Info: Assigned generated ids to {} records.",
                    util::format_int(report.synthesized_ids as i64)
                );
            }
            println!();
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: render the categorized report and run the
/// expand/collapse sub-loop.
///
/// Toggling is keyed by the identifiers printed next to each section
/// header; `d <kpi id>` toggles a row's detail panel.
fn handle_view() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the extracted data first (option 1).\n");
        return;
    };

    let classified = classify::classify(Some(&data));
    if classified.is_empty() {
        println!("{}", view::render(&classified, &view::ViewState::default()));
        return;
    }

    let mut view_state = view::ViewState::with_defaults(&classified);
    loop {
        println!("{}", view::render(&classified, &view_state));
        println!(
            "Toggle a section with its id (e.g. {}), a row with 'd <kpi id>', or [B] to go back.",
            view::SECTION_SCOPE
        );
        let input = read_choice();
        if input.eq_ignore_ascii_case("b") {
            println!();
            return;
        }
        if let Some(id) = input.strip_prefix("d ") {
            view_state.toggle_details(id.trim());
        } else if !input.is_empty() {
            view_state.toggle_section(&input);
        }
        println!();
    }
}

/// Handle option [3]: export the raw KPI list to CSV.
///
/// The export is a no-op when nothing has been extracted; the rows are
/// written in original input order, not classifier order.
fn handle_export() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    match export::export_carbon_metrics(data.as_ref(), Path::new(".")) {
        Ok(Some(path)) => {
            let count = data.map(|d| d.carbon_metrics.len()).unwrap_or(0);
            println!(
                "Exported {} KPIs to {}\n",
                util::format_int(count as i64),
                path.display()
            );
        }
        Ok(None) => {
            println!("No extracted KPIs to export.\n");
        }
        Err(e) => {
            eprintln!("Write error: {}\n", e);
        }
    }
}

fn main() {
    loop {
        println!("Carbon Accounting KPI Report");
        println!("[1] Load extracted data");
        println!("[2] View KPI report");
        println!("[3] Export KPIs to CSV\n");
        match read_choice().as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!();
                handle_view();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "3" => {
                println!();
                handle_export();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1, 2 or 3.\n");
            }
        }
    }
}
