// File: crates/chart-dioxus/src/bin/desktop_demo.rs
// Purpose: Launches the delivery dashboard (bar + line ChartCanvas) in a desktop window.

#[cfg(feature = "desktop")]
fn main() {
    if let Err(e) = chart_dioxus::ui::run_demo_ui() {
        eprintln!("dashboard error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "desktop"))]
fn main() {
    if let Err(e) = chart_dioxus::run_demo_ui() {
        eprintln!("{e}");
        std::process::exit(2);
    }
}
