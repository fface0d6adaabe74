// Logger - Colored console output with timestamps

use chrono::Local;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

#[derive(Clone, Copy)]
pub enum Level {
	Info,
	Success,
	Warning,
	Error,
	Debug,
}

pub fn set_verbose(enabled: bool) {
	VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
	VERBOSE.load(Ordering::Relaxed)
}

/// Prints a timestamped, colored log message to stdout.
/// Debug messages only appear with --verbose.
pub fn log(level: Level, message: &str) {
	if matches!(level, Level::Debug) && !is_verbose() {
		return;
	}

	let time = Local::now().format("%H:%M:%S").to_string().dimmed();
	let icon = match level {
		Level::Info =>    "ℹ".blue().bold(),
		Level::Success => "✔".bright_green().bold(),
		Level::Warning => "⚠".yellow().bold(),
		Level::Error =>   "✘".red().bold(),
		Level::Debug =>   "⚙".bright_blue().bold(),
	};
	println!("[{}] {} {}", time, icon, message);
}

/// Prints a section header with visual separation.
pub fn header(title: &str) {
	println!();
	println!("{}", format!("─── {} ───", title).bright_blue().bold());
}

/// Prints a fit summary with statistics.
pub fn fit_summary(items: usize, dims: usize, explained_variance: f32, duration_secs: f32) {
	println!();
	header("Summary");

	println!("  {} {}", "Items:".bright_blue(), items);
	println!("  {} {}D", "Embeddings:".bright_blue(), dims);
	println!(
		"  {} {:.1}%",
		"Explained variance:".bright_blue(),
		explained_variance * 100.0
	);
	println!("  {} {:.2}s", "Duration:".bright_blue(), duration_secs);
	println!();
}
