use clap::builder::styling::{AnsiColor, Color, Style};
use clap::{builder::Styles, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

fn parse_temperature(s: &str) -> Result<f32, String> {
	let val: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if !val.is_finite() || val <= 0.0 {
		Err(format!("temperature must be > 0, got {}", val))
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.usage(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
		.valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "tagspace",
	author,
	version,
	about = "Low-dimensional tag-set embeddings with probabilistic similarity lookup",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {fit}    {fit_args}       {fit_desc}
  {bin} {query}  {query_args}   {query_desc}
  {bin} {sample} {sample_args}  {sample_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "tagspace".bright_blue(),
		fit = "fit".yellow(),
		fit_args = "-i items.json -d 3",
		fit_desc = "Fit and export embeddings".dimmed(),
		query = "query".yellow(),
		query_args = "-i items.json 46736 -k 5",
		query_desc = "Ranked similar items".dimmed(),
		sample = "sample".yellow(),
		sample_args = "-i items.json 46736 -n 3",
		sample_desc = "Weighted random draw".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Fit embeddings from a JSON tag document and export them
	Fit {
		/// JSON input: object mapping identifier to label array
		#[arg(short = 'i', long = "input")]
		input: PathBuf,

		/// Output file for the binary export
		#[arg(short = 'o', long = "output", default_value = crate::config::DEFAULT_EXPORT)]
		output: PathBuf,

		/// Target dimensionality (effective is min(dims, N-1))
		#[arg(short = 'd', long = "dims", default_value_t = crate::config::DEFAULT_DIMS)]
		dims: usize,
	},

	/// Rank the items most similar to an identifier
	Query {
		/// JSON input: object mapping identifier to label array
		#[arg(short = 'i', long = "input")]
		input: PathBuf,

		/// Query identifier
		#[arg(value_name = "ID")]
		id: String,

		/// Number of candidates to return
		#[arg(short = 'k', long = "top", default_value_t = crate::config::DEFAULT_TOP_K)]
		k: usize,

		/// Softmax temperature (> 0; higher = flatter distribution)
		#[arg(short = 't', long = "temperature", default_value_t = crate::config::DEFAULT_TEMPERATURE, value_parser = parse_temperature)]
		temperature: f32,

		/// Target dimensionality for the in-memory fit
		#[arg(short = 'd', long = "dims", default_value_t = crate::config::DEFAULT_DIMS)]
		dims: usize,
	},

	/// Draw similar items by weighted sampling without replacement
	Sample {
		/// JSON input: object mapping identifier to label array
		#[arg(short = 'i', long = "input")]
		input: PathBuf,

		/// Query identifier
		#[arg(value_name = "ID")]
		id: String,

		/// Number of items to draw
		#[arg(short = 'n', long = "samples", default_value_t = crate::config::DEFAULT_SAMPLES)]
		n: usize,

		/// Softmax temperature (> 0; higher = flatter distribution)
		#[arg(short = 't', long = "temperature", default_value_t = crate::config::DEFAULT_TEMPERATURE, value_parser = parse_temperature)]
		temperature: f32,

		/// Target dimensionality for the in-memory fit
		#[arg(short = 'd', long = "dims", default_value_t = crate::config::DEFAULT_DIMS)]
		dims: usize,
	},
}
