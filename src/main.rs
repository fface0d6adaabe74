//! tagspace - tag-set embeddings with probabilistic similarity lookup
//!
//! Fits low-dimensional embeddings from a JSON document mapping item
//! identifiers to label arrays, then serves ranked lookups, weighted
//! samples, and a compact binary export.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tagspace::cli::{Cli, Command};
use tagspace::engine::SimilarityEngine;
use tagspace::logger::{self, log, Level};
use tagspace::store::EmbeddingStore;
use tagspace::types::{Candidate, Temperature};
use tagspace::vocab::Item;
use tagspace::{export, fit};

fn main() -> Result<()> {
	let cli = Cli::parse();

	logger::set_verbose(cli.verbose);

	match cli.command {
		Command::Fit { input, output, dims } => run_fit(&input, &output, dims),
		Command::Query { input, id, k, temperature, dims } => {
			run_query(&input, &id, k, temperature, dims)
		}
		Command::Sample { input, id, n, temperature, dims } => {
			run_sample(&input, &id, n, temperature, dims)
		}
	}
}

fn run_fit(input: &Path, output: &Path, dims: usize) -> Result<()> {
	print_header();

	let start = Instant::now();
	let store = fit_from_file(input, dims)?;

	export::write_file(&store, output)
		.with_context(|| format!("Failed to write export to {}", output.display()))?;

	log(
		Level::Success,
		&format!(
			"Exported {} embeddings to {} ({}D per record)",
			store.len(),
			output.display(),
			store.dims()
		),
	);
	log(
		Level::Info,
		"The export carries no dimension field; readers need the fitted dims",
	);

	logger::fit_summary(
		store.len(),
		store.dims(),
		store.explained_variance(),
		start.elapsed().as_secs_f32(),
	);

	Ok(())
}

fn run_query(input: &Path, id: &str, k: usize, temperature: f32, dims: usize) -> Result<()> {
	print_header();

	let store = fit_from_file(input, dims)?;
	let temperature = Temperature::new(temperature)?;

	let engine = SimilarityEngine::new(&store);
	let results = engine.query(id, k, temperature)?;

	log(
		Level::Success,
		&format!("Top {} candidates for '{}'", results.len(), id.bright_blue()),
	);
	print_candidates(&results);

	Ok(())
}

fn run_sample(input: &Path, id: &str, n: usize, temperature: f32, dims: usize) -> Result<()> {
	print_header();

	let store = fit_from_file(input, dims)?;
	let temperature = Temperature::new(temperature)?;

	let engine = SimilarityEngine::new(&store);
	let results = engine.sample(id, n, temperature)?;

	log(
		Level::Success,
		&format!("Sampled {} candidates for '{}'", results.len(), id.bright_blue()),
	);
	print_candidates(&results);

	Ok(())
}

/// Loads the input document and fits the store, logging the fit stats.
fn fit_from_file(input: &Path, dims: usize) -> Result<EmbeddingStore> {
	let items = load_items(input)?;
	log(
		Level::Debug,
		&format!("Loaded {} items from {}", items.len(), input.display()),
	);

	let store = fit::fit(&items, dims)
		.with_context(|| format!("Failed to fit {}", input.display()))?;

	log(
		Level::Info,
		&format!(
			"Fitted {} items → {}D embeddings, explained variance {:.1}%",
			store.len(),
			store.dims(),
			store.explained_variance() * 100.0
		),
	);

	Ok(store)
}

/// Parses the identifier → label-array JSON document, preserving the
/// document's item order.
fn load_items(path: &Path) -> Result<Vec<Item>> {
	let content = fs::read_to_string(path)
		.with_context(|| format!("Failed to read {}", path.display()))?;

	let document: serde_json::Map<String, serde_json::Value> =
		serde_json::from_str(&content)
			.with_context(|| format!("{} is not a JSON object", path.display()))?;

	let mut items = Vec::with_capacity(document.len());
	for (id, value) in document {
		let labels = value
			.as_array()
			.with_context(|| format!("label set for '{}' must be an array of strings", id))?
			.iter()
			.map(|label| {
				label
					.as_str()
					.map(str::to_string)
					.with_context(|| format!("label set for '{}' must be an array of strings", id))
			})
			.collect::<Result<Vec<String>>>()?;

		items.push(Item { id, labels });
	}

	Ok(items)
}

fn print_candidates(results: &[Candidate]) {
	println!();
	for (i, candidate) in results.iter().enumerate() {
		let rank = format!("#{}", i + 1).bright_blue().bold();
		let probability = format!("p={:.4}", candidate.probability);
		let distance = format!("dist={:.4}", candidate.distance).dimmed();
		println!("  {} {} {} {}", rank, candidate.id.bright_white(), probability, distance);
	}
	println!();
}

fn print_header() {
	println!();
	println!(
		"{}",
		format!("─── tagspace v{} ───", env!("CARGO_PKG_VERSION"))
			.bright_blue()
			.bold()
	);
}
