// Export - compact binary embedding records
//
// One record per stored item, written in store order:
//
//   record := identifier bytes (UTF-8), 0x00, d × little-endian f32
//
// No header, no record count, no dimension field. Readers must know the
// fitted dimensionality out of band; this limitation is part of the
// format contract and is preserved for compatibility.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::{EmbedError, Result};
use crate::store::EmbeddingStore;

/// Writes every stored embedding to `writer` in canonical store order.
///
/// No partial/append mode: the output is either complete or the write
/// failed and the destination must not be assumed usable.
pub fn write<W: Write>(store: &EmbeddingStore, writer: &mut W) -> Result<()> {
	for id in store.ids() {
		let embedding = store.embedding_of(id)?;

		writer.write_all(id.as_bytes())?;
		writer.write_all(&[0u8])?;
		for &value in embedding.as_slice() {
			writer.write_all(&value.to_le_bytes())?;
		}
	}

	writer.flush()?;
	Ok(())
}

/// Writes the store to a file at `path`.
pub fn write_file(store: &EmbeddingStore, path: &Path) -> Result<()> {
	let file = File::create(path)?;
	let mut writer = BufWriter::new(file);
	write(store, &mut writer)
}

/// Reads records back from `reader`.
///
/// `dims` must match the fitted dimensionality that produced the data;
/// the format itself carries no dimension field.
pub fn read<R: Read>(reader: &mut R, dims: usize) -> Result<Vec<(String, Vec<f32>)>> {
	let mut bytes = Vec::new();
	reader.read_to_end(&mut bytes)?;

	let mut records = Vec::new();
	let mut pos = 0;

	while pos < bytes.len() {
		let nul = bytes[pos..]
			.iter()
			.position(|&b| b == 0)
			.ok_or_else(|| EmbedError::InvalidInput("unterminated identifier in record".into()))?;

		let id = std::str::from_utf8(&bytes[pos..pos + nul])
			.map_err(|e| EmbedError::InvalidInput(format!("identifier is not UTF-8: {}", e)))?
			.to_string();
		pos += nul + 1;

		let need = dims * 4;
		if bytes.len() - pos < need {
			return Err(EmbedError::InvalidInput(format!(
				"truncated record for '{}': {} bytes left, {} needed",
				id,
				bytes.len() - pos,
				need
			)));
		}

		let vector: Vec<f32> = bytes[pos..pos + need]
			.chunks_exact(4)
			.map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
			.collect();
		pos += need;

		records.push((id, vector));
	}

	Ok(records)
}

/// Reads records from a file at `path`.
pub fn read_file(path: &Path, dims: usize) -> Result<Vec<(String, Vec<f32>)>> {
	let mut file = File::open(path)?;
	read(&mut file, dims)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn store() -> EmbeddingStore {
		EmbeddingStore::new(
			vec!["46736".into(), "b".into(), "item-c".into()],
			vec![
				vec![0.25, -1.0, 0.5],
				vec![1.0, 0.0, 0.0],
				vec![-0.125, 0.75, 0.0625],
			],
			3,
			0.5,
		)
	}

	#[test]
	fn round_trip_preserves_every_pair() {
		let store = store();
		let mut buffer = Vec::new();
		write(&store, &mut buffer).unwrap();

		let records = read(&mut Cursor::new(buffer), store.dims()).unwrap();

		assert_eq!(records.len(), store.len());
		for (idx, (id, vector)) in records.iter().enumerate() {
			assert_eq!(id, &store.ids()[idx]);
			assert_eq!(
				vector.as_slice(),
				store.embedding_of(id).unwrap().as_slice()
			);
		}
	}

	#[test]
	fn record_layout_is_id_nul_floats() {
		let store = EmbeddingStore::new(vec!["ab".into(), "c".into()], vec![vec![1.0], vec![-2.0]], 1, 1.0);
		let mut buffer = Vec::new();
		write(&store, &mut buffer).unwrap();

		// "ab" 0x00 f32, "c" 0x00 f32
		assert_eq!(&buffer[..3], b"ab\0");
		assert_eq!(&buffer[3..7], &1.0f32.to_le_bytes());
		assert_eq!(&buffer[7..9], b"c\0");
		assert_eq!(&buffer[9..13], &(-2.0f32).to_le_bytes());
		assert_eq!(buffer.len(), 13);
	}

	#[test]
	fn truncated_data_is_rejected() {
		let store = store();
		let mut buffer = Vec::new();
		write(&store, &mut buffer).unwrap();
		buffer.truncate(buffer.len() - 2);

		assert!(matches!(
			read(&mut Cursor::new(buffer), store.dims()),
			Err(EmbedError::InvalidInput(_))
		));
	}

	#[test]
	fn missing_terminator_is_rejected() {
		let bytes = b"no-terminator-here".to_vec();
		assert!(matches!(
			read(&mut Cursor::new(bytes), 1),
			Err(EmbedError::InvalidInput(_))
		));
	}

	#[test]
	fn empty_input_yields_no_records() {
		let records = read(&mut Cursor::new(Vec::new()), 4).unwrap();
		assert!(records.is_empty());
	}
}
