//! Sentence-aware text chunking with fixed-size overlapping windows

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::types::Chunk;

/// How far back from the window end to look for a sentence boundary
const BOUNDARY_LOOKBACK: usize = 100;

/// Split text into overlapping chunks of roughly `chunk_size` characters.
///
/// The cut prefers the rightmost period within the last
/// [`BOUNDARY_LOOKBACK`] characters of the window; when no period lands
/// after the window start, the raw cut is kept and a mid-sentence split is
/// accepted. Each emitted chunk is trimmed of surrounding whitespace. The
/// next window starts `overlap` characters before the previous cut.
///
/// All positions are character positions, so multi-byte text never gets
/// split inside a code point. Returns an error when `overlap >= chunk_size`,
/// which would prevent the scan from making forward progress.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    if overlap >= chunk_size {
        return Err(Error::ChunkOverlap {
            chunk_size,
            overlap,
        });
    }

    let chars: Vec<char> = text.chars().collect();
    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let len = chars.len();

    if len <= chunk_size {
        return Ok(vec![text.to_string()]);
    }

    // Byte offset for a (possibly past-the-end) character position.
    let byte_at = |pos: usize| -> usize {
        if pos >= len {
            text.len()
        } else {
            offsets[pos]
        }
    };

    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < len {
        let mut end = start + chunk_size;

        if end < len {
            let window_start = (start + chunk_size).saturating_sub(BOUNDARY_LOOKBACK);
            let last_period = (window_start..end).rev().find(|&pos| chars[pos] == '.');

            if let Some(period) = last_period {
                if period > start {
                    end = period + 1;
                }
            }
        }

        let slice = &text[byte_at(start)..byte_at(end)];
        chunks.push(slice.trim().to_string());

        // The boundary adjustment can pull `end` back into the overlap when
        // chunk_size is within BOUNDARY_LOOKBACK of the overlap; the scan
        // must still move forward.
        start = end.saturating_sub(overlap).max(start + 1);
    }

    Ok(chunks)
}

/// Chunker that turns a source document into ordered [`Chunk`] records
pub struct DocumentChunker {
    chunk_size: usize,
    overlap: usize,
}

impl DocumentChunker {
    /// Create a chunker from the chunking configuration
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            overlap: config.chunk_overlap,
        }
    }

    /// Chunk a document, attaching source id and position to each piece
    pub fn chunk_document(&self, source_id: &str, text: &str) -> Result<Vec<Chunk>> {
        let pieces = chunk_text(text, self.chunk_size, self.overlap)?;
        let total = pieces.len();

        Ok(pieces
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk {
                text,
                source_id: source_id.to_string(),
                index,
                total,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(n: usize) -> String {
        (0..n)
            .map(|i| format!("Sentence number {} carries several plain words. ", i))
            .collect()
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let text = "A short clause.";
        let chunks = chunk_text(text, 2000, 200).expect("chunk");
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk_size() {
        let err = chunk_text("anything at all", 100, 100).unwrap_err();
        assert!(matches!(
            err,
            Error::ChunkOverlap {
                chunk_size: 100,
                overlap: 100
            }
        ));
        assert!(chunk_text("anything at all", 100, 150).is_err());
    }

    #[test]
    fn cuts_land_after_sentence_boundaries() {
        let text = sentences(40);
        let chunks = chunk_text(&text, 300, 50).expect("chunk");
        assert!(chunks.len() > 1);
        // Every non-final chunk got backtracked to the period before the
        // raw cut, since the text has a period every ~45 characters.
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.ends_with('.'), "chunk did not end at a period: {:?}", chunk);
        }
    }

    #[test]
    fn windows_cover_the_whole_text_with_overlap() {
        let text = sentences(40);
        let chunks = chunk_text(&text, 300, 50).expect("chunk");

        // Adjacent chunks share text: the head of each chunk must appear in
        // its predecessor, and every chunk body must exist in the source.
        for pair in chunks.windows(2) {
            let head: String = pair[1].chars().take(20).collect();
            assert!(
                pair[0].contains(head.trim()),
                "no overlap between adjacent chunks"
            );
        }
        for chunk in &chunks {
            assert!(text.contains(chunk.as_str()));
        }

        // The final chunk reaches the end of the input.
        let tail = text.trim_end();
        assert!(tail.ends_with(chunks.last().expect("nonempty").as_str()));
    }

    #[test]
    fn falls_back_to_raw_cut_without_periods() {
        let text = "word ".repeat(200);
        let chunks = chunk_text(&text, 300, 50).expect("chunk");
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 300));
    }

    #[test]
    fn terminates_when_boundaries_bite_into_the_overlap() {
        // Periods every few characters with a window nearly as large as the
        // chunk; the cut regularly lands inside the overlap region.
        let text = "Ok. No. Go. So. Lo. Ho. ".repeat(50);
        let chunks = chunk_text(&text, 60, 50).expect("chunk");
        assert!(!chunks.is_empty());
        assert!(text.trim_end().ends_with(
            chunks.last().expect("nonempty").as_str()
        ));
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        let text = "§1 Kündigungsfrist beträgt drei Monate. ".repeat(60);
        let chunks = chunk_text(&text, 250, 40).expect("chunk");
        assert!(chunks.len() > 1);
    }

    #[test]
    fn document_chunker_numbers_chunks() {
        let config = ChunkingConfig {
            chunk_size: 300,
            chunk_overlap: 50,
        };
        let chunker = DocumentChunker::new(&config);
        let chunks = chunker
            .chunk_document("contract_abc", &sentences(40))
            .expect("chunk");

        let total = chunks.len();
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
            assert_eq!(chunk.total, total);
            assert_eq!(chunk.source_id, "contract_abc");
        }
    }
}
