use std::collections::VecDeque;

/// Separators tried in order: paragraphs, lines, words, characters
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Recursive character text splitter
///
/// Splits on the first separator present in the text, merges the pieces back into
/// chunks of at most `chunk_size` characters with up to `chunk_overlap` characters
/// carried over between neighbours, and recurses with finer separators on pieces that
/// are still too large. Each separator stays attached to the start of the piece after it.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        self.separators = separators;
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split text into trimmed, non-empty chunks
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.separators)
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let mut separator = separators.last().map(String::as_str).unwrap_or("");
        let mut finer: &[String] = &[];

        for (idx, candidate) in separators.iter().enumerate() {
            if candidate.is_empty() {
                separator = "";
                break;
            }
            if text.contains(candidate.as_str()) {
                separator = candidate;
                finer = &separators[idx + 1..];
                break;
            }
        }

        let mut chunks = Vec::new();
        let mut small_pieces: Vec<&str> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(piece) < self.chunk_size {
                small_pieces.push(piece);
                continue;
            }

            if !small_pieces.is_empty() {
                chunks.extend(self.merge_pieces(&small_pieces));
                small_pieces.clear();
            }

            if finer.is_empty() {
                if let Some(chunk) = join_pieces(&[piece]) {
                    chunks.push(chunk);
                }
            } else {
                chunks.extend(self.split_recursive(piece, finer));
            }
        }

        if !small_pieces.is_empty() {
            chunks.extend(self.merge_pieces(&small_pieces));
        }

        chunks
    }

    /// Greedily merge pieces up to `chunk_size`, keeping an overlap tail
    fn merge_pieces(&self, pieces: &[&str]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for &piece in pieces {
            let len = char_len(piece);

            if total + len > self.chunk_size && !window.is_empty() {
                if let Some(chunk) = join_pieces(window.make_contiguous()) {
                    chunks.push(chunk);
                }

                while total > self.chunk_overlap || (total + len > self.chunk_size && total > 0) {
                    let Some(front) = window.pop_front() else {
                        break;
                    };
                    total -= char_len(front);
                }
            }

            window.push_back(piece);
            total += len;
        }

        if let Some(chunk) = join_pieces(window.make_contiguous()) {
            chunks.push(chunk);
        }

        chunks
    }
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(1000, 100)
    }
}

/// Split on `separator`, attaching each separator to the piece after it
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(idx, c)| &text[idx..idx + c.len_utf8()])
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices(separator) {
        pieces.push(&text[start..idx]);
        start = idx;
    }
    pieces.push(&text[start..]);
    pieces.retain(|piece| !piece.is_empty());
    pieces
}

fn join_pieces(pieces: &[&str]) -> Option<String> {
    let joined: String = pieces.concat();
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeping_separator() {
        assert_eq!(
            split_keeping_separator("a. b. c", ". "),
            vec!["a", ". b", ". c"]
        );
        assert_eq!(split_keeping_separator(". . x", ". "), vec![". ", ". x"]);
        assert_eq!(split_keeping_separator("\n\nx", "\n"), vec!["\n", "\nx"]);
        assert_eq!(split_keeping_separator("abc", ""), vec!["a", "b", "c"]);
        assert_eq!(split_keeping_separator("no match", "\n"), vec!["no match"]);
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let splitter = TextSplitter::new(1000, 100);
        let chunks = splitter.split_text("  A short page of text.  ");
        assert_eq!(chunks, vec!["A short page of text."]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let splitter = TextSplitter::default();
        assert!(splitter.split_text("").is_empty());
        assert!(splitter.split_text("   \n\n  ").is_empty());
    }

    #[test]
    fn test_word_split_without_overlap() {
        let splitter = TextSplitter::new(10, 0);
        let chunks = splitter.split_text("Hello world foo bar baz");
        assert_eq!(chunks, vec!["Hello", "world foo", "bar baz"]);
    }

    #[test]
    fn test_word_split_with_overlap() {
        let splitter = TextSplitter::new(10, 4);
        let chunks = splitter.split_text("Hello world foo bar baz");
        assert_eq!(chunks, vec!["Hello", "world foo", "foo bar", "bar baz"]);
    }

    #[test]
    fn test_sentences_split_on_word_boundaries() {
        let splitter = TextSplitter::new(30, 0);
        let chunks = splitter.split_text("First sentence here. Second one is here. Third.");
        assert_eq!(chunks, vec!["First sentence here. Second", "one is here. Third."]);
    }

    #[test]
    fn test_paragraph_separator_preferred() {
        let splitter = TextSplitter::new(20, 0);
        let chunks = splitter.split_text("Old town walk\n\nHarbour dinner\nand music");
        assert_eq!(chunks, vec!["Old town walk", "Harbour dinner", "and music"]);
    }

    #[test]
    fn test_sentence_separator_opt_in() {
        let splitter = TextSplitter::new(30, 0)
            .with_separators(vec![". ".to_string(), " ".to_string(), String::new()]);
        let chunks = splitter.split_text("First sentence here. Second one is here. Third.");
        assert_eq!(chunks, vec!["First sentence here", ". Second one is here. Third."]);
    }

    #[test]
    fn test_character_fallback() {
        let splitter = TextSplitter::new(5, 0);
        let chunks = splitter.split_text("abcdefghij");
        assert_eq!(chunks, vec!["abcde", "fghij"]);
    }

    #[test]
    fn test_chunks_respect_size_limit() {
        let text = "Lorem ipsum dolor sit amet\n\nconsectetur adipiscing elit sed do eiusmod\ntempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat";
        let splitter = TextSplitter::new(40, 10);
        let chunks = splitter.split_text(text);

        assert!(chunks.len() > 3);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.chars().count() <= 40, "chunk too long: {:?}", chunk);
        }
        assert!(chunks[0].starts_with("Lorem"));
        assert!(chunks.last().unwrap().ends_with("consequat"));
    }

    #[test]
    fn test_multibyte_characters_counted_as_chars() {
        let splitter = TextSplitter::new(4, 0);
        let chunks = splitter.split_text("\u{E9}\u{E9}\u{E9}\u{E9}\u{E9}\u{E9}");
        assert_eq!(chunks, vec!["\u{E9}\u{E9}\u{E9}\u{E9}", "\u{E9}\u{E9}"]);
    }

    #[test]
    fn test_custom_separators() {
        let splitter = TextSplitter::new(6, 0).with_separators(vec!["|".to_string()]);
        let chunks = splitter.split_text("ab|cd|efgh");
        assert_eq!(chunks, vec!["ab|cd", "|efgh"]);
        assert_eq!(splitter.chunk_size(), 6);
        assert_eq!(splitter.chunk_overlap(), 0);
    }
}
