//! Word counting over a byte stream, built only on the public table API.
//!
//! A word is a maximal run of ASCII alphanumeric bytes. Matching is
//! case-sensitive; every other byte separates words.

use crate::chained_hash_map::ChainedHashMap;
use crate::error::WordCountError;
use crate::resolve;
use core::fmt;
use log::debug;
use std::io::BufRead;

/// Bucket count used by `count_words`.
pub const DEFAULT_BUCKETS: usize = 1024;

/// Occurrence counts keyed by word.
#[derive(Debug)]
pub struct WordCounts {
    table: ChainedHashMap<u64>,
}

impl WordCounts {
    pub fn get(&self, word: &str) -> Option<u64> {
        self.table.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Total number of word occurrences.
    pub fn total(&self) -> u64 {
        let mut total: u64 = 0;
        self.table.iterate(|_, n| total += *n);
        total
    }

    /// Counts in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.table.iter().map(|(w, n)| (w, *n))
    }

    /// Counts ordered by word.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut v: Vec<_> = self.iter().collect();
        v.sort_unstable_by(|a, b| a.0.cmp(b.0));
        v
    }

    pub fn into_table(self) -> ChainedHashMap<u64> {
        self.table
    }
}

impl fmt::Display for WordCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (word, n) in self.iter() {
            writeln!(f, "{}: {}", word, n)?;
        }
        Ok(())
    }
}

/// Counts words read from `reader` using `DEFAULT_BUCKETS` buckets.
pub fn count_words<R: BufRead>(reader: R) -> Result<WordCounts, WordCountError> {
    count_words_with_buckets(reader, DEFAULT_BUCKETS)
}

/// Counts words read from `reader`. Stops at the first read error.
pub fn count_words_with_buckets<R: BufRead>(
    reader: R,
    num_buckets: usize,
) -> Result<WordCounts, WordCountError> {
    let mut table = ChainedHashMap::new(num_buckets)?;
    for line in reader.split(b'\n') {
        let line = line?;
        for word in line.split(|b| !b.is_ascii_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            // ASCII alphanumerics are always valid UTF-8.
            if let Ok(word) = core::str::from_utf8(word) {
                table.insert_with_resolver(word, 1, resolve::sum);
            }
        }
    }
    debug!("counted {} distinct words", table.len());
    Ok(WordCounts { table })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    #[test]
    fn counts_alphanumeric_runs() {
        let counts = count_words(Cursor::new("the cat, the hat!\nThe 2nd cat")).unwrap();
        assert_eq!(counts.get("the"), Some(2));
        assert_eq!(counts.get("The"), Some(1));
        assert_eq!(counts.get("cat"), Some(2));
        assert_eq!(counts.get("hat"), Some(1));
        assert_eq!(counts.get("2nd"), Some(1));
        assert_eq!(counts.get("dog"), None);
        assert_eq!(counts.len(), 5);
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn non_ascii_bytes_separate_words() {
        let counts = count_words(Cursor::new("caf\u{e9} na\u{ef}ve")).unwrap();
        let words: Vec<_> = counts.sorted().into_iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["caf", "na", "ve"]);
    }

    #[test]
    fn empty_input_has_no_words() {
        let counts = count_words(Cursor::new("")).unwrap();
        assert!(counts.is_empty());
        assert_eq!(counts.to_string(), "");
    }

    #[test]
    fn display_prints_word_count_lines() {
        let counts = count_words_with_buckets(Cursor::new("b a b"), 1).unwrap();
        assert_eq!(counts.to_string(), "b: 2\na: 1\n");
    }

    #[test]
    fn zero_buckets_is_an_error() {
        match count_words_with_buckets(Cursor::new("a"), 0) {
            Err(WordCountError::Create(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    struct FailingReader;
    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        }
    }

    #[test]
    fn read_error_stops_processing() {
        let r = io::BufReader::new(FailingReader);
        match count_words(r) {
            Err(e @ WordCountError::Io(_)) => {
                assert_eq!(e.to_string(), "failed to read input: boom")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
