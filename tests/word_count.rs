use chained_hashmap::word_count::{count_words, count_words_with_buckets};
use std::fs::File;
use std::io::BufReader;

#[test_log::test]
fn counts_words_in_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/count.txt");
    let file = File::open(path).expect("fixture present");
    let counts = count_words(BufReader::new(file)).unwrap();

    assert_eq!(counts.get("it"), Some(3));
    assert_eq!(counts.get("It"), Some(1));
    assert_eq!(counts.get("was"), Some(4));
    assert_eq!(counts.get("of"), Some(4));
    assert_eq!(counts.get("age"), Some(2));
    assert_eq!(counts.get("foolishness"), Some(1));
    assert_eq!(counts.total(), 24);
}

/// A single bucket forces every word into one chain; counts must not change.
#[test_log::test]
fn bucket_count_does_not_change_counts() {
    let text = "a b c a b a 1 22 1";
    let wide = count_words_with_buckets(text.as_bytes(), 64).unwrap();
    let narrow = count_words_with_buckets(text.as_bytes(), 1).unwrap();
    assert_eq!(wide.sorted(), narrow.sorted());
    assert_eq!(
        narrow.sorted(),
        vec![("1", 2), ("22", 1), ("a", 3), ("b", 2), ("c", 1)]
    );
}

#[test]
fn counts_hand_back_the_table() {
    let counts = count_words("x y x".as_bytes()).unwrap();
    let mut table = counts.into_table();
    assert_eq!(table.remove("x"), Some(2));
    assert_eq!(table.len(), 1);
}
