//! Tests that a captured memory-diagnostic log scans correctly end to end

use std::fs::File;
use std::io::{BufReader, Cursor, Write};

use vmgrep_core::patterns::{BLOCK_END_REGEX, BLOCK_START_REGEX, MAIN_CPP_FRAME_REGEX};
use vmgrep_core::{ErrorBlock, ErrorBlocks};

const MEMCHECK_LOG: &str = include_str!("fixtures/memcheck.log");

fn scan_fixture() -> (Vec<ErrorBlock>, usize) {
    let mut blocks = ErrorBlocks::new(Cursor::new(MEMCHECK_LOG));
    let collected: Vec<ErrorBlock> = blocks.by_ref().map(|b| b.unwrap()).collect();
    let count = blocks.qualified_count();
    (collected, count)
}

#[test]
fn test_fixture_yields_only_main_cpp_blocks() {
    let (blocks, count) = scan_fixture();

    // 0x101 and 0x103 reference main.cpp; 0x102 does not; 0x104 never ends.
    assert_eq!(blocks.len(), 2);
    assert_eq!(count, blocks.len());
    assert!(blocks[0].content.starts_with("[err:0x101] BEGIN\n"));
    assert!(blocks[1].content.starts_with("[err:0x103] BEGIN\n"));
}

#[test]
fn test_emitted_blocks_are_well_formed() {
    let (blocks, _) = scan_fixture();

    for block in &blocks {
        let lines: Vec<&str> = block.content.lines().collect();
        assert!(BLOCK_START_REGEX.is_match(lines.first().unwrap()));
        assert!(BLOCK_END_REGEX.is_match(lines.last().unwrap()));
        assert!(
            lines.iter().any(|l| MAIN_CPP_FRAME_REGEX.is_match(l)),
            "block should contain a main.cpp frame:\n{}",
            block.content
        );
        assert_eq!(block.line_count, lines.len());
    }
}

#[test]
fn test_blocks_are_verbatim_slices_of_the_input() {
    let (blocks, _) = scan_fixture();

    for block in &blocks {
        assert!(
            MEMCHECK_LOG.contains(&block.content),
            "emitted content should appear byte-for-byte in the input"
        );
    }
}

#[test]
fn test_scanning_twice_gives_identical_results() {
    let (first, first_count) = scan_fixture();
    let (second, second_count) = scan_fixture();

    assert_eq!(first, second);
    assert_eq!(first_count, second_count);
}

#[test]
fn test_scan_from_file_matches_in_memory_scan() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("memcheck.log");
    let mut file = File::create(&path).expect("create fixture copy");
    file.write_all(MEMCHECK_LOG.as_bytes()).expect("write fixture");
    drop(file);

    let reader = BufReader::new(File::open(&path).expect("open fixture copy"));
    let mut blocks = ErrorBlocks::new(reader);
    let from_file: Vec<ErrorBlock> = blocks.by_ref().map(|b| b.unwrap()).collect();

    let (from_memory, _) = scan_fixture();
    assert_eq!(from_file, from_memory);
    assert_eq!(blocks.qualified_count(), 2);
}

#[test]
fn test_trailing_unterminated_block_is_dropped() {
    let (blocks, _) = scan_fixture();

    // The 0x104 report has no end marker before EOF and must not appear.
    assert!(blocks.iter().all(|b| !b.content.contains("0x104")));
}

#[test]
fn test_fixture_last_line_is_inside_unterminated_block() {
    // Guard the fixture itself: the final line belongs to the 0x104 report,
    // so the drop-at-EOF path above is actually exercised.
    let last = MEMCHECK_LOG
        .lines()
        .filter(|l| !l.is_empty())
        .next_back()
        .unwrap();
    assert!(last.ends_with("(constraints.hpp:77)"));
}
