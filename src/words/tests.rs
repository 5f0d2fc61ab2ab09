// Codec tests.
// Unwrapping is okay here, since we want unexpected outcomes to fail tests.
#![allow(clippy::unwrap_used)]

use super::codec::*;
use super::{MASK18, MASK36};

// A couple of 9-byte groups worth of buffer, pre-filled with junk so the
// read-modify-write paths have something to trip over.
fn junk_buffer() -> [u8; 36] {
    let mut buf = [0u8; 36];
    for (i, b) in buf.iter_mut().enumerate() {
        *b = (i as u8).wrapping_mul(0x5d).wrapping_add(0x33);
    }
    buf
}

#[test]
fn word36_round_trip_both_alignments() {
    // 2^36 values is a bit much, so walk the patterns that break shift math:
    // single bits, runs, and alternating fills.
    let mut values: Vec<u64> = vec![0, 1, MASK36, 0o525252525252, 0o252525252525];
    for bit in 0..36 {
        values.push(1u64 << bit);
        values.push(MASK36 ^ (1u64 << bit));
    }
    for v in values {
        for word_offset in 0..4 {
            let mut buf = junk_buffer();
            pack_word36(v, &mut buf, word_offset);
            assert_eq!(
                extract_word36(&buf, word_offset),
                v,
                "word {v:#o} at offset {word_offset}"
            );
        }
    }
}

#[test]
fn word36_pack_leaves_partner_word_alone() {
    let mut buf = junk_buffer();
    pack_word36(0o111111111111, &mut buf, 0);
    pack_word36(0o444444444444, &mut buf, 1);
    assert_eq!(extract_word36(&buf, 0), 0o111111111111);
    assert_eq!(extract_word36(&buf, 1), 0o444444444444);
    // And overwrite the even word again; the odd one must survive.
    pack_word36(0o777000000777, &mut buf, 0);
    assert_eq!(extract_word36(&buf, 1), 0o444444444444);
}

#[test]
fn word9_round_trip_exhaustive() {
    // All 512 values at all 8 alignment classes.
    for v in 0..=0o777u16 {
        for char_offset in 0..16 {
            let mut buf = junk_buffer();
            pack_word9(v, &mut buf, char_offset);
            assert_eq!(
                extract_word9(&buf, char_offset),
                v,
                "char {v:#o} at offset {char_offset}"
            );
        }
    }
}

#[test]
fn word9_matches_word36_fields() {
    let mut buf = junk_buffer();
    pack_word36(0o123456701234, &mut buf, 0);
    pack_word36(0o765432107654, &mut buf, 1);
    assert_eq!(extract_word9(&buf, 0), 0o123);
    assert_eq!(extract_word9(&buf, 1), 0o456);
    assert_eq!(extract_word9(&buf, 2), 0o701);
    assert_eq!(extract_word9(&buf, 3), 0o234);
    assert_eq!(extract_word9(&buf, 4), 0o765);
    assert_eq!(extract_word9(&buf, 7), 0o654);
}

#[test]
fn word18_round_trip_exhaustive() {
    // All 2^18 values at all 4 alignment classes.
    for v in 0..=(MASK18 as u32) {
        for half_offset in 0..8 {
            let mut buf = junk_buffer();
            pack_word18(v, &mut buf, half_offset);
            assert_eq!(
                extract_word18(&buf, half_offset),
                v,
                "half-word {v:#o} at offset {half_offset}"
            );
        }
    }
}

#[test]
fn word18_matches_word36_halves() {
    let mut buf = junk_buffer();
    pack_word36(0o123456654321, &mut buf, 0);
    pack_word36(0o707070070707, &mut buf, 1);
    assert_eq!(extract_word18(&buf, 0), 0o123456);
    assert_eq!(extract_word18(&buf, 1), 0o654321);
    assert_eq!(extract_word18(&buf, 2), 0o707070);
    assert_eq!(extract_word18(&buf, 3), 0o070707);
}

#[test]
fn pack_word18_preserves_the_other_half() {
    let mut buf = junk_buffer();
    pack_word36(0o123456654321, &mut buf, 0);
    pack_word18(0o000007, &mut buf, 0);
    assert_eq!(extract_word36(&buf, 0), 0o000007654321);
    pack_word18(0o700000, &mut buf, 1);
    assert_eq!(extract_word36(&buf, 0), 0o000007700000);
}

#[test]
fn bit_extraction_agrees_with_word_extraction() {
    let mut buf = junk_buffer();
    pack_word36(0o400000000001, &mut buf, 0);
    pack_word36(0o123456701234, &mut buf, 1);

    // Bit 0 of a word is its LSB, bit 35 its MSB.
    assert_eq!(extract_bit(&buf, 0), 1);
    assert_eq!(extract_bit(&buf, 35), 1);
    assert_eq!(extract_bit(&buf, 1), 0);

    // A full-width extract is just the word.
    assert_eq!(extract_bits(&buf, 0, 36), 0o400000000001);
    assert_eq!(extract_bits(&buf, 36, 36), 0o123456701234);

    // And sub-fields line up with shift-and-mask on the word.
    let w = extract_word36(&buf, 1);
    for width in [1usize, 5, 9, 17, 18, 24] {
        for start in 0..(36 - width) {
            let expect = (w >> start) & ((1u64 << width) - 1);
            assert_eq!(
                extract_bits(&buf, 36 + start, width),
                expect,
                "width {width} start {start}"
            );
        }
    }
}
