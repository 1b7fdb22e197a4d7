//! Edge case tests for the hashflate pipeline.

use hashflate::{DeflatePipeline, HashflateError, Lz77Config, compress, decompress};

fn pipeline(window: usize, lookahead: usize, blocks: usize) -> DeflatePipeline {
    DeflatePipeline::new(Lz77Config::new(window, lookahead).with_blocks(blocks)).unwrap()
}

#[test]
fn test_empty_input() {
    assert!(matches!(compress(b""), Err(HashflateError::EmptyInput)));
}

#[test]
fn test_single_byte() {
    let input = b"A";
    let artifact = compress(input).unwrap();
    assert_eq!(decompress(&artifact).unwrap(), input);
}

#[test]
fn test_repeated_byte_tokens() {
    // "aaaa" with window 8, lookahead 4 yields (0,0,'a') then (1,3,None).
    let tuples = hashflate_lz77::compress(b"aaaa", Lz77Config::new(8, 4)).unwrap();
    let blocks = hashflate_lz77::BlockCoordinator::parse(&tuples).unwrap();
    assert_eq!(
        blocks,
        vec![vec![
            hashflate_lz77::Token::literal(b'a'),
            hashflate_lz77::Token::back_reference(1, 3, None),
        ]]
    );

    let p = pipeline(8, 4, 1);
    let artifact = p.compress(b"aaaa").unwrap();
    assert_eq!(p.decompress(&artifact).unwrap(), b"aaaa");
}

#[test]
fn test_single_symbol_huffman() {
    let artifact = hashflate_huffman::encode(b"aaaa").unwrap();
    assert_eq!(hashflate_huffman::decode(&artifact).unwrap(), b"aaaa");
}

#[test]
fn test_all_zeros() {
    let input = vec![0u8; 1000];
    let artifact = compress(&input).unwrap();
    assert_eq!(decompress(&artifact).unwrap(), input);
    assert!(artifact.len() < input.len() / 4);
}

#[test]
fn test_trailing_zero_byte() {
    for input in [&b"abcabc\0"[..], b"\0", b"xyzxyzxyz\0", b"\0\0\0\0\0"] {
        let artifact = compress(input).unwrap();
        assert_eq!(decompress(&artifact).unwrap(), input);
    }
}

#[test]
fn test_more_blocks_than_bytes() {
    let p = pipeline(16, 16, 10);
    let artifact = p.compress(b"hey").unwrap();
    assert_eq!(p.decompress(&artifact).unwrap(), b"hey");
}

#[test]
fn test_window_of_one() {
    let input = b"aaaaabababab";
    let p = pipeline(1, 255, 1);
    let artifact = p.compress(input).unwrap();
    assert_eq!(p.decompress(&artifact).unwrap(), input);
}

#[test]
fn test_max_match_length() {
    let input = vec![42u8; 255 * 10 + 7];
    let p = pipeline(4096, 255, 1);
    let artifact = p.compress(&input).unwrap();
    assert_eq!(p.decompress(&artifact).unwrap(), input);
}

#[test]
fn test_table_truncated_before_sentinel() {
    let artifact = compress(b"scenario c: truncated table").unwrap();
    // Pad byte plus the first record, no sentinel.
    let truncated = &artifact[..6];
    assert!(matches!(
        decompress(truncated),
        Err(HashflateError::MalformedStream { .. })
    ));
}

#[test]
fn test_empty_artifact() {
    assert!(matches!(
        decompress(&[]),
        Err(HashflateError::MalformedStream { .. })
    ));
}

#[test]
fn test_corrupted_artifact_never_panics() {
    let input = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let artifact = compress(&input).unwrap();

    for i in 0..artifact.len() {
        let mut corrupted = artifact.clone();
        corrupted[i] ^= 0x5A;
        // Either outcome is fine; only a panic fails.
        let _ = decompress(&corrupted);
    }
}

#[test]
fn test_tuple_stream_with_bad_offset() {
    let mut tuples = vec![0, 0, 0, 1];
    tuples.extend_from_slice(&hashflate_lz77::BLOCK_SEPARATOR);
    tuples.extend_from_slice(&[0, 0, 0, b'a']);
    tuples.extend_from_slice(&[5, 0, 2, b'b']);
    let artifact = hashflate_huffman::encode(&tuples).unwrap();
    assert!(matches!(
        decompress(&artifact),
        Err(HashflateError::WindowViolation {
            offset: 5,
            decoded: 1
        })
    ));
}
