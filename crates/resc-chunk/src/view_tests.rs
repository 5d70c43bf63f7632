use resc_core::StringPool;

use crate::flatten::flatten_utf8;
use crate::view::{Chunk, ChunkError};

fn small_chunk() -> Vec<u8> {
    let mut pool = StringPool::new();
    let _r = pool.make_ref("resc");
    let mut buf = Vec::new();
    flatten_utf8(&mut buf, &pool).unwrap();
    buf
}

#[test]
fn rejects_short_input() {
    let err = Chunk::from_bytes(vec![0u8; 10]).unwrap_err();
    assert!(matches!(err, ChunkError::TooSmall(10)));
}

#[test]
fn rejects_wrong_tag() {
    let mut data = small_chunk();
    data[0] = 0x02;

    let err = Chunk::from_bytes(data).unwrap_err();
    assert!(matches!(err, ChunkError::InvalidTag(0x0002)));
}

#[test]
fn rejects_wrong_header_size() {
    let mut data = small_chunk();
    data[2] = 30;

    let err = Chunk::from_bytes(data).unwrap_err();
    assert!(matches!(err, ChunkError::InvalidHeaderSize(30)));
}

#[test]
fn rejects_size_mismatch() {
    let mut data = small_chunk();
    data.push(0);

    let err = Chunk::from_bytes(data).unwrap_err();
    assert!(matches!(err, ChunkError::SizeMismatch { .. }));
}

#[test]
fn rejects_overlong_offset_tables() {
    let mut data = small_chunk();
    // Claim far more table entries than the chunk can hold.
    data[8..12].copy_from_slice(&1000u32.to_le_bytes());

    let err = Chunk::from_bytes(data).unwrap_err();
    assert!(matches!(err, ChunkError::TablesOutOfBounds { .. }));
}

#[test]
fn string_index_out_of_bounds() {
    let chunk = Chunk::from_bytes(small_chunk()).unwrap();

    let err = chunk.string(1).unwrap_err();
    assert!(matches!(err, ChunkError::IndexOutOfBounds(1)));
}

#[test]
fn span_index_out_of_bounds() {
    let chunk = Chunk::from_bytes(small_chunk()).unwrap();

    let err = chunk.spans(0).unwrap_err();
    assert!(matches!(err, ChunkError::IndexOutOfBounds(0)));
}

#[test]
fn from_path_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strings.chunk");
    std::fs::write(&path, small_chunk()).unwrap();

    let chunk = Chunk::from_path(&path).unwrap();
    assert_eq!(chunk.string_count(), 1);
    assert_eq!(chunk.string(0).unwrap(), "resc");
}

#[test]
fn from_path_propagates_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = Chunk::from_path(dir.path().join("missing.chunk")).unwrap_err();
    assert!(matches!(err, ChunkError::Io(_)));
}
