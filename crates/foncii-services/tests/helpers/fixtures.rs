use bytes::Bytes;

/// JPEG SOI marker followed by a JFIF APP0 header and zero padding.
pub fn jpeg_bytes(len: usize) -> Bytes {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    data.resize(len.max(data.len()), 0);
    Bytes::from(data)
}

/// PNG signature followed by zero padding.
pub fn png_bytes(len: usize) -> Bytes {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.resize(len.max(data.len()), 0);
    Bytes::from(data)
}

/// `ftyp` box at offset 4, as in any ISO base media file.
pub fn mp4_bytes(len: usize) -> Bytes {
    let mut data = vec![0x00, 0x00, 0x00, 0x20];
    data.extend_from_slice(b"ftypisom");
    data.resize(len.max(data.len()), 0);
    Bytes::from(data)
}

/// QuickTime file whose first atom is `moov`.
pub fn mov_bytes(len: usize) -> Bytes {
    let mut data = b"moov".to_vec();
    data.resize(len.max(data.len()), 0);
    Bytes::from(data)
}

pub fn html_bytes() -> Bytes {
    Bytes::from_static(b"<!DOCTYPE html><html><body>Link expired</body></html>")
}
