//! Binary buffer builder for the engine artifact.
//!
//! All multi-byte values are big-endian; strings are a u32 length prefix
//! followed by UTF-8 bytes.

pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4096),
        }
    }

    pub fn u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a dense table index.
    pub fn index(&mut self, value: usize) {
        self.u32(value as u32);
    }

    pub fn flag(&mut self, value: bool) {
        self.u32(if value { 1 } else { 0 });
    }

    /// Write a length-prefixed string.
    pub fn str(&mut self, value: &str) {
        self.u32(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
    }

    pub fn raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a chunk: fourcc, payload byte length, payload.
    pub fn chunk(&mut self, fourcc: [u8; 4], payload: &[u8]) {
        self.buf.extend_from_slice(&fourcc);
        self.u32(payload.len() as u32);
        self.buf.extend_from_slice(payload);
    }

    /// Consume the writer and return the bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for BinaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u32_is_big_endian() {
        let mut w = BinaryWriter::new();
        w.u32(0x6D786273);
        assert_eq!(w.finish(), vec![0x6D, 0x78, 0x62, 0x73]);
    }

    #[test]
    fn str_is_length_prefixed() {
        let mut w = BinaryWriter::new();
        w.str("abc");
        assert_eq!(w.finish(), vec![0, 0, 0, 3, b'a', b'b', b'c']);
    }

    #[test]
    fn empty_str_writes_only_length() {
        let mut w = BinaryWriter::new();
        w.str("");
        assert_eq!(w.finish(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn chunk_frames_payload() {
        let mut payload = BinaryWriter::new();
        payload.u32(7);
        let mut w = BinaryWriter::new();
        w.chunk(*b"mxbs", &payload.finish());
        assert_eq!(
            w.finish(),
            vec![b'm', b'x', b'b', b's', 0, 0, 0, 4, 0, 0, 0, 7]
        );
    }

    #[test]
    fn flag_is_one_or_zero() {
        let mut w = BinaryWriter::new();
        w.flag(true);
        w.flag(false);
        assert_eq!(w.finish(), vec![0, 0, 0, 1, 0, 0, 0, 0]);
    }
}
