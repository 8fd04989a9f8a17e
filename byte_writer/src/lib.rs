//! Little-endian byte buffer used to build offset-addressed blobs.
//!
//! Records are appended in order and their start positions are handed back
//! so they can be stored as offsets elsewhere. Fields that must point at data
//! written later are reserved first and patched once the target exists.

pub struct ByteWriter {
    pub data: Vec<u8>,
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWriter {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Position the next appended byte will land at.
    pub fn get_offset(&self) -> usize {
        self.data.len()
    }

    pub fn append_u8(&mut self, i: u8) {
        self.data.push(i);
    }

    pub fn append_i16(&mut self, i: i16) {
        self.data.extend(i.to_le_bytes());
    }

    pub fn append_u16(&mut self, i: u16) {
        self.data.extend(i.to_le_bytes());
    }

    pub fn append_i32(&mut self, i: i32) {
        self.data.extend(i.to_le_bytes());
    }

    pub fn append_u32(&mut self, i: u32) {
        self.data.extend(i.to_le_bytes());
    }

    pub fn append_f32(&mut self, i: f32) {
        self.data.extend(i.to_le_bytes());
    }

    pub fn append_u8_slice(&mut self, i: &[u8]) {
        self.data.extend_from_slice(i);
    }

    pub fn append_u16_slice(&mut self, i: &[u16]) {
        i.iter().for_each(|&x| self.append_u16(x));
    }

    pub fn append_i32_slice(&mut self, i: &[i32]) {
        i.iter().for_each(|&x| self.append_i32(x));
    }

    pub fn append_f32_slice(&mut self, i: &[f32]) {
        i.iter().for_each(|&x| self.append_f32(x));
    }

    pub fn append_zeroes(&mut self, count: usize) {
        self.data.resize(self.data.len() + count, 0);
    }

    /// Appends the string bytes followed by a single null byte.
    pub fn append_cstring(&mut self, s: &str) {
        self.data.extend(s.as_bytes());
        self.data.push(0);
    }

    /// Pads with zeroes until the current offset is a multiple of `alignment`.
    pub fn align(&mut self, alignment: usize) {
        let rem = self.data.len() % alignment;

        if rem != 0 {
            self.append_zeroes(alignment - rem);
        }
    }

    pub fn replace(&mut self, start: usize, slice: &[u8]) {
        self.data[start..(start + slice.len())].copy_from_slice(slice);
    }

    pub fn replace_with_u32(&mut self, start: usize, val: u32) {
        self.replace(start, &val.to_le_bytes());
    }
}
