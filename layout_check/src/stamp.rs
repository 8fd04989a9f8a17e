use std::mem::size_of;

/// Zeroed byte image of an aggregate, written leaf by leaf.
///
/// Leaves land at the offsets the compiler reports, so whatever the
/// toolchain decides about padding and union overlay shows up in the bytes.
/// Bytes no leaf covers stay zero.
pub struct Stamper {
    bytes: Vec<u8>,
    ordinal: u8,
}

impl Stamper {
    pub fn zeroed(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
            ordinal: 0,
        }
    }

    /// Stamps the leaf with the next ordinal, starting at 1.
    ///
    /// The leaf holds a native-endian integer whose least significant byte
    /// is the ordinal and whose other bytes are the ordinal with the high bit
    /// set. Every byte is nonzero so the leaf's width shows, and the plain
    /// byte sits at a different end on big and little endian targets.
    /// Ordinals stay below 0x80.
    pub fn leaf(&mut self, offset: usize, size: usize) -> &mut Self {
        self.ordinal = (self.ordinal + 1) & 0x7f;

        let leaf = &mut self.bytes[offset..offset + size];
        leaf.fill(self.ordinal | 0x80);

        let low = if cfg!(target_endian = "big") { size.saturating_sub(1) } else { 0 };
        if let Some(byte) = leaf.get_mut(low) {
            *byte = self.ordinal;
        }

        self
    }

    pub fn leaf_of<T>(&mut self, offset: usize) -> &mut Self {
        self.leaf(offset, size_of::<T>())
    }

    /// One ordinal per element.
    pub fn array_of<T>(&mut self, offset: usize, count: usize) -> &mut Self {
        (0..count).for_each(|index| {
            self.leaf_of::<T>(offset + index * size_of::<T>());
        });
        self
    }

    /// Writes a concrete value instead of an ordinal.
    pub fn value(&mut self, offset: usize, bytes: &[u8]) -> &mut Self {
        self.bytes[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod test {
    use super::Stamper;

    #[test]
    fn later_leaves_overwrite_earlier() {
        let mut stamper = Stamper::zeroed(8);

        stamper.leaf_of::<u8>(3).leaf_of::<u8>(3).array_of::<u8>(5, 2);

        assert_eq!(stamper.finish(), [0, 0, 0, 2, 0, 3, 4, 0]);
    }

    #[test]
    fn wide_leaf_is_native_endian() {
        let mut stamper = Stamper::zeroed(16);

        stamper.leaf_of::<u32>(0).leaf_of::<u16>(4).leaf_of::<u64>(8);

        let bytes = stamper.finish();

        assert_eq!(
            u32::from_ne_bytes(bytes[0..4].try_into().unwrap()),
            0x81818101
        );
        assert_eq!(u16::from_ne_bytes(bytes[4..6].try_into().unwrap()), 0x8202);
        assert_eq!(bytes[6..8], [0, 0]);
        assert_eq!(
            u64::from_ne_bytes(bytes[8..16].try_into().unwrap()),
            0x8383838383838303
        );
    }

    #[test]
    #[cfg(target_endian = "little")]
    fn wide_leaf_bytes_little_endian() {
        let mut stamper = Stamper::zeroed(4);

        stamper.leaf_of::<u32>(0);

        assert_eq!(stamper.finish(), [1, 0x81, 0x81, 0x81]);
    }
}
