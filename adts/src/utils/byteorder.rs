//! Explicit-endianness serialisation for artifact records and sample buffers.
//!
//! Nothing here depends on in-memory struct layout: every value is appended to
//! the destination in the requested byte order, field by field.

pub trait WriteBytesLe {
    fn write_le(&self, dst: &mut Vec<u8>);
}

pub trait WriteBytesBe {
    fn write_be(&self, dst: &mut Vec<u8>);
}

macro_rules! impl_num_le_be {
    ($($t:ty),+) => { $(
        impl WriteBytesLe for $t { #[inline] fn write_le(&self, dst: &mut Vec<u8>) { dst.extend_from_slice(&self.to_le_bytes()); }}
        impl WriteBytesBe for $t { #[inline] fn write_be(&self, dst: &mut Vec<u8>) { dst.extend_from_slice(&self.to_be_bytes()); }}
    )+ }
}

impl_num_le_be!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

macro_rules! impl_collection {
    ($trait:ident, $method:ident) => {
        impl<T: $trait> $trait for [T] {
            #[inline]
            fn $method(&self, dst: &mut Vec<u8>) {
                self.iter().for_each(|item| item.$method(dst));
            }
        }
        impl<T: $trait> $trait for Vec<T> {
            #[inline]
            fn $method(&self, dst: &mut Vec<u8>) {
                self.as_slice().$method(dst);
            }
        }
        impl<T: $trait, const N: usize> $trait for [T; N] {
            #[inline]
            fn $method(&self, dst: &mut Vec<u8>) {
                self.as_slice().$method(dst);
            }
        }
    };
}

impl_collection!(WriteBytesLe, write_le);
impl_collection!(WriteBytesBe, write_be);

#[cfg(test)]
mod tests {
    use super::{WriteBytesBe, WriteBytesLe};
    use adtsdump_macros::ToBytes;

    #[derive(ToBytes)]
    struct Mini {
        a: u16,
        b: u32,
        tag: [u8; 4],
    }

    #[test]
    fn derived_record_follows_field_order() {
        let s = Mini {
            a: 0x1234,
            b: 0xABCDEF01,
            tag: *b"ADTS",
        };

        let mut le = Vec::new();
        let mut be = Vec::new();

        s.write_le(&mut le);
        s.write_be(&mut be);

        assert_eq!(le, [0x34, 0x12, 0x01, 0xEF, 0xCD, 0xAB, b'A', b'D', b'T', b'S']);
        assert_eq!(be, [0x12, 0x34, 0xAB, 0xCD, 0xEF, 0x01, b'A', b'D', b'T', b'S']);
    }

    #[test]
    fn slices_are_written_element_by_element() {
        let samples: &[i16] = &[1, -1, 0x0203];
        let mut out = Vec::new();
        samples.write_le(&mut out);
        assert_eq!(out, [0x01, 0x00, 0xFF, 0xFF, 0x03, 0x02]);
    }
}
