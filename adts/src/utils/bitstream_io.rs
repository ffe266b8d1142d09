//! Bit-level reading and writing for fixed-width header fields.
//!
//! Fields are most-significant-bit first and may straddle byte boundaries.
//! Both directions wrap `bitstream_io` in big-endian mode.

use std::io;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter, Integer, UnsignedInteger};

#[derive(Debug)]
pub struct BitstreamIoReader<R: io::Read + io::Seek> {
    bs: BitReader<R, BigEndian>,
}

pub type BsIoSliceReader<'a> = BitstreamIoReader<io::Cursor<&'a [u8]>>;

impl<R> BitstreamIoReader<R>
where
    R: io::Read + io::Seek,
{
    pub fn new(read: R) -> Self {
        Self {
            bs: BitReader::new(read),
        }
    }

    #[inline(always)]
    pub fn get(&mut self) -> io::Result<bool> {
        self.bs.read_bit()
    }

    #[inline(always)]
    pub fn get_n<I: UnsignedInteger>(&mut self, n: u32) -> io::Result<I> {
        match self.bs.read_unsigned_var(n) {
            Ok(val) => Ok(val),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "get_n({}): out of bounds bits at {}",
                    n,
                    self.bs.position_in_bits().unwrap_or(0)
                ),
            )),
            Err(e) => Err(e),
        }
    }
}

impl<'a> BsIoSliceReader<'a> {
    pub fn from_slice(buf: &'a [u8]) -> Self {
        Self::new(io::Cursor::new(buf))
    }
}

/// Big-endian bit writer producing an owned byte vector.
pub struct BitstreamIoWriter {
    bs: BitWriter<Vec<u8>, BigEndian>,
}

impl Default for BitstreamIoWriter {
    fn default() -> Self {
        Self {
            bs: BitWriter::new(Vec::new()),
        }
    }
}

impl BitstreamIoWriter {
    #[inline(always)]
    pub fn put(&mut self, bit: bool) -> io::Result<()> {
        self.bs.write_bit(bit)
    }

    #[inline(always)]
    pub fn put_n<I: Integer>(&mut self, n: u32, value: I) -> io::Result<()> {
        self.bs.write_var(n, value)
    }

    /// Pads the final partial byte with zero bits and returns the bytes.
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        self.bs.byte_align()?;
        Ok(self.bs.into_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_cross_byte_boundaries() -> io::Result<()> {
        // 0b1010_1100 0b0111_0000: 3 bits, 7 bits, 2 bits, 4 bits
        let data = [0xAC, 0x70];
        let mut reader = BsIoSliceReader::from_slice(&data);

        assert_eq!(reader.get_n::<u8>(3)?, 0b101);
        assert_eq!(reader.get_n::<u8>(7)?, 0b0110001);
        assert_eq!(reader.get_n::<u8>(2)?, 0b11);
        assert!(reader.get_n::<u8>(5).is_err());
        Ok(())
    }

    #[test]
    fn writer_mirrors_reader() -> io::Result<()> {
        let mut writer = BitstreamIoWriter::default();
        writer.put_n(12, 0xFFFu16)?;
        writer.put(true)?;
        writer.put_n(13, 0x1ABCu16)?;
        let bytes = writer.into_bytes()?;
        assert_eq!(bytes.len(), 4);

        let mut reader = BsIoSliceReader::from_slice(&bytes);
        assert_eq!(reader.get_n::<u16>(12)?, 0xFFF);
        assert!(reader.get()?);
        assert_eq!(reader.get_n::<u16>(13)?, 0x1ABC);
        assert_eq!(reader.get_n::<u8>(6)?, 0);
        Ok(())
    }
}
