use super::error::LppError;

/// Forward-only cursor over one payload buffer.
pub struct LppReader<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> LppReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.payload.len()
    }

    pub fn remaining(&self) -> usize {
        self.payload.len() - self.offset
    }

    /// Fail early if fewer than `len` bytes remain at the cursor.
    pub fn require(&self, len: usize) -> Result<(), LppError> {
        if self.remaining() < len {
            return Err(LppError::TooShort {
                needed: self.offset + len,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, LppError> {
        let bytes = self.read_slice(1)?;
        Ok(bytes[0])
    }

    pub fn read_u16_be(&mut self) -> Result<u16, LppError> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i16_be(&mut self) -> Result<i16, LppError> {
        let bytes = self.read_slice(2)?;
        Ok(i16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a 24-bit big-endian two's-complement value, sign-extended.
    pub fn read_i24_be(&mut self) -> Result<i32, LppError> {
        let bytes = self.read_slice(3)?;
        let value = (i32::from(bytes[0]) << 24)
            | (i32::from(bytes[1]) << 16)
            | (i32::from(bytes[2]) << 8);
        Ok(value >> 8)
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], LppError> {
        self.require(len)?;
        let bytes = &self.payload[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_the_cursor() {
        let mut reader = LppReader::new(&[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16_be().unwrap(), 0x0203);
        assert_eq!(reader.remaining(), 1);
        assert!(!reader.is_empty());
        assert_eq!(reader.read_u8().unwrap(), 0x04);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_past_end_reports_too_short() {
        let mut reader = LppReader::new(&[0x01]);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        let err = reader.read_u16_be().unwrap_err();
        assert_eq!(err, LppError::TooShort { needed: 3, actual: 1 });
    }

    #[test]
    fn require_does_not_advance() {
        let reader = LppReader::new(&[0x01, 0x02]);
        assert!(reader.require(2).is_ok());
        let err = reader.require(3).unwrap_err();
        assert_eq!(err, LppError::TooShort { needed: 3, actual: 2 });
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn i16_is_twos_complement() {
        let mut reader = LppReader::new(&[0xFF, 0xFF]);
        assert_eq!(reader.read_i16_be().unwrap(), -1);
    }

    #[test]
    fn i24_sign_extends() {
        let mut reader = LppReader::new(&[0xFE, 0x79, 0x60, 0x06, 0x76, 0x5F]);
        assert_eq!(reader.read_i24_be().unwrap(), -100_000);
        assert_eq!(reader.read_i24_be().unwrap(), 423_519);
    }
}
