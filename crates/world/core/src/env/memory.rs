//! Read-only access to the game process's memory.

/// Errors raised by a memory backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
    #[error("unknown symbol `{name}`")]
    UnknownSymbol { name: String },

    #[error("read of {len} bytes at {addr:#010x} is out of range")]
    OutOfRange { addr: u32, len: usize },

    #[error("memory backend failure: {reason}")]
    Backend { reason: String },
}

/// Byte-level view of the running game's address space.
///
/// Implementations must return exactly `len` bytes from [`read_bytes`] and
/// [`read_symbol`], or fail; the provided scalar readers rely on it. All
/// multi-byte scalars are little-endian, matching the target hardware.
///
/// [`read_bytes`]: MemoryOracle::read_bytes
/// [`read_symbol`]: MemoryOracle::read_symbol
pub trait MemoryOracle: Send + Sync {
    /// Reads `len` bytes starting at the absolute address `addr`.
    fn read_bytes(&self, addr: u32, len: usize) -> Result<Vec<u8>, MemoryError>;

    /// Reads `len` bytes of the named symbol from the loaded symbol table.
    fn read_symbol(&self, name: &str, len: usize) -> Result<Vec<u8>, MemoryError>;

    /// Reads an unsigned byte at `addr`.
    fn read_u8(&self, addr: u32) -> Result<u8, MemoryError> {
        let bytes = self.read_bytes(addr, 1)?;
        Ok(scalar::<1>(addr, &bytes)?[0])
    }

    /// Reads a little-endian `u16` at `addr`.
    fn read_u16(&self, addr: u32) -> Result<u16, MemoryError> {
        let bytes = self.read_bytes(addr, 2)?;
        Ok(u16::from_le_bytes(scalar::<2>(addr, &bytes)?))
    }

    /// Reads a little-endian `u32` at `addr`.
    fn read_u32(&self, addr: u32) -> Result<u32, MemoryError> {
        let bytes = self.read_bytes(addr, 4)?;
        Ok(u32::from_le_bytes(scalar::<4>(addr, &bytes)?))
    }
}

fn scalar<const N: usize>(addr: u32, bytes: &[u8]) -> Result<[u8; N], MemoryError> {
    bytes
        .try_into()
        .map_err(|_| MemoryError::OutOfRange { addr, len: N })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat(Vec<u8>);

    impl MemoryOracle for Flat {
        fn read_bytes(&self, addr: u32, len: usize) -> Result<Vec<u8>, MemoryError> {
            let start = addr as usize;
            self.0
                .get(start..start + len)
                .map(<[u8]>::to_vec)
                .ok_or(MemoryError::OutOfRange { addr, len })
        }

        fn read_symbol(&self, name: &str, _len: usize) -> Result<Vec<u8>, MemoryError> {
            Err(MemoryError::UnknownSymbol {
                name: name.to_owned(),
            })
        }
    }

    #[test]
    fn scalar_readers_assemble_little_endian() {
        let mem = Flat(vec![0x01, 0x02, 0x03, 0x04]);

        assert_eq!(mem.read_u8(1).unwrap(), 0x02);
        assert_eq!(mem.read_u16(0).unwrap(), 0x0201);
        assert_eq!(mem.read_u32(0).unwrap(), 0x0403_0201);
    }

    #[test]
    fn out_of_range_read_is_reported() {
        let mem = Flat(vec![0xFF; 2]);

        assert_eq!(
            mem.read_u32(0),
            Err(MemoryError::OutOfRange { addr: 0, len: 4 })
        );
    }
}
