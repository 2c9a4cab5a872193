use crate::error::DecodeError;
use byteorder::{ReadBytesExt, BE};
use bytes::Bytes;
use std::io::Cursor;

// Every reader below records the offset it started at, so a short buffer
// reports where the missing field begins rather than where the cursor ended.

pub(crate) fn read_u16(rdr: &mut Cursor<&[u8]>, field: &'static str) -> Result<u16, DecodeError> {
    let offset = rdr.position() as usize;
    rdr.read_u16::<BE>()
        .map_err(|_| DecodeError::Truncated { offset, field })
}

pub(crate) fn read_u32(rdr: &mut Cursor<&[u8]>, field: &'static str) -> Result<u32, DecodeError> {
    let offset = rdr.position() as usize;
    rdr.read_u32::<BE>()
        .map_err(|_| DecodeError::Truncated { offset, field })
}

// Copies `len` bytes out of the buffer; the result never aliases the input.
pub(crate) fn read_bytes(
    rdr: &mut Cursor<&[u8]>,
    len: usize,
    field: &'static str,
) -> Result<Bytes, DecodeError> {
    let buf: &[u8] = rdr.get_ref();
    let offset = rdr.position() as usize;

    let slice = offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or(DecodeError::Truncated { offset, field })?;
    let bytes = Bytes::copy_from_slice(slice);

    rdr.set_position((offset + len) as u64);

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_u16_reports_start_offset() {
        let buf = [0x12, 0x34, 0x56];
        let mut rdr = Cursor::new(&buf[..]);

        assert_eq!(0x1234, read_u16(&mut rdr, "id").unwrap());
        assert_eq!(
            Err(DecodeError::Truncated { offset: 2, field: "count" }),
            read_u16(&mut rdr, "count")
        );
    }

    #[test]
    fn read_bytes_copies_and_advances() {
        let buf = [1, 2, 3, 4, 5];
        let mut rdr = Cursor::new(&buf[..]);
        rdr.set_position(1);

        let out = read_bytes(&mut rdr, 3, "rdata").unwrap();
        assert_eq!(&out[..], &[2, 3, 4]);
        assert_eq!(4, rdr.position());

        let err = read_bytes(&mut rdr, 2, "rdata").unwrap_err();
        assert_eq!(DecodeError::Truncated { offset: 4, field: "rdata" }, err);
    }

    #[test]
    fn read_bytes_past_end_of_buffer() {
        let buf = [1, 2];
        let mut rdr = Cursor::new(&buf[..]);
        rdr.set_position(10);

        assert!(read_bytes(&mut rdr, 0, "rdata").is_err());
        assert!(read_u32(&mut rdr, "ttl").is_err());
    }
}
