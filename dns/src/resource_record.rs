use crate::error::{DecodeError, EncodeError};
use crate::name::Name;
use crate::utils::{read_bytes, read_u16, read_u32};
use bytes::{BufMut, Bytes};
use std::io::Cursor;

/// One answer, authority or additional record.
///
/// `rdata` is opaque here whatever the `rtype`; rendering it is left to the
/// caller. Decoded rdata is a copy, it does not borrow the datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Name,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: Bytes,
}

impl ResourceRecord {
    pub fn new(
        name: impl Into<Name>,
        rtype: u16,
        rclass: u16,
        ttl: u32,
        rdata: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            rtype,
            rclass,
            ttl,
            rdata: rdata.into(),
        }
    }

    /// Builds a record whose rdata is `text` encoded as UTF-8.
    pub fn with_text(name: impl Into<Name>, rtype: u16, rclass: u16, ttl: u32, text: &str) -> Self {
        Self::new(name, rtype, rclass, ttl, Bytes::copy_from_slice(text.as_bytes()))
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
        let rdlength = u16::try_from(self.rdata.len())
            .map_err(|_| EncodeError::RdataTooLong(self.rdata.len()))?;

        self.name.to_bytes(bytes)?;
        bytes.put_u16(self.rtype);
        bytes.put_u16(self.rclass);
        bytes.put_u32(self.ttl);
        bytes.put_u16(rdlength);
        bytes.put_slice(&self.rdata);

        Ok(())
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, DecodeError> {
        let name = Name::parse_from_reader(rdr)?;
        let rtype = read_u16(rdr, "record type")?;
        let rclass = read_u16(rdr, "record class")?;
        let ttl = read_u32(rdr, "record ttl")?;
        let rdlength = read_u16(rdr, "record data length")?;
        let rdata = read_bytes(rdr, usize::from(rdlength), "record data")?;

        let record = Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        };

        Ok(record)
    }
}
