use crate::error::{DecodeError, EncodeError};
use crate::name::Name;
use crate::utils::read_u16;
use bytes::BufMut;
use std::io::Cursor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Name,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: impl Into<Name>, qtype: u16, qclass: u16) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass,
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
        self.name.to_bytes(bytes)?;
        bytes.put_u16(self.qtype);
        bytes.put_u16(self.qclass);

        Ok(())
    }

    // Questions normally carry an uncompressed name, but a pointer is accepted.
    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, DecodeError> {
        let name = Name::parse_from_reader(rdr)?;
        let qtype = read_u16(rdr, "question type")?;
        let qclass = read_u16(rdr, "question class")?;

        let q = Self {
            name,
            qtype,
            qclass,
        };

        Ok(q)
    }
}
