use crate::error::{DecodeError, EncodeError};
use crate::utils::read_u16;
use bytes::BufMut;
use std::io::Cursor;

pub const HEADER_LEN: usize = 12;

pub mod opcode {
    pub const QUERY: u8 = 0;
    pub const IQUERY: u8 = 1;
    pub const STATUS: u8 = 2;
}

pub mod rcode {
    pub const NO_ERROR: u8 = 0;
    pub const FORMAT_ERROR: u8 = 1;
    pub const SERVER_FAILURE: u8 = 2;
    pub const NAME_ERROR: u8 = 3;
    pub const NOT_IMPLEMENTED: u8 = 4;
    pub const REFUSED: u8 = 5;
}

//   0  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15
// +--+-----------+--+--+--+--+--------+-----------+
// |QR|  Opcode   |AA|TC|RD|RA|   Z    |   RCODE   |
// +--+-----------+--+--+--+--+--------+-----------+
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
}

impl Flags {
    /// Packs the flags, refusing sub-fields wider than their slot.
    pub fn to_u16(&self) -> Result<u16, EncodeError> {
        check_width("opcode", self.opcode, 4)?;
        check_width("z", self.z, 3)?;
        check_width("rcode", self.rcode, 4)?;

        let bits = u16::from(self.qr) << 15
            | u16::from(self.opcode) << 11
            | u16::from(self.aa) << 10
            | u16::from(self.tc) << 9
            | u16::from(self.rd) << 8
            | u16::from(self.ra) << 7
            | u16::from(self.z) << 4
            | u16::from(self.rcode);

        Ok(bits)
    }

    /// Unpacks the flags. Reserved `z` bits are kept as received.
    pub fn from_u16(bits: u16) -> Self {
        Self {
            qr: bits & 0x8000 != 0,
            opcode: ((bits >> 11) & 0x0f) as u8,
            aa: bits & 0x0400 != 0,
            tc: bits & 0x0200 != 0,
            rd: bits & 0x0100 != 0,
            ra: bits & 0x0080 != 0,
            z: ((bits >> 4) & 0x07) as u8,
            rcode: (bits & 0x0f) as u8,
        }
    }
}

fn check_width(field: &'static str, value: u8, bits: u32) -> Result<(), EncodeError> {
    if u32::from(value) >> bits != 0 {
        return Err(EncodeError::FlagOutOfRange { field, value, bits });
    }
    Ok(())
}

// 12 bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: Flags,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Header of a standard query with one question and recursion desired.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            flags: Flags {
                rd: true,
                ..Flags::default()
            },
            qdcount: 1,
            ..Self::default()
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
        let flags = self.flags.to_u16()?;

        bytes.put_u16(self.id);
        bytes.put_u16(flags);
        bytes.put_u16(self.qdcount);
        bytes.put_u16(self.ancount);
        bytes.put_u16(self.nscount);
        bytes.put_u16(self.arcount);

        Ok(())
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, DecodeError> {
        let id = read_u16(rdr, "header id")?;
        let flags = read_u16(rdr, "header flags")?;
        let qdcount = read_u16(rdr, "question count")?;
        let ancount = read_u16(rdr, "answer count")?;
        let nscount = read_u16(rdr, "authority count")?;
        let arcount = read_u16(rdr, "additional count")?;

        let h = Self {
            id,
            flags: Flags::from_u16(flags),
            qdcount,
            ancount,
            nscount,
            arcount,
        };

        Ok(h)
    }
}
