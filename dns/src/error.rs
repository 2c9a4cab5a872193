use std::fmt;
use thiserror::Error;

/// Why a domain name could not be read off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameErrorKind {
    /// A literal length byte above 63.
    LabelTooLong(u8),
    /// A length byte whose top two bits are `01` or `10`.
    ReservedLabelType(u8),
    /// A compression pointer that does not jump strictly backwards.
    ForwardPointer { target: usize },
}

impl fmt::Display for NameErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NameErrorKind::LabelTooLong(len) => write!(f, "label length {} exceeds 63", len),
            NameErrorKind::ReservedLabelType(b) => write!(f, "reserved label type {:#04x}", b),
            NameErrorKind::ForwardPointer { target } => {
                write!(f, "compression pointer to offset {} does not point backwards", target)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("message truncated at offset {offset} while reading {field}")]
    Truncated { offset: usize, field: &'static str },

    #[error("malformed name at offset {offset}: {kind}")]
    MalformedName { offset: usize, kind: NameErrorKind },
}

/// Message sections that carry a count in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Question,
    Answer,
    Authority,
    Additional,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Section::Question => "question",
            Section::Answer => "answer",
            Section::Authority => "authority",
            Section::Additional => "additional",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("flag field {field} value {value} does not fit in {bits} bits")]
    FlagOutOfRange {
        field: &'static str,
        value: u8,
        bits: u32,
    },

    #[error("label of {0} bytes is outside 1..=63")]
    InvalidLabelLength(usize),

    #[error("label contains non-ASCII byte {0:#04x}")]
    NonAsciiLabel(u8),

    #[error("name encodes to {0} bytes, limit is 255")]
    NameTooLong(usize),

    #[error("resource data of {0} bytes does not fit the 16-bit length field")]
    RdataTooLong(usize),

    #[error("header declares {declared} {section} entries but {actual} were supplied")]
    CountMismatch {
        section: Section,
        declared: u16,
        actual: usize,
    },
}
