use crate::error::{DecodeError, EncodeError, Section};
use crate::header::Header;
use crate::question::Question;
use crate::resource_record::ResourceRecord;
use std::io::Cursor;

/// A whole DNS message: header plus the four sections.
///
/// After a successful decode every section length equals its header count.
/// Encoding requires the same, see [`Message::sync_counts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    /// A standard recursive query for one name in class IN.
    pub fn query(id: u16, domain: &str, qtype: u16) -> Self {
        Self {
            header: Header::query(id),
            questions: vec![Question::new(domain, qtype, 1)],
            ..Self::default()
        }
    }

    /// Copies the section lengths into the header counts.
    ///
    /// A section longer than 65535 entries saturates, which [`Message::to_bytes`]
    /// then reports as a count mismatch.
    pub fn sync_counts(&mut self) {
        let count = |len: usize| u16::try_from(len).unwrap_or(u16::MAX);

        self.header.qdcount = count(self.questions.len());
        self.header.ancount = count(self.answers.len());
        self.header.nscount = count(self.authorities.len());
        self.header.arcount = count(self.additionals.len());
    }

    fn check_counts(&self) -> Result<(), EncodeError> {
        let sections = [
            (Section::Question, self.header.qdcount, self.questions.len()),
            (Section::Answer, self.header.ancount, self.answers.len()),
            (Section::Authority, self.header.nscount, self.authorities.len()),
            (Section::Additional, self.header.arcount, self.additionals.len()),
        ];

        for (section, declared, actual) in sections {
            if usize::from(declared) != actual {
                return Err(EncodeError::CountMismatch {
                    section,
                    declared,
                    actual,
                });
            }
        }

        Ok(())
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
        self.check_counts()?;

        self.header.to_bytes(bytes)?;
        for q in &self.questions {
            q.to_bytes(bytes)?;
        }
        for r in self.records() {
            r.to_bytes(bytes)?;
        }

        Ok(())
    }

    /// Decodes exactly as many entries as the header declares. Bytes after
    /// the last additional record are ignored.
    pub fn parse(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Cursor::new(buf);

        let header = Header::parse_from_reader(&mut reader)?;

        let mut questions = Vec::new();
        for _ in 0..header.qdcount {
            questions.push(Question::parse_from_reader(&mut reader)?);
        }

        let answers = parse_records(&mut reader, header.ancount)?;
        let authorities = parse_records(&mut reader, header.nscount)?;
        let additionals = parse_records(&mut reader, header.arcount)?;

        let msg = Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        };

        Ok(msg)
    }

    /// Answer, authority and additional records in wire order.
    pub fn records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
    }
}

// Counts come off the wire, so nothing is preallocated from them.
fn parse_records(
    rdr: &mut Cursor<&[u8]>,
    count: u16,
) -> Result<Vec<ResourceRecord>, DecodeError> {
    let mut records = Vec::new();
    for _ in 0..count {
        records.push(ResourceRecord::parse_from_reader(rdr)?);
    }

    Ok(records)
}
