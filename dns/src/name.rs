// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.4

use crate::error::{DecodeError, EncodeError, NameErrorKind};
use bytes::BufMut;
use std::fmt;
use std::io::Cursor;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const POINTER_MASK: u8 = 0b1100_0000;

/// A domain name as the ordered list of its labels.
///
/// Labels are kept as the raw bytes seen on the wire, so case and any
/// non-ASCII bytes a peer sent survive a decode untouched. Only encoding is
/// strict about what a label may contain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<Vec<u8>>,
}

impl Name {
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Splits `www.example.com` (trailing dot optional) into labels.
    ///
    /// No validation happens here; an empty or oversized label is reported
    /// by [`Name::to_bytes`].
    pub fn from_dotted(domain: &str) -> Self {
        let domain = domain.strip_suffix('.').unwrap_or(domain);
        if domain.is_empty() {
            return Self::root();
        }

        let labels = domain
            .split('.')
            .map(|label| label.as_bytes().to_vec())
            .collect();

        Self { labels }
    }

    pub fn from_labels(labels: Vec<Vec<u8>>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of the uncompressed wire form, terminator included.
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Writes the name fully spelled out. Compression is never applied on
    /// output, so repeated names cost their full length every time.
    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
        for label in &self.labels {
            if label.is_empty() || label.len() > MAX_LABEL_LEN {
                return Err(EncodeError::InvalidLabelLength(label.len()));
            }
            if let Some(b) = label.iter().find(|b| !b.is_ascii()) {
                return Err(EncodeError::NonAsciiLabel(*b));
            }
        }

        let len = self.encoded_len();
        if len > MAX_NAME_LEN {
            return Err(EncodeError::NameTooLong(len));
        }

        bytes.reserve(len);
        for label in &self.labels {
            bytes.put_u8(label.len() as u8);
            bytes.put_slice(label);
        }
        bytes.put_u8(0);

        Ok(())
    }

    /// Reads a name starting at the cursor position.
    ///
    /// Compression pointers are resolved against the whole buffer behind the
    /// cursor. On return the cursor sits just past the terminating zero byte,
    /// or just past the first pointer if the name was compressed.
    ///
    /// Every pointer must land strictly before the point where the labels
    /// currently being read began. Jump targets therefore strictly decrease,
    /// which rules out self references and loops between pointers.
    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, DecodeError> {
        let buf: &[u8] = *rdr.get_ref();
        let start = rdr.position() as usize;

        let mut labels = Vec::new();
        let mut pos = start;
        let mut limit = start;
        let mut resume_at: Option<usize> = None;

        loop {
            let len = *buf.get(pos).ok_or(DecodeError::Truncated {
                offset: pos,
                field: "name label length",
            })?;

            match len & POINTER_MASK {
                0x00 if len == 0 => {
                    pos += 1;
                    break;
                }
                0x00 => {
                    let begin = pos + 1;
                    let end = begin + usize::from(len);
                    let label = buf.get(begin..end).ok_or(DecodeError::Truncated {
                        offset: begin,
                        field: "name label",
                    })?;
                    labels.push(label.to_vec());
                    pos = end;
                }
                POINTER_MASK => {
                    let low = *buf.get(pos + 1).ok_or(DecodeError::Truncated {
                        offset: pos + 1,
                        field: "compression pointer",
                    })?;
                    let target = (usize::from(len & !POINTER_MASK) << 8) | usize::from(low);

                    if target >= limit {
                        return Err(DecodeError::MalformedName {
                            offset: pos,
                            kind: NameErrorKind::ForwardPointer { target },
                        });
                    }

                    tracing::trace!(from = pos, to = target, "following compression pointer");
                    resume_at.get_or_insert(pos + 2);
                    limit = target;
                    pos = target;
                }
                0x40 => {
                    return Err(DecodeError::MalformedName {
                        offset: pos,
                        kind: NameErrorKind::LabelTooLong(len),
                    });
                }
                _ => {
                    return Err(DecodeError::MalformedName {
                        offset: pos,
                        kind: NameErrorKind::ReservedLabelType(len),
                    });
                }
            }
        }

        rdr.set_position(resume_at.unwrap_or(pos) as u64);

        Ok(Self { labels })
    }
}

impl From<&str> for Name {
    fn from(domain: &str) -> Self {
        Self::from_dotted(domain)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.labels.is_empty() {
            return write!(f, ".");
        }

        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", String::from_utf8_lossy(label))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_at(buf: &[u8], offset: u64) -> (Result<Name, DecodeError>, u64) {
        let mut rdr = Cursor::new(buf);
        rdr.set_position(offset);
        let ret = Name::parse_from_reader(&mut rdr);
        (ret, rdr.position())
    }

    #[test]
    fn to_bytes_test() {
        let mut bytes = vec![];
        Name::from_dotted("baidu.com").to_bytes(&mut bytes).unwrap();

        let expected = [5, 98, 97, 105, 100, 117, 3, 99, 111, 109, 0];
        assert_eq!(&expected[..], &bytes[..]);
    }

    #[test]
    fn from_dotted_handles_root_and_trailing_dot() {
        assert!(Name::from_dotted("").is_root());
        assert!(Name::from_dotted(".").is_root());
        assert_eq!(Name::from_dotted("a.b."), Name::from_dotted("a.b"));
        assert_eq!("a.b", Name::from_dotted("a.b.").to_string());
        assert_eq!(".", Name::root().to_string());

        let mut bytes = vec![];
        Name::root().to_bytes(&mut bytes).unwrap();
        assert_eq!(vec![0], bytes);
    }

    #[test]
    fn label_of_63_bytes_round_trips() {
        let label = "a".repeat(63);
        let name = Name::from_dotted(&format!("{}.com", label));

        let mut bytes = vec![];
        name.to_bytes(&mut bytes).unwrap();
        assert_eq!(63, bytes[0]);

        let (ret, next) = parse_at(&bytes, 0);
        assert_eq!(name, ret.unwrap());
        assert_eq!(bytes.len() as u64, next);
    }

    #[test]
    fn label_of_64_bytes_is_rejected_both_ways() {
        let name = Name::from_dotted(&"a".repeat(64));
        let mut bytes = vec![];
        assert_eq!(Err(EncodeError::InvalidLabelLength(64)), name.to_bytes(&mut bytes));

        let mut crafted = vec![64];
        crafted.extend_from_slice("a".repeat(64).as_bytes());
        crafted.push(0);
        let (ret, _) = parse_at(&crafted, 0);
        assert_eq!(
            Err(DecodeError::MalformedName {
                offset: 0,
                kind: NameErrorKind::LabelTooLong(64),
            }),
            ret
        );
    }

    #[test]
    fn reserved_label_type_is_rejected() {
        let (ret, _) = parse_at(&[0x80, 0x01, 0x00], 0);
        assert_eq!(
            Err(DecodeError::MalformedName {
                offset: 0,
                kind: NameErrorKind::ReservedLabelType(0x80),
            }),
            ret
        );
    }

    #[test]
    fn encode_rejects_bad_labels() {
        let mut bytes = vec![];
        assert_eq!(
            Err(EncodeError::InvalidLabelLength(0)),
            Name::from_dotted("a..b").to_bytes(&mut bytes)
        );
        assert_eq!(
            Err(EncodeError::NonAsciiLabel(0xc3)),
            Name::from_dotted("caf\u{e9}.fr").to_bytes(&mut bytes)
        );
        assert!(bytes.is_empty());
    }

    #[test]
    fn encode_rejects_names_over_255_bytes() {
        // 4 labels of 63 bytes: 4 * 64 + 1 = 257
        let label = "x".repeat(63);
        let domain = vec![label.as_str(); 4].join(".");
        let mut bytes = vec![];
        assert_eq!(
            Err(EncodeError::NameTooLong(257)),
            Name::from_dotted(&domain).to_bytes(&mut bytes)
        );

        // 3 labels of 63 and one of 61: 3 * 64 + 62 + 1 = 255
        let domain = format!("{}.{}", vec![label.as_str(); 3].join("."), "y".repeat(61));
        Name::from_dotted(&domain).to_bytes(&mut bytes).unwrap();
        assert_eq!(255, bytes.len());
    }

    #[test]
    fn pointer_advances_cursor_by_two() {
        // "com" at 0, then "baidu" + pointer to 0 at 5
        let buf = [3, b'c', b'o', b'm', 0, 5, b'b', b'a', b'i', b'd', b'u', 0xc0, 0x00, 0xff];

        let (ret, next) = parse_at(&buf, 5);
        assert_eq!(Name::from_dotted("baidu.com"), ret.unwrap());
        assert_eq!(13, next);
    }

    #[test]
    fn chained_pointers_resolve() {
        // 0: "com", 5: "baidu" -> 0, 13: "www" -> 5, 19: -> 13
        let buf = [
            3, b'c', b'o', b'm', 0, //
            5, b'b', b'a', b'i', b'd', b'u', 0xc0, 0x00, //
            3, b'w', b'w', b'w', 0xc0, 0x05, //
            0xc0, 0x0d,
        ];

        let (ret, next) = parse_at(&buf, 19);
        assert_eq!("www.baidu.com", ret.unwrap().to_string());
        assert_eq!(21, next);
    }

    #[test]
    fn self_pointer_is_rejected() {
        let buf = [0, 0, 0xc0, 0x02];
        let (ret, _) = parse_at(&buf, 2);
        assert_eq!(
            Err(DecodeError::MalformedName {
                offset: 2,
                kind: NameErrorKind::ForwardPointer { target: 2 },
            }),
            ret
        );
    }

    #[test]
    fn forward_pointer_is_rejected() {
        let buf = [0xc0, 0x03, 0, 1, b'a', 0];
        let (ret, _) = parse_at(&buf, 0);
        assert!(matches!(
            ret,
            Err(DecodeError::MalformedName {
                kind: NameErrorKind::ForwardPointer { target: 3 },
                ..
            })
        ));
    }

    #[test]
    fn pointer_loop_terminates() {
        // label at 0 runs into a pointer at 2 that jumps back to 0
        let buf = [1, b'a', 0xc0, 0x00];
        let (ret, _) = parse_at(&buf, 0);
        assert!(matches!(
            ret,
            Err(DecodeError::MalformedName {
                offset: 2,
                kind: NameErrorKind::ForwardPointer { target: 0 },
            })
        ));

        // name starting at 4 jumps to 0, whose labels lead back to the pointer at 6
        let buf = [1, b'a', 1, b'b', 1, b'c', 0xc0, 0x00];
        let (ret, _) = parse_at(&buf, 4);
        assert!(matches!(
            ret,
            Err(DecodeError::MalformedName {
                kind: NameErrorKind::ForwardPointer { .. },
                ..
            })
        ));
    }

    #[test]
    fn unterminated_name_is_truncated() {
        let (ret, _) = parse_at(&[3, b'c', b'o', b'm'], 0);
        assert_eq!(
            Err(DecodeError::Truncated { offset: 4, field: "name label length" }),
            ret
        );

        let (ret, _) = parse_at(&[5, b'c', b'o'], 0);
        assert_eq!(Err(DecodeError::Truncated { offset: 1, field: "name label" }), ret);

        let (ret, _) = parse_at(&[0, 0xc0], 1);
        assert_eq!(
            Err(DecodeError::Truncated { offset: 2, field: "compression pointer" }),
            ret
        );
    }

    #[test]
    fn decode_preserves_case() {
        let buf = [3, b'W', b'w', b'W', 0];
        let (ret, _) = parse_at(&buf, 0);
        assert_eq!("WwW", ret.unwrap().to_string());
    }
}
