// https://datatracker.ietf.org/doc/html/rfc1035#section-4

mod error;
mod header;
mod message;
mod name;
mod question;
mod resource_record;
mod utils;

pub use error::{DecodeError, EncodeError, NameErrorKind, Section};
pub use header::{opcode, rcode, Flags, Header, HEADER_LEN};
pub use message::Message;
pub use name::{Name, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use question::Question;
pub use resource_record::ResourceRecord;

pub fn encode_message(msg: &Message) -> Result<Vec<u8>, EncodeError> {
    let mut bytes: Vec<u8> = vec![];
    msg.to_bytes(&mut bytes)?;

    Ok(bytes)
}

pub fn decode_message(bytes: &[u8]) -> Result<Message, DecodeError> {
    Message::parse(bytes)
}
