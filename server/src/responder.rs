use std::net::SocketAddr;

use configuration::AnswerConfiguration;
use dns::{opcode, rcode, Flags, Header, Message, ResourceRecord};
use record_types::{render_rdata, RecordClass, RecordType};

/// Builds the stub reply to `request`.
///
/// Standard queries get one A record per A/IN question, carrying the
/// configured address. Any other opcode is answered NOTIMP with no records.
pub fn build_response(request: &Message, answer: &AnswerConfiguration) -> Message {
    let a = u16::from(RecordType::A);
    let class_in = u16::from(RecordClass::In);
    let supported = request.header.flags.opcode == opcode::QUERY;

    let flags = Flags {
        qr: true,
        opcode: request.header.flags.opcode,
        rd: request.header.flags.rd,
        rcode: if supported {
            rcode::NO_ERROR
        } else {
            rcode::NOT_IMPLEMENTED
        },
        ..Flags::default()
    };

    let answers = if supported {
        request
            .questions
            .iter()
            .filter(|q| q.qtype == a && q.qclass == class_in)
            .map(|q| {
                ResourceRecord::new(
                    q.name.clone(),
                    a,
                    class_in,
                    answer.ttl,
                    answer.address.octets().to_vec(),
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut response = Message {
        header: Header {
            id: request.header.id,
            flags,
            ..Header::default()
        },
        questions: request.questions.clone(),
        answers,
        ..Message::default()
    };
    response.sync_counts();

    response
}

/// Turns one inbound datagram into the bytes to send back, if any.
///
/// Undecodable datagrams and messages that are themselves responses are
/// dropped.
pub fn respond(datagram: &[u8], answer: &AnswerConfiguration, peer: SocketAddr) -> Option<Vec<u8>> {
    let request = match dns::decode_message(datagram) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!(%peer, error = %e, len = datagram.len(), "dropping malformed datagram");
            return None;
        }
    };

    if request.header.flags.qr {
        tracing::debug!(%peer, id = request.header.id, "ignoring a response sent to the server");
        return None;
    }

    for q in &request.questions {
        tracing::info!(
            %peer,
            id = request.header.id,
            name = %q.name,
            qtype = %RecordType::from(q.qtype),
            "query received"
        );
    }

    let response = build_response(&request, answer);

    for r in &response.answers {
        tracing::debug!(
            name = %r.name,
            rtype = %RecordType::from(r.rtype),
            ttl = r.ttl,
            data = render_rdata(r.rtype, &r.rdata).as_deref().unwrap_or("<opaque>"),
            "answer"
        );
    }

    match dns::encode_message(&response) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::error!(%peer, id = response.header.id, error = %e, "failed to encode reply");
            None
        }
    }
}
