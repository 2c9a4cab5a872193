use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use configuration::{get_config, AnswerConfiguration, StubServerConfiguration};
use tokio::net::UdpSocket;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod responder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: cli_args::CliArgs = argh::from_env();
    let config: StubServerConfiguration = get_config(args.config)?;

    let address = config.server.bind_address();
    let socket = Arc::new(UdpSocket::bind(address).await?);
    tracing::info!(%address, pid = std::process::id(), "listening");

    let answer = Arc::new(config.answer);
    let max_datagram_size = config.server.max_datagram_size;

    loop {
        let mut buf = BytesMut::with_capacity(max_datagram_size);
        let peer = match socket.recv_buf_from(&mut buf).await {
            Ok((len, peer)) => {
                tracing::debug!(%peer, len, "received datagram");
                peer
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to receive datagram");
                continue;
            }
        };

        // one task per datagram, nothing is shared but the socket
        tokio::spawn(handle_datagram(socket.clone(), answer.clone(), buf.freeze(), peer));
    }
}

async fn handle_datagram(
    socket: Arc<UdpSocket>,
    answer: Arc<AnswerConfiguration>,
    datagram: Bytes,
    peer: SocketAddr,
) {
    let Some(reply) = responder::respond(&datagram, &answer, peer) else {
        return;
    };

    if let Err(e) = socket.send_to(&reply, peer).await {
        tracing::warn!(%peer, error = %e, "failed to send reply");
    }
}
