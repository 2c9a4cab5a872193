use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use argh::FromArgs;
use log::{info, warn};
use record_types::{render_rdata, RecordType};
use tokio::net::UdpSocket;

const MAX_RESPONSE_SIZE: usize = 512;

#[derive(Debug, FromArgs)]
#[argh(description = "send one query to the stub server and print the reply")]
struct Args {
    #[argh(positional, description = "domain name to query")]
    name: String,

    #[argh(option, default = "1", description = "query type code, default: 1 (A)")]
    qtype: u16,

    #[argh(
        option,
        default = "SocketAddr::from(([127, 0, 0, 1], 2053))",
        description = "server address, default: 127.0.0.1:2053"
    )]
    server: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::try_init();
    let args: Args = argh::from_env();

    let id = (std::process::id() & 0xffff) as u16;
    let request = dns::Message::query(id, &args.name, args.qtype);
    let request_bytes = dns::encode_message(&request)?;

    let sock = UdpSocket::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0)).await?;
    sock.send_to(&request_bytes, args.server).await?;
    info!("sent {} bytes to {}", request_bytes.len(), args.server);

    let mut resp_buf = [0u8; MAX_RESPONSE_SIZE];
    let n = tokio::time::timeout(Duration::from_secs(3), sock.recv(&mut resp_buf)).await??;
    let resp = dns::decode_message(&resp_buf[..n])?;

    if resp.header.id != id {
        warn!("reply id {} does not match query id {}", resp.header.id, id);
    }

    println!(
        "id: {}, rcode: {}, answers: {}",
        resp.header.id, resp.header.flags.rcode, resp.header.ancount
    );
    for r in resp.records() {
        let data = render_rdata(r.rtype, &r.rdata).unwrap_or_else(|| format!("{:?}", &r.rdata[..]));
        println!("{}\t{}\t{}\t{}", r.name, r.ttl, RecordType::from(r.rtype), data);
    }

    Ok(())
}
