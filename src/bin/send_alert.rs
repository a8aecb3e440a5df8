//! Manual test-packet sender: builds one fixed-size packet (4-byte code +
//! UTF-8 message + space padding) and fires it at a listener. Useful for
//! poking a running panel without real alert infrastructure.

use std::env;

use anyhow::{Result, bail};
use tokio::{io::AsyncWriteExt, net::TcpStream};

use inkalert::{auth::AUTH_CODE_LEN, cli::next_value};

struct SendArgs {
    host: String,
    port: u16,
    code: String,
    message: String,
    packet_bytes: usize,
}

impl Default for SendArgs {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9005,
            code: "1111".to_string(),
            message: "WARNING Flooding is expected in the next 24 hours.".to_string(),
            packet_bytes: 1024,
        }
    }
}

fn parse_args() -> Result<SendArgs> {
    let mut parsed = SendArgs::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--host" => parsed.host = next_value(&mut args, "--host")?,
            "--port" => parsed.port = next_value(&mut args, "--port")?.parse()?,
            "--code" => parsed.code = next_value(&mut args, "--code")?,
            "--message" => parsed.message = next_value(&mut args, "--message")?,
            "--packet-bytes" => {
                parsed.packet_bytes = next_value(&mut args, "--packet-bytes")?.parse()?;
            }
            other => {
                bail!(
                    "unknown argument: {other}. usage: send-alert [--host <h>] [--port <p>] \
                     [--code <4-byte code>] [--message <text>] [--packet-bytes <n>]"
                );
            }
        }
    }

    Ok(parsed)
}

fn build_packet(code: &[u8], message: &str, size: usize) -> Result<Vec<u8>> {
    if code.len() != AUTH_CODE_LEN {
        bail!("authentication code must be exactly {AUTH_CODE_LEN} bytes");
    }
    let body = message.as_bytes();
    if code.len() + body.len() > size {
        bail!("message plus code exceeds the packet size of {size} bytes");
    }

    let mut packet = Vec::with_capacity(size);
    packet.extend_from_slice(code);
    packet.extend_from_slice(body);
    packet.resize(size, b' ');
    Ok(packet)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;
    let packet = build_packet(args.code.as_bytes(), &args.message, args.packet_bytes)?;

    let mut stream = TcpStream::connect((args.host.as_str(), args.port)).await?;
    stream.write_all(&packet).await?;
    stream.shutdown().await?;

    println!(
        "sent {} bytes to {}:{} (code {:?})",
        packet.len(),
        args.host,
        args.port,
        args.code
    );
    Ok(())
}
