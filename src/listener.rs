use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use tokio::{io::AsyncReadExt, net::{TcpListener, TcpStream}};
use tokio_util::sync::CancellationToken;

use crate::pipeline::AlertPipeline;

/// TCP accept loop. One fixed-size packet per connection, handed to the
/// pipeline with the peer address; every outcome is logged and the loop
/// keeps accepting. A bad packet never takes the listener down.
pub struct AlertListener {
    listener: TcpListener,
    max_packet_bytes: usize,
    pipeline: Arc<AlertPipeline>,
}

impl AlertListener {
    pub async fn bind(
        bind_host: &str,
        port: u16,
        max_packet_bytes: usize,
        pipeline: Arc<AlertPipeline>,
    ) -> Result<Self> {
        let listener = TcpListener::bind((bind_host, port))
            .await
            .with_context(|| format!("unable to bind listener on {bind_host}:{port}"))?;
        Ok(Self {
            listener,
            max_packet_bytes,
            pipeline,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("listener has no local address")
    }

    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        let local = self.local_addr()?;
        tracing::info!(target: "listener", %local, "listening for alert packets");

        loop {
            let accepted = tokio::select! {
                accepted = self.listener.accept() => accepted,
                _ = shutdown.cancelled() => {
                    tracing::info!(target: "listener", "shutdown requested; accept loop exiting");
                    return Ok(());
                }
            };

            let (stream, peer) = match accepted {
                Ok(pair) => pair,
                Err(err) => {
                    tracing::warn!(target: "listener", error = %err, "accept failed");
                    continue;
                }
            };

            if let Err(err) = self.handle_connection(stream, peer).await {
                tracing::warn!(target: "listener", %peer, error = %err, "connection handling failed");
            }
        }
    }

    async fn handle_connection(&self, mut stream: TcpStream, peer: SocketAddr) -> Result<()> {
        tracing::debug!(target: "listener", %peer, "connection accepted");
        let packet = read_packet(&mut stream, self.max_packet_bytes).await?;

        match self.pipeline.ingest(&packet, peer.ip()).await {
            Ok(()) => {}
            Err(err) => {
                // Dropped packet, not a listener failure; the loop keeps going.
                tracing::warn!(
                    target: "listener",
                    %peer,
                    kind = err.kind(),
                    error = %err,
                    "packet dropped"
                );
            }
        }
        Ok(())
    }
}

/// Reads until the transport buffer is full or the sender closes. The
/// sender pads to the fixed packet size, so a well-formed packet fills the
/// buffer; short packets still flow through and fail authentication or
/// decoding downstream.
async fn read_packet(stream: &mut TcpStream, max_packet_bytes: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; max_packet_bytes];
    let mut filled = 0;
    while filled < buf.len() {
        let n = stream
            .read(&mut buf[filled..])
            .await
            .context("failed to read packet from connection")?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);
    Ok(buf)
}
