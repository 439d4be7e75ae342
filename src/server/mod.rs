use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

use crate::config::GeneratorConfig;

pub mod api;
pub mod routes;

/// Environment variable holding the bind address for `serve`.
pub const BIND_ENV_VAR: &str = "ACME_SYNTH_BIND";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Serve dataset endpoints until the process is stopped. One request per connection.
pub fn run_server(bind_addr: &str, config: &GeneratorConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    tracing::info!(%bind_addr, "server listening");
    println!("acme-synth server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, config) {
                    tracing::warn!(error = %err, "request error");
                }
            }
            Err(err) => tracing::warn!(error = %err, "connection failed"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream, config: &GeneratorConfig) -> std::io::Result<()> {
    let mut buffer = [0_u8; 8_192];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let request_line = request.lines().next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let response = routes::route_request(config, method, path);
    tracing::debug!(%method, %path, status = response.status_code, "handled request");
    stream.write_all(response.to_http_string().as_bytes())?;
    stream.flush()?;
    Ok(())
}
