//! HTTP host for embedding the interpreter in a browser playground.
//!
//! `POST /run` takes source text as the request body and answers with the
//! submission result. `POST /reset` drops all global bindings. One
//! interpreter serves every request, so bindings persist between runs.

use std::{error::Error, io::Read};

use tiny_http::{Header, Method, Response, Server};

use crate::interpreter::Interpreter;

pub const USAGE: &str = "POST /run with source text as the body; POST /reset to clear bindings\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServeConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Maps one request onto the interpreter.
pub fn route(interpreter: &mut Interpreter, method: &Method, url: &str, body: &[u8]) -> Reply {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (Method::Post, "/run") => match std::str::from_utf8(body) {
            Ok(source) => Reply::ok(interpreter.interpret(source)),
            Err(_) => Reply::error(400, "request body must be UTF-8\n"),
        },
        (Method::Post, "/reset") => {
            interpreter.reset();
            Reply::ok(String::new())
        }
        (Method::Get, "/") => Reply::ok(USAGE.to_string()),
        _ => Reply::error(404, "not found\n"),
    }
}

/// Serves requests one at a time until the listener shuts down.
pub fn serve(config: &ServeConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let server = Server::http(config.addr())?;
    tracing::info!(addr = %config.addr(), "playground listening");

    let mut interpreter = Interpreter::new();
    for mut request in server.incoming_requests() {
        let mut body = Vec::new();
        let reply = match request.as_reader().read_to_end(&mut body) {
            Ok(_) => route(&mut interpreter, request.method(), request.url(), &body),
            Err(err) => {
                tracing::warn!("failed to read request body: {}", err);
                Reply::error(400, "unreadable request body\n")
            }
        };
        tracing::debug!(
            method = ?request.method(),
            url = request.url(),
            status = reply.status,
            "handled request"
        );

        let mut response = Response::from_string(reply.body).with_status_code(reply.status);
        if let Ok(header) =
            Header::from_bytes(&b"Content-Type"[..], &b"text/plain; charset=utf-8"[..])
        {
            response = response.with_header(header);
        }

        if let Err(err) = request.respond(response) {
            tracing::warn!("failed to send response: {}", err);
        }
    }

    Ok(())
}
