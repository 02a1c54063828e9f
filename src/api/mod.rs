//! API surface — the boundary a transport layer calls into
//!
//! Routing, HTTP framing and docs pages live outside this crate; a server
//! maps `POST /mutant` to `handle_mutant` and `GET /stats` to `handle_stats`.

mod handler;

pub use handler::{
    DnaRequest, RequestError, RequestHandler, Response,
    STATUS_BAD_REQUEST, STATUS_FORBIDDEN, STATUS_OK,
};
