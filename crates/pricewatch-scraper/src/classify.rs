//! Maps transport failures onto stable, socket-style error codes.

use std::error::Error as StdError;
use std::io;

/// Reported when the transport gives no more specific reason.
pub const GENERIC_NETWORK_CODE: &str = "NETWORK_ERROR";

/// Returns the code describing why a request failed.
///
/// Status failures (from `error_for_status`) map to `ERR_BAD_REQUEST` for
/// 4xx and `ERR_BAD_RESPONSE` for 5xx. Connection failures are identified by
/// the `io::Error` buried in the error's source chain.
pub(crate) fn transport_code(err: &reqwest::Error) -> &'static str {
    if let Some(status) = err.status() {
        return if status.is_server_error() {
            "ERR_BAD_RESPONSE"
        } else {
            "ERR_BAD_REQUEST"
        };
    }

    if err.is_timeout() {
        return "ETIMEDOUT";
    }

    if let Some(code) = io_error_kind(err).and_then(io_kind_code) {
        return code;
    }

    if chain_mentions(err, "dns error") || chain_mentions(err, "failed to lookup address") {
        return "ENOTFOUND";
    }

    if err.is_redirect() {
        return "ERR_FR_TOO_MANY_REDIRECTS";
    }

    if err.is_decode() || err.is_body() {
        return "ERR_BAD_RESPONSE";
    }

    GENERIC_NETWORK_CODE
}

fn io_kind_code(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::ConnectionRefused => Some("ECONNREFUSED"),
        io::ErrorKind::ConnectionReset => Some("ECONNRESET"),
        io::ErrorKind::ConnectionAborted => Some("ECONNABORTED"),
        io::ErrorKind::TimedOut => Some("ETIMEDOUT"),
        io::ErrorKind::AddrNotAvailable => Some("EADDRNOTAVAIL"),
        _ => None,
    }
}

fn io_error_kind(err: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut source = err.source();
    while let Some(inner) = source {
        if let Some(io_err) = inner.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        source = inner.source();
    }
    None
}

fn chain_mentions(err: &(dyn StdError + 'static), needle: &str) -> bool {
    let mut source = err.source();
    while let Some(inner) = source {
        if inner.to_string().contains(needle) {
            return true;
        }
        source = inner.source();
    }
    false
}
