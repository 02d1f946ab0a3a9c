use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid QR code")]
    InvalidQr,
}

/// Identifier carried by a scanned QR code: the final path segment of the URL,
/// e.g. `https://club.example/scan/k3j9x0` → `k3j9x0`.
///
/// Text that is not an absolute URL, or a URL whose final segment is empty
/// (`.../scan/`), is rejected locally and never sent to the server.
pub fn extract_identifier(decoded: &str) -> Result<String, DecodeError> {
    let url = Url::parse(decoded.trim()).map_err(|_| DecodeError::InvalidQr)?;

    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or(DecodeError::InvalidQr)
}
