//! Share codec: source text <-> compressed, URL-safe fragment payload.
//!
//! The payload format is frozen. Links generated by earlier playground
//! builds must keep decoding, so the compression (zlib-wrapped deflate),
//! the alphabet remap and the padding rule below cannot change.

use std::io::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::DecodeError;
use crate::types::SharePayload;

/// Fragment key the payload is stored under.
pub const FRAGMENT_KEY: &str = "code=";

/// Compress `text` and encode it in the URL-safe alphabet, without padding.
///
/// # Panics
///
/// Panics only if the in-memory deflate stream fails, which a `Vec` sink
/// cannot cause.
pub fn encode_payload(text: &str) -> SharePayload {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).expect("in-memory deflate");
    let compressed = encoder.finish().expect("in-memory deflate");

    let payload = to_url_safe(&STANDARD.encode(compressed));
    tracing::debug!(text_len = text.len(), payload_len = payload.len(), "encoded share payload");
    return SharePayload(payload);
}

/// Build a full share URL: `location` with its fragment replaced by `#code=<payload>`.
pub fn share_url(text: &str, location: &str) -> String {
    let base = location.split_once('#').map_or(location, |(before, _)| return before);
    return format!("{base}#{}", encode_payload(text).fragment());
}

/// Recover source text from a share fragment.
///
/// Accepts the bare payload, `code=<payload>`, or `#code=<payload>`.
/// Absent input, empty input, and every decode failure yield `None`.
pub fn decode(fragment: Option<&str>) -> Option<String> {
    let fragment = fragment?;
    if fragment.is_empty() {
        return None;
    }

    match try_decode(fragment) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(error = %e, "share payload not restorable");
            None
        },
    }
}

/// Decode a share fragment, keeping the failure cause.
///
/// # Errors
///
/// Returns `DecodeError::Empty` if nothing remains after the markers,
/// `DecodeError::InvalidLength` or `DecodeError::Base64` for a malformed payload,
/// `DecodeError::Inflate` or `DecodeError::Truncated` for a corrupt compressed stream,
/// or `DecodeError::Utf8` if the inflated bytes are not text.
pub fn try_decode(fragment: &str) -> Result<String, DecodeError> {
    let payload = strip_fragment_markers(fragment);
    if payload.is_empty() {
        return Err(DecodeError::Empty);
    }

    let compressed = STANDARD.decode(from_url_safe(payload)?)?;

    let text = String::from_utf8(inflate(&compressed)?)?;
    tracing::debug!(payload_len = payload.len(), text_len = text.len(), "decoded share payload");
    return Ok(text);
}

/// Inflate a complete zlib stream. A stream that stops before its end
/// marker is an error rather than a short result.
///
/// # Errors
///
/// Returns `DecodeError::Inflate` for corrupt data,
/// or `DecodeError::Truncated` if the input runs out mid-stream.
fn inflate(compressed: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut inflater = Decompress::new(true);
    let mut inflated: Vec<u8> = Vec::with_capacity(compressed.len().saturating_mul(4).max(64));

    loop {
        let consumed = usize::try_from(inflater.total_in()).unwrap_or(usize::MAX);
        let produced = inflater.total_out();
        let remaining = compressed.get(consumed..).unwrap_or_default();
        if inflated.len() == inflated.capacity() {
            inflated.reserve(inflated.capacity());
        }

        match inflater.decompress_vec(remaining, &mut inflated, FlushDecompress::None)? {
            Status::StreamEnd => return Ok(inflated),
            Status::Ok | Status::BufError => {
                // Output space was available, so no progress means no more input.
                let stalled = inflater.total_out() == produced
                    && usize::try_from(inflater.total_in()).unwrap_or(usize::MAX) == consumed;
                if stalled {
                    return Err(DecodeError::Truncated);
                }
            },
        }
    }
}

/// The fragment part of a URL, or the whole input if it has no `#`.
pub fn fragment_of(url: &str) -> &str {
    return url.split_once('#').map_or(url, |(_, fragment)| return fragment);
}

/// Drop one optional leading `#`, then one optional leading `code=`.
fn strip_fragment_markers(fragment: &str) -> &str {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    return fragment.strip_prefix(FRAGMENT_KEY).unwrap_or(fragment);
}

/// Standard base64 -> URL-safe: `+` to `-`, `/` to `_`, trailing `=` removed.
fn to_url_safe(standard: &str) -> String {
    return standard
        .trim_end_matches('=')
        .chars()
        .map(|c| {
            return match c {
                '+' => '-',
                '/' => '_',
                other => other,
            };
        })
        .collect();
}

/// URL-safe -> standard base64, padding reinstated from the length mod 4.
///
/// # Errors
///
/// Returns `DecodeError::InvalidLength` when the unpadded length is 1 mod 4,
/// which no byte sequence encodes to.
fn from_url_safe(payload: &str) -> Result<String, DecodeError> {
    let unpadded = payload.trim_end_matches('=');
    let len = unpadded.len();
    let padding = match len % 4 {
        0 => 0,
        2 => 2,
        3 => 1,
        _ => return Err(DecodeError::InvalidLength { len }),
    };

    let mut standard: String = unpadded
        .chars()
        .map(|c| {
            return match c {
                '-' => '+',
                '_' => '/',
                other => other,
            };
        })
        .collect();
    standard.extend(std::iter::repeat_n('=', padding));
    return Ok(standard);
}
