//! # Chunk-correlation protocol and numeric encoding
//!
//! A compact JWS is carried in QR symbols as decimal digits: each
//! character maps to its code point minus 45, zero-padded to two
//! digits. A single chunk carries at most 1195 JWS characters; when
//! chunking is required each chunk carries at most 1191, the smaller
//! bound reserving room for the `<index>/<total>/` correlation marker.
//!
//! Split points sit at `i·len/total` integer-division boundaries —
//! near-equal pieces, not fixed-size blocks — so chunk boundaries are
//! stable and reproducible for a given input.

use crate::error::QrError;

/// Maximum JWS characters carried by a lone chunk.
pub const MAX_SINGLE_CHUNK_LEN: usize = 1195;

/// Maximum JWS characters per chunk once chunking is required.
pub const MAX_MULTI_CHUNK_LEN: usize = 1191;

/// Every chunk payload starts with this marker.
const PREFIX: &str = "shc:/";

/// Numeric encoding subtracts this from each character's code point.
const CHAR_OFFSET: u8 = 45;

/// One QR-encodable payload plus its position in the chunk set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrChunk {
    /// 1-based chunk index.
    pub index: usize,
    /// Total number of chunks in the set.
    pub total: usize,
    /// The full `shc:/...` payload to render as a QR symbol.
    pub payload: String,
}

fn is_jws_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

fn numeric_encode(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() * 2);
    for byte in segment.bytes() {
        let value = byte - CHAR_OFFSET;
        out.push((b'0' + value / 10) as char);
        out.push((b'0' + value % 10) as char);
    }
    out
}

fn chunk_count(len: usize) -> usize {
    if len <= MAX_SINGLE_CHUNK_LEN {
        1
    } else {
        len.div_ceil(MAX_MULTI_CHUNK_LEN)
    }
}

/// Encode a compact JWS as its ordered sequence of QR chunk payloads.
///
/// A single-chunk payload is `shc:/<digits>`; multi-chunk payloads are
/// `shc:/<index>/<total>/<digits>`. Concatenating the decoded chunk
/// bodies in index order reproduces the input exactly.
pub fn encode(jws: &str) -> Result<Vec<QrChunk>, QrError> {
    if let Some(c) = jws.chars().find(|&c| !is_jws_char(c)) {
        return Err(QrError::InvalidCharacter(c));
    }

    let len = jws.len();
    let total = chunk_count(len);

    let mut chunks = Vec::with_capacity(total);
    for index in 1..=total {
        let segment = &jws[(index - 1) * len / total..index * len / total];
        let digits = numeric_encode(segment);
        let payload = if total == 1 {
            format!("{PREFIX}{digits}")
        } else {
            format!("{PREFIX}{index}/{total}/{digits}")
        };
        chunks.push(QrChunk {
            index,
            total,
            payload,
        });
    }
    Ok(chunks)
}

/// Reassemble a compact JWS from chunk payloads.
///
/// Payloads may arrive in any order; they are sorted by their
/// correlation index. The inverse of [`encode`].
pub fn decode<S: AsRef<str>>(payloads: &[S]) -> Result<String, QrError> {
    if payloads.is_empty() {
        return Err(QrError::InconsistentChunks("no chunks".to_string()));
    }

    let mut parts = Vec::with_capacity(payloads.len());
    for payload in payloads {
        parts.push(parse_payload(payload.as_ref(), payloads.len())?);
    }
    parts.sort_by_key(|(index, _)| *index);

    for (position, (index, _)) in parts.iter().enumerate() {
        if *index != position + 1 {
            return Err(QrError::InconsistentChunks(format!(
                "expected chunk index {}, found {index}",
                position + 1
            )));
        }
    }

    let mut jws = String::new();
    for (_, body) in parts {
        jws.push_str(&numeric_decode(body)?);
    }
    Ok(jws)
}

/// Split a payload into its correlation index and digit body.
fn parse_payload<'a>(payload: &'a str, expected_total: usize) -> Result<(usize, &'a str), QrError> {
    let rest = payload
        .strip_prefix(PREFIX)
        .ok_or_else(|| QrError::MalformedPayload(format!("missing {PREFIX} prefix")))?;

    if expected_total == 1 {
        return Ok((1, rest));
    }

    let (index, rest) = rest
        .split_once('/')
        .ok_or_else(|| QrError::MalformedPayload("missing chunk index".to_string()))?;
    let (total, body) = rest
        .split_once('/')
        .ok_or_else(|| QrError::MalformedPayload("missing chunk total".to_string()))?;

    let index: usize = index
        .parse()
        .map_err(|_| QrError::MalformedPayload(format!("bad chunk index {index:?}")))?;
    let total: usize = total
        .parse()
        .map_err(|_| QrError::MalformedPayload(format!("bad chunk total {total:?}")))?;

    if total != expected_total {
        return Err(QrError::InconsistentChunks(format!(
            "chunk declares total {total}, set has {expected_total}"
        )));
    }

    Ok((index, body))
}

fn numeric_decode(digits: &str) -> Result<String, QrError> {
    if digits.len() % 2 != 0 {
        return Err(QrError::MalformedPayload(
            "odd number of digits".to_string(),
        ));
    }

    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() / 2);
    for pair in bytes.chunks_exact(2) {
        let (hi, lo) = (pair[0], pair[1]);
        if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
            return Err(QrError::MalformedPayload(format!(
                "non-digit pair {:?}",
                String::from_utf8_lossy(pair)
            )));
        }
        let c = ((hi - b'0') * 10 + (lo - b'0') + CHAR_OFFSET) as char;
        if !is_jws_char(c) {
            return Err(QrError::InvalidCharacter(c));
        }
        out.push(c);
    }
    Ok(out)
}
