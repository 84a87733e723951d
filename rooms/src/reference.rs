//! Floor-plan reference normalization.
//!
//! A room's `detailLocation` may hold a floor-plan reference in any of the
//! shapes produced by manual entry, picker selection or designer upload:
//!
//! ```text
//! reference     := absolute-url | network-path | rooted-path | relative-path | filename
//! absolute-url  := scheme "://" authority path-part
//! network-path  := "//" authority path-part
//! rooted-path   := "/" path-part
//! path-part     := segment *( "/" segment ) [ "?" query ] [ "#" fragment ]
//! ```
//!
//! Two steps apply to every reference before use:
//!
//! 1. [`normalize`] trims whitespace and collapses doubled API prefixes
//!    (`/api/api/` → `/api/`), which appear when a relative URL is joined to
//!    a base that already ends in `/api`.
//! 2. [`extract_filename`] strips the origin, then the query string, then the
//!    fragment, takes the final path segment and percent-decodes it.
//!
//! Resolvers always re-derive the filename from the raw reference instead of
//! trusting a cached value.

#[cfg(test)]
#[path = "reference_test.rs"]
mod reference_test;

const API_PREFIX: &str = "/api/";
const DOUBLED_API_PREFIX: &str = "/api/api/";
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Why a reference could not be resolved to a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// The reference was empty or whitespace.
    #[error("reference is empty")]
    Empty,
    /// The reference has no final path segment (e.g. a bare host or trailing slash).
    #[error("reference has no filename")]
    NoFilename,
}

/// Kind of document a filename points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// An SVG floor plan that can be rendered inline.
    Svg,
    /// Anything else: shown as a placeholder.
    Other,
}

/// A reference resolved to a stored document's filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorMapRef {
    pub filename: String,
    pub kind: DocumentKind,
}

impl FloorMapRef {
    #[must_use]
    pub fn is_svg(&self) -> bool {
        self.kind == DocumentKind::Svg
    }

    /// Document path relative to the API base.
    #[must_use]
    pub fn document_path(&self) -> String {
        crate::endpoints::floor_map_document(&self.filename)
    }
}

/// Trim and collapse doubled API prefixes. Idempotent.
#[must_use]
pub fn normalize(reference: &str) -> String {
    let mut out = reference.trim().to_owned();
    while let Some(idx) = out.find(DOUBLED_API_PREFIX) {
        out.replace_range(idx..idx + DOUBLED_API_PREFIX.len(), API_PREFIX);
    }
    out
}

/// Extract the decoded filename from a reference, or `None` when there is none.
#[must_use]
pub fn extract_filename(reference: &str) -> Option<String> {
    let normalized = normalize(reference);
    let path = strip_origin(&normalized);
    let path = path.split_once('?').map_or(path, |(head, _)| head);
    let path = path.split_once('#').map_or(path, |(head, _)| head);
    let segment = path.rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    let decoded = percent_decode(segment);
    if decoded.is_empty() { None } else { Some(decoded) }
}

/// Resolve a reference to its filename and document kind.
///
/// # Errors
///
/// [`ReferenceError::Empty`] for blank input, [`ReferenceError::NoFilename`]
/// when no final path segment exists.
pub fn resolve(reference: &str) -> Result<FloorMapRef, ReferenceError> {
    if reference.trim().is_empty() {
        return Err(ReferenceError::Empty);
    }
    let filename = extract_filename(reference).ok_or(ReferenceError::NoFilename)?;
    let kind = if has_svg_extension(&filename) {
        DocumentKind::Svg
    } else {
        DocumentKind::Other
    };
    Ok(FloorMapRef { filename, kind })
}

/// Whether a filename ends in `.svg` (case-insensitive).
#[must_use]
pub fn has_svg_extension(filename: &str) -> bool {
    filename.len() > 4
        && filename
            .get(filename.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".svg"))
}

/// Whether two references point at the same document URL after normalization.
#[must_use]
pub fn same_reference(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Whether two references name the same stored document once both are made
/// absolute against `origin`. A picked URL stored as
/// `https://host/api/rooms/floormaps/a.svg` matches the listed
/// `/api/rooms/floormaps/a.svg`.
#[must_use]
pub fn same_document(origin: &str, a: &str, b: &str) -> bool {
    absolute_url(origin, a) == absolute_url(origin, b)
}

/// Join `url` onto `origin` (e.g. `https://intranet.example.com`) and normalize.
///
/// Absolute URLs pass through; rooted paths replace the origin's path;
/// relative paths are appended. An empty origin leaves relative input as is.
#[must_use]
pub fn absolute_url(origin: &str, url: &str) -> String {
    let url = url.trim();
    if scheme_end(url).is_some() || url.starts_with("//") {
        return normalize(url);
    }
    let origin = origin.trim().trim_end_matches('/');
    if origin.is_empty() {
        return normalize(url);
    }
    let joined = if url.starts_with('/') {
        let root = origin_root(origin);
        format!("{root}{url}")
    } else {
        format!("{origin}/{url}")
    };
    normalize(&joined)
}

/// `scheme://host[:port]` portion of an absolute URL, or the input when it has none.
fn origin_root(url: &str) -> &str {
    let Some(authority_start) = scheme_end(url).map(|idx| idx + 3) else {
        return url;
    };
    match url[authority_start..].find(['/', '?', '#']) {
        Some(idx) => &url[..authority_start + idx],
        None => url,
    }
}

/// Byte index of `://` when it terminates a scheme (no `/`, `?` or `#` before it).
fn scheme_end(reference: &str) -> Option<usize> {
    let idx = reference.find("://")?;
    let scheme = &reference[..idx];
    if scheme.is_empty() || scheme.contains(['/', '?', '#']) {
        return None;
    }
    Some(idx)
}

fn strip_origin(reference: &str) -> &str {
    let rest = if let Some(idx) = scheme_end(reference) {
        &reference[idx + 3..]
    } else if let Some(rest) = reference.strip_prefix("//") {
        rest
    } else {
        return reference;
    };
    match rest.find(['/', '?', '#']) {
        Some(idx) => &rest[idx..],
        None => "",
    }
}

/// Decode `%XX` escapes. Malformed escapes are kept literally.
#[must_use]
pub fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Encode everything outside the RFC 3986 unreserved set.
#[must_use]
pub fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
            out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
        }
    }
    out
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
