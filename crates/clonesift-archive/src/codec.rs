//! Entry name recovery.
//!
//! Archives produced on Chinese-locale Windows hosts store names in GBK without
//! setting the zip UTF-8 flag. A name is never mixed: it is either UTF-8 or GBK.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::GBK;

/// A decoded entry name, tagged with how it was recovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodedName {
    /// Raw bytes were valid UTF-8.
    Utf8(String),
    /// Raw bytes were transcoded from GBK.
    Legacy(String),
    /// Neither charset fit; invalid sequences were replaced.
    Lossy(String),
}

impl DecodedName {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Utf8(s) | Self::Legacy(s) | Self::Lossy(s) => s,
        }
    }

    /// True when the name did not come through as plain UTF-8.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::Utf8(_))
    }
}

impl fmt::Display for DecodedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for DecodedName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Decode raw entry name bytes. Never fails.
pub fn decode(raw: &[u8]) -> DecodedName {
    if let Ok(s) = std::str::from_utf8(raw) {
        return DecodedName::Utf8(s.to_owned());
    }

    match GBK.decode_without_bom_handling_and_without_replacement(raw) {
        Some(decoded) => DecodedName::Legacy(decoded.into_owned()),
        None => DecodedName::Lossy(match String::from_utf8_lossy(raw) {
            Cow::Borrowed(s) => s.to_owned(),
            Cow::Owned(s) => s,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gbk(s: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = GBK.encode(s);
        assert!(!had_errors);
        bytes.into_owned()
    }

    #[test]
    fn ascii_is_utf8() {
        let name = decode(b"2024EGA-001X-4.T7.ab1");
        assert_eq!(name, DecodedName::Utf8("2024EGA-001X-4.T7.ab1".into()));
        assert!(!name.is_fallback());
    }

    #[test]
    fn native_utf8_chinese() {
        let name = decode("报告成功/测试.ab1".as_bytes());
        assert_eq!(name.as_str(), "报告成功/测试.ab1");
        assert!(!name.is_fallback());
    }

    #[test]
    fn gbk_matches_native_utf8() {
        let text = "报告成功/测试-自合.xlsx";
        let raw = gbk(text);
        assert!(std::str::from_utf8(&raw).is_err());

        let name = decode(&raw);
        assert!(matches!(name, DecodedName::Legacy(_)));
        assert_eq!(name.as_str(), decode(text.as_bytes()).as_str());
    }

    #[test]
    fn undecodable_falls_back_to_lossy() {
        // 0xFF is neither a UTF-8 nor a GBK lead byte
        let name = decode(b"bad\xFFname.ab1");
        assert!(matches!(name, DecodedName::Lossy(_)));
        assert_eq!(name.as_str(), "bad\u{FFFD}name.ab1");
    }

    #[test]
    fn empty_name() {
        assert_eq!(decode(b""), DecodedName::Utf8(String::new()));
    }
}
