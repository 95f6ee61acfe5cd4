use std::fmt;

use serde::{Serialize, Serializer};

/// 규칙 분류 (차단 목록 / 허용 목록)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Blacklist,
    Whitelist,
}

impl Mode {
    /// 저장/응답에 쓰이는 소문자 표기
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Blacklist => "blacklist",
            Mode::Whitelist => "whitelist",
        }
    }

    /// 대소문자 무시 + 앞뒤 공백 제거 후 파싱
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "blacklist" => Some(Mode::Blacklist),
            "whitelist" => Some(Mode::Whitelist),
            _ => None,
        }
    }

}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(Mode::parse("blacklist"), Some(Mode::Blacklist));
        assert_eq!(Mode::parse("WHITELIST"), Some(Mode::Whitelist));
        assert_eq!(Mode::parse("  BlackList "), Some(Mode::Blacklist));
    }

    #[test]
    fn parse_rejects_unknown_modes() {
        assert_eq!(Mode::parse(""), None);
        assert_eq!(Mode::parse("greylist"), None);
        assert_eq!(Mode::parse("black list"), None);
    }

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(
            serde_json::to_value(Mode::Whitelist).unwrap(),
            serde_json::json!("whitelist")
        );
    }
}
