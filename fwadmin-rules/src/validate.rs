use once_cell::sync::Lazy;
use regex::Regex;

/// FQDN 검증 정규식 (라벨 1개 이상 + 알파벳 TLD 2자 이상)
static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+\.)+[A-Za-z]{2,}$").expect("도메인 정규식 컴파일 실패")
});

/// 엄격한 IPv4 점표기 검증 (옥텟 0~255, 선행 0 불가)
pub fn validate_ip(ip: &str) -> bool {
    let mut count = 0;
    for octet in ip.split('.') {
        count += 1;
        if count > 4 || !valid_octet(octet) {
            return false;
        }
    }
    count == 4
}

fn valid_octet(octet: &str) -> bool {
    if octet.is_empty() || octet.len() > 3 {
        return false;
    }
    if !octet.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    // "0"은 허용, "01" 같은 선행 0은 불가
    if octet.len() > 1 && octet.starts_with('0') {
        return false;
    }
    octet.parse::<u16>().is_ok_and(|v| v <= 255)
}

/// 도메인(FQDN) 검증
pub fn validate_domain(domain: &str) -> bool {
    DOMAIN_REGEX.is_match(domain)
}

/// 포트 범위 검증 [1, 65535]
pub const fn validate_port(port: i64) -> bool {
    1 <= port && port <= 65535
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_ipv4() {
        for ip in ["0.0.0.0", "1.1.1.1", "127.0.0.1", "255.255.255.255", "192.168.10.250"] {
            assert!(validate_ip(ip), "{ip} 거부됨");
        }
    }

    #[test]
    fn rejects_malformed_ipv4() {
        for ip in [
            "",
            "1.1.1",
            "1.1.1.1.1",
            "256.1.1.1",
            "1.1.1.999",
            "a.b.c.d",
            "1.1.1.1a",
            "01.1.1.1",
            "1..1.1",
            " 1.1.1.1",
            "-1.1.1.1",
        ] {
            assert!(!validate_ip(ip), "{ip} 허용됨");
        }
    }

    #[test]
    fn accepts_valid_domains() {
        for domain in ["example.com", "sub.example.co.kr", "my-host.example.io", "a_b.example.org"] {
            assert!(validate_domain(domain), "{domain} 거부됨");
        }
    }

    #[test]
    fn rejects_malformed_domains() {
        for domain in [
            "",
            "example",
            "example.c",
            "example.123",
            "://example.com",
            "http://example.com",
            "exa mple.com",
            ".example.com",
            "example..com",
        ] {
            assert!(!validate_domain(domain), "{domain} 허용됨");
        }
    }

    #[test]
    fn port_range_boundaries() {
        assert!(validate_port(1));
        assert!(validate_port(80));
        assert!(validate_port(65535));
        assert!(!validate_port(0));
        assert!(!validate_port(-1));
        assert!(!validate_port(65536));
    }
}
