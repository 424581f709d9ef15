//! Pattern-based format matchers for the `format` keyword.
//!
//! Each format is a pure predicate over a string, dispatched from a fixed
//! enumerated set. The matchers are intentionally approximate regex checks,
//! not RFC-complete grammars.

use once_cell::sync::Lazy;
use regex::Regex;

static DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\d{4}-\d{2}-\d{2}[Tt]\d{2}:\d{2}:\d{2}(\.\d+)?([Zz]|[+-]\d{2}:\d{2})$",
    )
    .expect("date-time pattern compiles")
});

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

static HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("hostname pattern compiles")
});

static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((25[0-5]|2[0-4]\d|[01]?\d\d?)\.){3}(25[0-5]|2[0-4]\d|[01]?\d\d?)$")
        .expect("ipv4 pattern compiles")
});

static IPV6: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(([0-9A-Fa-f]{1,4}:){7}[0-9A-Fa-f]{1,4}|([0-9A-Fa-f]{1,4}:){1,7}:|([0-9A-Fa-f]{1,4}:){1,6}:[0-9A-Fa-f]{1,4}(:[0-9A-Fa-f]{1,4}){0,5}|::([0-9A-Fa-f]{1,4}(:[0-9A-Fa-f]{1,4}){0,6})?)$")
        .expect("ipv6 pattern compiles")
});

static URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:\S*$").expect("uri pattern compiles")
});

static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid pattern compiles")
});

/// A recognized `format` tag.
///
/// Unknown tags in a schema document are not represented here; they build
/// to an absent format and always pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    DateTime,
    Email,
    Hostname,
    Ipv4,
    Ipv6,
    Regex,
    Uri,
    Uuid,
}

impl Format {
    /// Parses a JSON Schema format tag, returning None for unknown tags.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "date-time" => Some(Format::DateTime),
            "email" => Some(Format::Email),
            "hostname" => Some(Format::Hostname),
            "ipv4" => Some(Format::Ipv4),
            "ipv6" => Some(Format::Ipv6),
            "regex" => Some(Format::Regex),
            "uri" => Some(Format::Uri),
            "uuid" => Some(Format::Uuid),
            _ => None,
        }
    }

    /// Returns the JSON Schema tag for this format.
    pub fn name(&self) -> &'static str {
        match self {
            Format::DateTime => "date-time",
            Format::Email => "email",
            Format::Hostname => "hostname",
            Format::Ipv4 => "ipv4",
            Format::Ipv6 => "ipv6",
            Format::Regex => "regex",
            Format::Uri => "uri",
            Format::Uuid => "uuid",
        }
    }

    /// Returns true if the string satisfies this format's approximation.
    pub fn check(&self, value: &str) -> bool {
        match self {
            Format::DateTime => DATE_TIME.is_match(value),
            Format::Email => EMAIL.is_match(value),
            Format::Hostname => HOSTNAME.is_match(value),
            Format::Ipv4 => IPV4.is_match(value),
            Format::Ipv6 => IPV6.is_match(value),
            Format::Regex => Regex::new(value).is_ok(),
            Format::Uri => URI.is_match(value),
            Format::Uuid => UUID.is_match(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trip() {
        for format in [
            Format::DateTime,
            Format::Email,
            Format::Hostname,
            Format::Ipv4,
            Format::Ipv6,
            Format::Regex,
            Format::Uri,
            Format::Uuid,
        ] {
            assert_eq!(Format::from_name(format.name()), Some(format));
        }
        assert_eq!(Format::from_name("carrier-pigeon"), None);
    }

    #[test]
    fn test_date_time() {
        assert!(Format::DateTime.check("2024-05-01T12:30:00Z"));
        assert!(Format::DateTime.check("2024-05-01T12:30:00.123+02:00"));
        assert!(!Format::DateTime.check("2024-05-01"));
        assert!(!Format::DateTime.check("noon"));
    }

    #[test]
    fn test_email() {
        assert!(Format::Email.check("user@example.com"));
        assert!(!Format::Email.check("not-an-email"));
        assert!(!Format::Email.check("two@@example.com"));
    }

    #[test]
    fn test_hostname() {
        assert!(Format::Hostname.check("example.com"));
        assert!(Format::Hostname.check("a.b-c.d"));
        assert!(!Format::Hostname.check("-leading.example.com"));
        assert!(!Format::Hostname.check("under_score.example.com"));
    }

    #[test]
    fn test_ipv4() {
        assert!(Format::Ipv4.check("192.168.0.1"));
        assert!(Format::Ipv4.check("255.255.255.255"));
        assert!(!Format::Ipv4.check("256.1.1.1"));
        assert!(!Format::Ipv4.check("1.2.3"));
    }

    #[test]
    fn test_ipv6() {
        assert!(Format::Ipv6.check("2001:0db8:85a3:0000:0000:8a2e:0370:7334"));
        assert!(Format::Ipv6.check("::"));
        assert!(Format::Ipv6.check("fe80::1"));
        assert!(!Format::Ipv6.check("not:an:address:at:all:..."));
    }

    #[test]
    fn test_regex() {
        assert!(Format::Regex.check(r"^\d+$"));
        assert!(!Format::Regex.check("[unclosed"));
    }

    #[test]
    fn test_uri() {
        assert!(Format::Uri.check("https://example.com/a?b=c"));
        assert!(Format::Uri.check("mailto:user@example.com"));
        assert!(!Format::Uri.check("no scheme here"));
        assert!(!Format::Uri.check("/relative/path"));
    }

    #[test]
    fn test_uuid() {
        assert!(Format::Uuid.check("123e4567-e89b-12d3-a456-426614174000"));
        assert!(!Format::Uuid.check("123e4567e89b12d3a456426614174000"));
    }
}
