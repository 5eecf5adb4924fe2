//! Validation of submitted application fields.
//!
//! Lengths are measured in bytes of the trimmed value.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use chrono::NaiveDate;
use url::{Host, Url};

use crate::server::{error::AppError, model::rp_application::RpApplicationFields};

const NICKNAME_MIN: usize = 3;
const NICKNAME_MAX: usize = 16;
const SKIN_URL_MAX: usize = 300;
const BIOGRAPHY_MIN_SENTENCE_MARKS: usize = 5;
const SKIN_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".webp"];

/// Byte ceilings per field.
const FIELD_LIMITS: [(&str, usize); 7] = [
    ("source", 200),
    ("rpName", 120),
    ("race", 80),
    ("gender", 80),
    ("skills", 2200),
    ("plan", 2200),
    ("biography", 7000),
];

/// Checks every rule a submission must satisfy.
///
/// # Returns
/// - `Ok(())` - Fields are valid
/// - `Err(AppError::Validation)` - First violated rule, named by field
pub fn validate_fields(fields: &RpApplicationFields) -> Result<(), AppError> {
    if !is_valid_nickname(&fields.nickname) {
        return Err(invalid(
            "nickname must be 3-16 characters of letters, digits or underscore",
        ));
    }

    let required = [
        ("birthDate", &fields.birth_date),
        ("race", &fields.race),
        ("gender", &fields.gender),
        ("skills", &fields.skills),
        ("plan", &fields.plan),
        ("biography", &fields.biography),
        ("skinUrl", &fields.skin_url),
    ];
    for (name, value) in required {
        if value.is_empty() {
            return Err(invalid(format!("{} is required", name)));
        }
    }

    let limited = [
        &fields.source,
        &fields.rp_name,
        &fields.race,
        &fields.gender,
        &fields.skills,
        &fields.plan,
        &fields.biography,
    ];
    for ((name, limit), value) in FIELD_LIMITS.iter().zip(limited) {
        if value.len() > *limit {
            return Err(invalid(format!("{} is too long", name)));
        }
    }

    if NaiveDate::parse_from_str(&fields.birth_date, "%Y-%m-%d").is_err() {
        return Err(invalid("birthDate must be a date in YYYY-MM-DD format"));
    }

    if count_sentence_marks(&fields.biography) < BIOGRAPHY_MIN_SENTENCE_MARKS {
        return Err(invalid("biography must contain at least 5 sentences"));
    }

    validate_skin_url(&fields.skin_url)
}

/// `^[A-Za-z0-9_]{3,16}$`
pub fn is_valid_nickname(nickname: &str) -> bool {
    (NICKNAME_MIN..=NICKNAME_MAX).contains(&nickname.len())
        && nickname
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn count_sentence_marks(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count()
}

/// Accepts only public `https` image URLs.
pub fn validate_skin_url(raw: &str) -> Result<(), AppError> {
    if raw.len() > SKIN_URL_MAX {
        return Err(invalid("skinUrl is too long"));
    }

    let url = Url::parse(raw).map_err(|_| invalid("skinUrl must be a valid URL"))?;
    if url.scheme() != "https" {
        return Err(invalid("skinUrl must use https"));
    }

    match url.host() {
        None => return Err(invalid("skinUrl must have a host")),
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            if domain.is_empty()
                || domain == "localhost"
                || domain.ends_with(".localhost")
                || domain.contains("..")
            {
                return Err(invalid("skinUrl host is not allowed"));
            }
        }
        Some(Host::Ipv4(ip)) => {
            if !is_public_ip(IpAddr::V4(ip)) {
                return Err(invalid("skinUrl host is not allowed"));
            }
        }
        Some(Host::Ipv6(ip)) => {
            if !is_public_ip(IpAddr::V6(ip)) {
                return Err(invalid("skinUrl host is not allowed"));
            }
        }
    }

    let path = url.path().to_ascii_lowercase();
    if !SKIN_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return Err(invalid("skinUrl must point to a png, jpg, jpeg or webp image"));
    }

    Ok(())
}

fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ip) => is_public_ipv4(ip),
        IpAddr::V6(ip) => match ip.to_ipv4_mapped() {
            Some(mapped) => is_public_ipv4(mapped),
            None => is_public_ipv6(ip),
        },
    }
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_multicast()
        || ip.is_broadcast()
        || ip.is_documentation())
}

fn is_public_ipv6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    let unique_local = (first & 0xfe00) == 0xfc00;
    let link_local = (first & 0xffc0) == 0xfe80;
    let documentation = first == 0x2001 && ip.segments()[1] == 0x0db8;

    !(ip.is_loopback()
        || ip.is_unspecified()
        || ip.is_multicast()
        || unique_local
        || link_local
        || documentation)
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::Validation(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> RpApplicationFields {
        RpApplicationFields {
            nickname: "Steve_99".to_string(),
            source: "A friend told me.".to_string(),
            rp_name: "Aldric Stone".to_string(),
            birth_date: "1990-04-12".to_string(),
            race: "Human".to_string(),
            gender: "Male".to_string(),
            skills: "Smithing and trade.".to_string(),
            plan: "Open a forge in the capital.".to_string(),
            biography: "Born in the north. Raised by smiths. Trained for years. Travelled south! Settled at last."
                .to_string(),
            skin_url: "https://cdn.example.com/skin.png".to_string(),
        }
    }

    #[test]
    fn accepts_valid_fields() {
        assert!(validate_fields(&valid_fields()).is_ok());
    }

    #[test]
    fn rejects_short_nickname() {
        let fields = RpApplicationFields {
            nickname: "ab".to_string(),
            ..valid_fields()
        };

        assert!(matches!(
            validate_fields(&fields),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn checks_nickname_charset_and_length() {
        assert!(is_valid_nickname("abc"));
        assert!(is_valid_nickname("Sixteen_Chars_16"));
        assert!(!is_valid_nickname("Seventeen_Chars17"));
        assert!(!is_valid_nickname("bad-name"));
        assert!(!is_valid_nickname("Stéve"));
    }

    #[test]
    fn rejects_missing_required_field() {
        let fields = RpApplicationFields {
            race: String::new(),
            ..valid_fields()
        };

        let Err(AppError::Validation(message)) = validate_fields(&fields) else {
            panic!("expected validation error");
        };
        assert_eq!(message, "race is required");
    }

    #[test]
    fn allows_empty_optional_fields() {
        let fields = RpApplicationFields {
            source: String::new(),
            rp_name: String::new(),
            ..valid_fields()
        };

        assert!(validate_fields(&fields).is_ok());
    }

    #[test]
    fn rejects_overlong_field() {
        let fields = RpApplicationFields {
            gender: "x".repeat(81),
            ..valid_fields()
        };

        let Err(AppError::Validation(message)) = validate_fields(&fields) else {
            panic!("expected validation error");
        };
        assert_eq!(message, "gender is too long");
    }

    #[test]
    fn rejects_malformed_birth_date() {
        for birth_date in ["12.04.1990", "1990-13-01", "yesterday"] {
            let fields = RpApplicationFields {
                birth_date: birth_date.to_string(),
                ..valid_fields()
            };

            assert!(validate_fields(&fields).is_err(), "{}", birth_date);
        }
    }

    #[test]
    fn requires_five_sentence_marks_in_biography() {
        let fields = RpApplicationFields {
            biography: "One. Two. Three. Four.".to_string(),
            ..valid_fields()
        };

        assert!(validate_fields(&fields).is_err());
    }

    #[test]
    fn accepts_public_https_images() {
        for url in [
            "https://cdn.example.com/skin.png",
            "https://cdn.example.com/path/Skin.JPEG",
            "https://93.184.216.34/skin.webp",
        ] {
            assert!(validate_skin_url(url).is_ok(), "{}", url);
        }
    }

    #[test]
    fn rejects_unsafe_skin_urls() {
        for url in [
            "http://example.com/a.png",
            "https://169.254.169.254/a.png",
            "https://localhost/a.png",
            "https://skins.localhost/a.png",
            "https://10.0.0.5/a.png",
            "https://127.0.0.1/a.png",
            "https://192.168.1.1/a.png",
            "https://0.0.0.0/a.png",
            "https://255.255.255.255/a.png",
            "https://192.0.2.10/a.png",
            "https://[::1]/a.png",
            "https://[fd00::1]/a.png",
            "https://[fe80::1]/a.png",
            "https://cdn.example.com/skin.gif",
            "https://cdn.example.com/skin.png/",
            "not a url",
        ] {
            assert!(validate_skin_url(url).is_err(), "{}", url);
        }
    }

    #[test]
    fn rejects_overlong_skin_url() {
        let url = format!("https://cdn.example.com/{}.png", "a".repeat(300));

        assert!(validate_skin_url(&url).is_err());
    }
}
