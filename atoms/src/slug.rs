use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Canonicalize a user-supplied name into a slug: trim, lowercase, internal
/// spaces become hyphens. Empty input yields an empty slug, which callers
/// treat as "no grouping key".
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Object key for a single standalone upload: slug plus a unix-second suffix
/// and a sequence index. Two calls in the same second with the same slug and
/// sequence produce the same key; that collision window is a known limitation.
///
/// Keys are flat (no `/`) so they can be recovered from a locator URL.
pub fn object_key(slug: &str, sequence: usize, now: DateTime<Utc>) -> String {
    if slug.is_empty() {
        format!("{}-{}", now.timestamp(), sequence)
    } else {
        format!("{}-{}-{}", slug, now.timestamp(), sequence)
    }
}

/// Per-item key for a multi-image gallery saga: event slug, event date, item
/// index, and a fresh uuid suffix so keys never collide across the items of
/// one saga (or across client retries of a failed saga).
pub fn event_image_key(slug: &str, date: DateTime<Utc>, index: usize) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    if slug.is_empty() {
        format!("{}-{}-{}", date.timestamp(), index, suffix)
    } else {
        format!("{}-{}-{}-{}", slug, date.timestamp(), index, suffix)
    }
}

/// Recover the flat object key from a locator URL.
pub fn key_from_locator(locator: &str) -> &str {
    locator.rsplit('/').next().unwrap_or(locator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn normalize_trims_lowercases_and_hyphenates() {
        assert_eq!(normalize("  São Carlos  "), "são-carlos");
        assert_eq!(normalize("são carlos"), "são-carlos");
        assert_eq!(normalize("Hello   World"), "hello-world");
    }

    #[test]
    fn normalize_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(normalize("  São Carlos  "), normalize("são carlos"));
        }
    }

    #[test]
    fn normalize_empty_yields_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn object_key_includes_slug_timestamp_and_sequence() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(object_key("picnic", 0, now), format!("picnic-{}-0", now.timestamp()));
        assert_eq!(object_key("", 2, now), format!("{}-2", now.timestamp()));
    }

    #[test]
    fn event_image_keys_are_unique_per_call() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let a = event_image_key("meetup", date, 0);
        let b = event_image_key("meetup", date, 0);
        assert_ne!(a, b);
        assert!(a.starts_with("meetup-"));
        assert!(!a.contains('/'));
    }

    #[test]
    fn key_round_trips_through_locator() {
        let key = "picnic-1714564800-0";
        let locator = format!("https://media.example.com/{}", key);
        assert_eq!(key_from_locator(&locator), key);
    }
}
