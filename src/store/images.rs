//! Image URL substitution table.
//!
//! Some photo ids in the article data point at images that no longer resolve.
//! Any URL containing one of the known-bad ids is swapped for a verified
//! replacement; anything else is kept if it passes validation.

use crate::util::validate_image_url;

/// Shown when an article has no image or its URL is refused.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=800&h=400&fit=crop";

/// `(photo id fragment, replacement URL)`, checked in order.
const IMAGE_SUBSTITUTIONS: &[(&str, &str)] = &[
    // Technology
    (
        "photo-1677442d019cecf4d0f6f25f57b8b9a1",
        "https://images.unsplash.com/photo-1531482615713-2afd69097998?w=800&h=400&fit=crop",
    ),
    (
        "photo-1517694712202-14dd9538aa97",
        "https://images.unsplash.com/photo-1519389950473-47ba0277781c?w=800&h=400&fit=crop",
    ),
    // National / government
    (
        "photo-1427504494785-cdbbdb55db6b",
        "https://images.unsplash.com/photo-1524995997946-a1c2e315a42f?w=800&h=400&fit=crop",
    ),
    // International
    (
        "photo-1532996122724-8f3c2cd83c5d",
        "https://images.unsplash.com/photo-1571019614242-c5c5dee9f50b?w=800&h=400&fit=crop",
    ),
    // Sports
    (
        "photo-1518611505868-d7984d57e6ca",
        "https://images.unsplash.com/photo-1461896836934-ffe607ba8211?w=800&h=400&fit=crop",
    ),
    // Business
    (
        "photo-1552664730-d307ca884978",
        "https://images.unsplash.com/photo-1552664730-d307ca884978?w=800&h=400&fit=crop",
    ),
    // Cybersecurity
    (
        "photo-1576091160399-112ba8d25d1d",
        "https://images.unsplash.com/photo-1550355291-bbee04a92027?w=800&h=400&fit=crop",
    ),
    // Environment
    (
        "photo-1581092163562-40038e57e0bb",
        "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&h=400&fit=crop",
    ),
    // Finance
    (
        "photo-1611974789855-9c2a0a7236a3",
        "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=800&h=400&fit=crop",
    ),
    // Arts / culture
    (
        "photo-1514525253161-7a46d19cd819",
        "https://images.unsplash.com/photo-1514525253161-7a46d19cd819?w=800&h=400&fit=crop",
    ),
];

/// Resolve the image URL an article should display.
///
/// - missing or blank → [`PLACEHOLDER_IMAGE`]
/// - contains a known photo id → that id's replacement
/// - otherwise the URL itself, if [`validate_image_url`] accepts it, else the
///   placeholder
pub fn resolve_image_url(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return PLACEHOLDER_IMAGE.to_string();
    };

    if let Some((_, replacement)) = IMAGE_SUBSTITUTIONS
        .iter()
        .find(|(fragment, _)| raw.contains(fragment))
    {
        return (*replacement).to_string();
    }

    match validate_image_url(raw) {
        Ok(_) => raw.to_string(),
        Err(e) => {
            tracing::warn!(url = %raw, error = %e, "Rejected article image URL, using placeholder");
            PLACEHOLDER_IMAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_image_uses_placeholder() {
        assert_eq!(resolve_image_url(None), PLACEHOLDER_IMAGE);
        assert_eq!(resolve_image_url(Some("")), PLACEHOLDER_IMAGE);
        assert_eq!(resolve_image_url(Some("   ")), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_known_photo_id_is_substituted() {
        let raw = "https://images.unsplash.com/photo-1576091160399-112ba8d25d1d?w=800&h=400&fit=crop";
        assert_eq!(
            resolve_image_url(Some(raw)),
            "https://images.unsplash.com/photo-1550355291-bbee04a92027?w=800&h=400&fit=crop"
        );
    }

    #[test]
    fn test_substitution_matches_fragment_anywhere() {
        let raw = "https://mirror.example.com/img/photo-1518611505868-d7984d57e6ca.jpg";
        assert_eq!(
            resolve_image_url(Some(raw)),
            "https://images.unsplash.com/photo-1461896836934-ffe607ba8211?w=800&h=400&fit=crop"
        );
    }

    #[test]
    fn test_unknown_valid_url_kept() {
        let raw = "https://images.unsplash.com/photo-1461896836934-ffe607ba8211?w=800&h=400&fit=crop";
        assert_eq!(resolve_image_url(Some(raw)), raw);
    }

    #[test]
    fn test_invalid_url_replaced() {
        assert_eq!(resolve_image_url(Some("file:///etc/passwd")), PLACEHOLDER_IMAGE);
        assert_eq!(resolve_image_url(Some("http://10.0.0.5/x.png")), PLACEHOLDER_IMAGE);
        assert_eq!(resolve_image_url(Some("not a url")), PLACEHOLDER_IMAGE);
    }
}
