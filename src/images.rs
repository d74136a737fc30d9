//! Image URL handling shared by the card grid, the detail panel, and the
//! create/edit forms.

/// Shown when a product has no usable image URL.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x400?text=No+Image";

/// A usable image URL: absolute and parseable. Product lists from the
/// service routinely contain junk entries ("[]", bare filenames), which this
/// rejects.
pub fn is_valid_url(candidate: &str) -> bool {
    reqwest::Url::parse(candidate.trim()).is_ok()
}

/// First valid entry, or the placeholder when none qualifies.
pub fn first_valid_image(images: &[String]) -> &str {
    images
        .iter()
        .map(String::as_str)
        .find(|img| is_valid_url(img))
        .unwrap_or(PLACEHOLDER_IMAGE)
}

/// Parse a comma-separated image list from a form, dropping invalid entries.
/// An empty result falls back to a single placeholder so a submission never
/// fails on images alone.
pub fn parse_image_list(input: &str) -> Vec<String> {
    let urls: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty() && is_valid_url(url))
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        vec![PLACEHOLDER_IMAGE.to_string()]
    } else {
        urls
    }
}
