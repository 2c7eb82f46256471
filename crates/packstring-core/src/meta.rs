//! Page SEO metadata

/// Canonical base URL for the public site.
pub const SITE_URL: &str = "https://mthuntfish.com";

/// Metadata rendered in the `<head>` of every page.
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    /// Feeds `<title>` and og:title
    pub title: String,
    /// Feeds the meta description and og:description
    pub description: String,
    /// Absolute URL
    pub canonical_url: String,
    /// Absolute URL to the OG image
    pub og_image: String,
}

impl PageMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_canonical(mut self, path: &str) -> Self {
        self.canonical_url = format!("{}{}", SITE_URL, path);
        self
    }

    pub fn with_og_image(mut self, url: impl Into<String>) -> Self {
        self.og_image = url.into();
        self
    }
}
