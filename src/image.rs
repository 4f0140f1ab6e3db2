/// Image format used when the caller does not ask for one.
pub const DEFAULT_IMAGE_FORMAT: &str = "jpg";

/// A templated artwork URL as served in the storefront's JSON payloads,
/// e.g. `https://is1-ssl.mzstatic.com/image/thumb/.../{w}x{h}bb.{f}`.
#[derive(Debug, Clone, Copy)]
pub struct ImageTemplate<'a> {
    pub url: &'a str,
    pub width: u32,
    pub height: u32,
    pub format: Option<&'a str>,
}

impl<'a> ImageTemplate<'a> {
    pub fn new(url: &'a str, width: u32, height: u32) -> Self {
        Self {
            url,
            width,
            height,
            format: None,
        }
    }

    pub fn with_format(mut self, format: &'a str) -> Self {
        self.format = Some(format);
        self
    }

    /// Substitute `{w}`, `{h}` and `{f}`, in that order.
    pub fn render(&self) -> String {
        self.url
            .replace("{w}", &self.width.to_string())
            .replace("{h}", &self.height.to_string())
            .replace("{f}", self.format.unwrap_or(DEFAULT_IMAGE_FORMAT))
    }
}

/// Shorthand for [`ImageTemplate::render`] with an optional format override.
pub fn make_image(url: &str, width: u32, height: u32, format: Option<&str>) -> String {
    let template = ImageTemplate::new(url, width, height);
    match format {
        Some(format) => template.with_format(format).render(),
        None => template.render(),
    }
}
