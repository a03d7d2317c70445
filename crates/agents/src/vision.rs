//! Image references in chat messages: extraction, captioning and multimodal parts.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use retail_agents_llm::{ChatModel, ContentPart, LlmError};

/// Instruction sent with every image to be captioned.
pub const CAPTION_INSTRUCTION: &str =
    "Describe the image in detail regarding the customer service for product or package return";

/// `<img URL>` tags written by agents and customers.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static IMG_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<img\s+([^>\s]+)\s*>").unwrap());

/// Bare links to common image formats.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static IMAGE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"')]+\.(?:png|jpe?g|gif|webp|bmp)(?:\?[^\s<>"')]*)?"#).unwrap()
});

/// Image URLs referenced by `text`, in order of first appearance, without duplicates.
#[must_use]
pub fn extract_image_urls(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = IMG_TAG_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| (m.start(), m.as_str().to_owned()))
        .chain(IMAGE_URL_REGEX.find_iter(text).map(|m| (m.start(), m.as_str().to_owned())))
        .collect();
    found.sort_by_key(|(start, _)| *start);

    let mut urls: Vec<String> = Vec::with_capacity(found.len());
    for (_, url) in found {
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

/// Text followed by one image part per URL, for multimodal agents.
#[must_use]
pub fn image_parts(text: &str, urls: &[String]) -> Vec<ContentPart> {
    std::iter::once(ContentPart::text(text))
        .chain(urls.iter().map(ContentPart::image))
        .collect()
}

/// Captions images once per conversation and annotates message text with them.
#[derive(Debug, Default)]
pub struct ImageCaptioner {
    captions: HashMap<String, String>,
}

impl ImageCaptioner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caption for `url`, asking the model only the first time.
    ///
    /// # Errors
    /// Returns an error if the model call fails.
    pub async fn caption(&mut self, model: &dyn ChatModel, url: &str) -> Result<String, LlmError> {
        if let Some(caption) = self.captions.get(url) {
            return Ok(caption.clone());
        }
        tracing::debug!(url, "captioning image");
        let caption = model.describe_image(url, CAPTION_INSTRUCTION).await?;
        self.captions.insert(url.to_owned(), caption.clone());
        Ok(caption)
    }

    /// `text` with a caption line appended for each referenced image.
    ///
    /// # Errors
    /// Returns an error if any caption request fails.
    pub async fn annotate(
        &mut self,
        model: &dyn ChatModel,
        text: &str,
        urls: &[String],
    ) -> Result<String, LlmError> {
        let mut annotated = text.to_owned();
        for url in urls {
            let caption = self.caption(model, url).await?;
            annotated.push_str(&format!(
                "\n<img {url}> in case you can not see, the caption of this image is: {caption}"
            ));
        }
        Ok(annotated)
    }
}
