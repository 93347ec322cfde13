use jobwatch_config::ExtractionPolicy;
use scraper::{Html, Selector};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid tag selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
    #[error("extraction policy lists no tags")]
    NoTags,
}

/// Pull the visible text out of `html` according to `policy`.
///
/// `FullText` concatenates every text node of the document as-is.
/// `Tags` collects the text of each matching element in document order and
/// joins the elements with a single space.
pub fn extract_text(html: &str, policy: &ExtractionPolicy) -> Result<String, ExtractError> {
    let doc = Html::parse_document(html);
    match policy {
        ExtractionPolicy::FullText => Ok(doc.root_element().text().collect()),
        ExtractionPolicy::Tags(tags) => {
            if tags.is_empty() {
                return Err(ExtractError::NoTags);
            }
            let selector_src = tags.join(", ");
            let selector = Selector::parse(&selector_src).map_err(|e| ExtractError::Selector {
                selector: selector_src.clone(),
                reason: e.to_string(),
            })?;

            let parts: Vec<String> = doc
                .select(&selector)
                .map(|el| el.text().collect::<String>())
                .collect();
            Ok(parts.join(" "))
        }
    }
}
