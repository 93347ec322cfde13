//! The motivational quote sent when no watched page changed.
use crate::traits::LlmClient;
use jobwatch_common::Result;

pub const QUOTE_SYSTEM_PROMPT: &str = "You are an assistant that provides inspiring and thoughtful quotes for people searching for jobs in the field of AI in the OpenAI Company.";

pub const QUOTE_TEMPERATURE: f32 = 0.7;

/// User prompt asking for the quote of the day for the given locations.
///
/// The parsed terms are re-joined with `", "`, so the prompt reads the same
/// however `SEARCH_TERMS` was spaced. For the default `Germany, Munich` this
/// is identical to the raw setting.
pub fn quote_prompt(search_terms: &[String]) -> String {
    format!(
        "Can you give me the quote of the day to help me keep motivated while waiting for a new job location opening in: {}?",
        search_terms.join(", ")
    )
}

/// Ask `llm` for a quote of the day. The generated text is returned as-is.
pub async fn quote_of_the_day(llm: &dyn LlmClient, search_terms: &[String]) -> Result<String> {
    let prompt = quote_prompt(search_terms);
    let response = llm
        .generate(
            &prompt,
            Some(QUOTE_SYSTEM_PROMPT),
            None,
            Some(QUOTE_TEMPERATURE),
        )
        .await?;
    tracing::debug!(model = ?response.model, chars = response.text.len(), "quote.generated");
    Ok(response.text)
}
