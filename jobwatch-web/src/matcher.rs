/// Terms a page has to mention to count as an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    pub main_term: Option<String>,
    pub search_terms: Vec<String>,
}

impl MatchCriteria {
    pub fn new(main_term: Option<String>, search_terms: Vec<String>) -> Self {
        Self {
            main_term,
            search_terms,
        }
    }

    /// True when `text` contains the main term and at least one search term.
    ///
    /// Containment is case-sensitive and literal. Without a main term nothing
    /// matches.
    ///
    /// ```
    /// use jobwatch_web::MatchCriteria;
    ///
    /// let criteria = MatchCriteria::new(Some("OpenAI".into()), vec!["Munich".into()]);
    /// assert!(criteria.matches("OpenAI is hiring in Munich now"));
    /// assert!(!criteria.matches("openai is hiring in munich now"));
    /// ```
    pub fn matches(&self, text: &str) -> bool {
        let Some(main) = self.main_term.as_deref() else {
            return false;
        };
        text.contains(main) && self.search_terms.iter().any(|t| text.contains(t.as_str()))
    }

    /// The main term, or an empty string when it is not configured.
    pub fn main_term_label(&self) -> &str {
        self.main_term.as_deref().unwrap_or("")
    }

    /// Main term followed by the search terms, comma separated.
    pub fn display(&self) -> String {
        self.main_term
            .iter()
            .chain(self.search_terms.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
