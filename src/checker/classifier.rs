//! Indexation classifier
//!
//! Decides from a search results page whether the queried site has any
//! organic result. The marker is the markup the search engine uses for one
//! organic result, so this module is coupled to the engine's current HTML and
//! has to follow it when that markup changes.

use scraper::{Html, Selector};

/// CSS signature of one organic search result
pub const ORGANIC_RESULT_SELECTOR: &str = "div.tF2Cxc";

/// Verdict reached from a successful search response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Indexed,
    NotIndexed,
}

/// Counts organic-result markers in a search response body
#[derive(Debug, Clone)]
pub struct Classifier {
    selector: Selector,
}

impl Classifier {
    /// Classifier using the default organic-result marker
    pub fn new() -> Self {
        Self {
            selector: default_selector(),
        }
    }

    /// Classifier using a custom CSS selector as the marker
    ///
    /// # Returns
    ///
    /// * `Ok(Classifier)` - The selector parsed
    /// * `Err(String)` - The selector is not valid CSS
    pub fn with_selector(selector: &str) -> Result<Self, String> {
        let selector = Selector::parse(selector)
            .map_err(|e| format!("invalid selector '{}': {:?}", selector, e))?;
        Ok(Self { selector })
    }

    /// Number of marker elements in `body`
    pub fn count_markers(&self, body: &str) -> usize {
        let document = Html::parse_document(body);
        document.select(&self.selector).count()
    }

    /// Indexed iff the body holds at least one marker
    pub fn classify(&self, body: &str) -> Verdict {
        if self.count_markers(body) > 0 {
            Verdict::Indexed
        } else {
            Verdict::NotIndexed
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn default_selector() -> Selector {
    match Selector::parse(ORGANIC_RESULT_SELECTOR) {
        Ok(selector) => selector,
        Err(e) => unreachable!("built-in selector must parse: {:?}", e),
    }
}

/// Classifies `body` with the default marker
///
/// # Example
///
/// ```
/// use index_sentinel::checker::{classify, Verdict};
///
/// let body = r#"<div class="g"><div class="tF2Cxc">result</div></div>"#;
/// assert_eq!(classify(body), Verdict::Indexed);
/// assert_eq!(classify("<html><body>nothing</body></html>"), Verdict::NotIndexed);
/// ```
pub fn classify(body: &str) -> Verdict {
    Classifier::new().classify(body)
}
