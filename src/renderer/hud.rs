//! DOM score text

use web_sys::Document;

use crate::platform::ScoreDisplay;
use crate::settings::Settings;

/// Writes the score into `#score`
pub struct DomScore {
    document: Document,
    settings: Settings,
}

impl DomScore {
    pub fn new(document: Document, settings: &Settings) -> Self {
        Self {
            document,
            settings: settings.clone(),
        }
    }
}

impl ScoreDisplay for DomScore {
    fn show_score(&mut self, score: u32) {
        if let Some(el) = self.document.get_element_by_id("score") {
            el.set_text_content(Some(&self.settings.format_score(score)));
        }
    }
}
