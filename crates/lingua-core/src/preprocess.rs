use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default input cleanup: NFC, outer whitespace trimmed, inner lines kept
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        text.nfc().collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
