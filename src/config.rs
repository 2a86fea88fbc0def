//! Per-call segmentation options.

use serde::{Deserialize, Serialize};

/// Which refinement stages run after boundary decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentConfig {
    /// Resolve a part of speech for every word
    pub part_of_speech_tagging: bool,
    /// Merge words using the user dictionary
    pub use_custom_dictionary: bool,
    /// Record each word's character offset
    pub offset_tracking: bool,
}

impl SegmentConfig {
    /// All refinements off
    pub fn new() -> Self {
        SegmentConfig::default()
    }

    /// Turn part-of-speech tagging on or off
    pub fn with_part_of_speech_tagging(mut self, enable: bool) -> Self {
        self.part_of_speech_tagging = enable;
        self
    }

    /// Turn the user dictionary override on or off
    pub fn with_custom_dictionary(mut self, enable: bool) -> Self {
        self.use_custom_dictionary = enable;
        self
    }

    /// Turn offset tracking on or off
    pub fn with_offset_tracking(mut self, enable: bool) -> Self {
        self.offset_tracking = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = SegmentConfig::new()
            .with_part_of_speech_tagging(true)
            .with_offset_tracking(true);
        assert!(config.part_of_speech_tagging);
        assert!(!config.use_custom_dictionary);
        assert!(config.offset_tracking);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let config: SegmentConfig =
            serde_json::from_str(r#"{"partOfSpeechTagging": true}"#).unwrap();
        assert_eq!(config, SegmentConfig::new().with_part_of_speech_tagging(true));
    }
}
