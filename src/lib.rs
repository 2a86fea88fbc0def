//! # crf-segment
//!
//! Word segmentation for Chinese text driven by a character boundary tagger.
//!
//! Input characters are split into atoms (digit runs, Latin-letter runs or
//! single characters), a [`Tagger`] labels each atom `B`/`M`/`E`/`S`, and the
//! labels are decoded back into words. Two optional refinements follow:
//! part-of-speech disambiguation over a [`TransitionMatrix`], and merging of
//! words through a user dictionary.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use crf_segment::{CoreDictionary, CrfSegmenter, LongestMatchTagger, SegmentConfig};
//!
//! let dict = CoreDictionary::from_text("峰会 n 10\n杭州 ns 8").unwrap();
//! let segmenter = CrfSegmenter::new(Arc::new(LongestMatchTagger::new(dict)));
//!
//! let config = SegmentConfig::new().with_offset_tracking(true);
//! let terms = segmenter.seg("G20峰会在杭州", &config).unwrap();
//!
//! let words: Vec<&str> = terms.iter().map(|t| t.word.as_str()).collect();
//! assert_eq!(words, vec!["G", "20", "峰会", "在", "杭州"]);
//! ```
//!
//! ## Plugging in a model
//!
//! A statistical model only has to implement [`Tagger`]. Models loaded from
//! disk are shared through a [`ModelPool`], which loads each path once:
//!
//! ```rust,no_run
//! use crf_segment::{CrfSegmenter, DictionaryModelLoader, ModelPool};
//!
//! let segmenter = CrfSegmenter::load("data/dictionary.txt", &DictionaryModelLoader, ModelPool::global())?;
//! # Ok::<(), crf_segment::SegmentError>(())
//! ```

pub mod atom;
pub mod char_class;
pub mod config;
pub mod custom_dictionary;
pub mod decoder;
pub mod dictionary;
pub mod error;
pub mod model;
pub mod segmenter;
pub mod table;
pub mod tagger;
pub mod term;
pub mod vertex;
pub mod viterbi;

// Re-export main types for convenience
pub use atom::{atomize, atomize_to_table, Atom, AtomClass};
pub use char_class::{get_char_class, CharClass, CharNormalizer, CharTable};
pub use config::SegmentConfig;
pub use custom_dictionary::{CustomDictionary, UserDictionary};
pub use decoder::decode;
pub use dictionary::{Attribute, CoreDictionary, Dictionary};
pub use error::{Result, SegmentError};
pub use model::{DictionaryModelLoader, ModelLoader, ModelPool};
pub use segmenter::CrfSegmenter;
pub use table::{BoundaryTag, Row, Table};
pub use tagger::{LongestMatchTagger, Tagger};
pub use term::Term;
pub use vertex::Vertex;
pub use viterbi::{PosTagger, TransitionMatrix, ViterbiPosTagger};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_full_pipeline() {
        let core = CoreDictionary::from_text("峰会 n 120\n杭州 ns 80\n召开 v 60\n在 p 500").unwrap();
        let user = CoreDictionary::from_text("G20峰会 nz 5").unwrap();
        let matrix = TransitionMatrix::from_counts(
            vec!["begin".into(), "n".into(), "ns".into(), "nz".into(), "p".into(), "v".into()],
            vec![
                vec![0, 30, 10, 20, 30, 10],
                vec![0, 10, 5, 5, 40, 40],
                vec![0, 10, 5, 5, 10, 70],
                vec![0, 40, 5, 20, 20, 15],
                vec![0, 20, 60, 10, 0, 10],
                vec![0, 50, 10, 10, 20, 10],
            ],
        )
        .unwrap();

        let segmenter = CrfSegmenter::new(Arc::new(LongestMatchTagger::new(core.clone())))
            .with_dictionary(Arc::new(core))
            .with_transition_matrix(Arc::new(matrix))
            .with_custom_dictionary(Arc::new(UserDictionary::new(user)));

        let config = SegmentConfig::new()
            .with_part_of_speech_tagging(true)
            .with_custom_dictionary(true)
            .with_offset_tracking(true);
        let terms = segmenter.seg("G20峰会在杭州召开", &config).unwrap();

        let words: Vec<&str> = terms.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, vec!["G20峰会", "在", "杭州", "召开"]);
        assert_eq!(terms[0].nature.as_deref(), Some("nz"));
        assert_eq!(terms[3].offset, Some(8));
        assert!(terms.iter().all(|t| t.nature.is_some()));
    }
}
