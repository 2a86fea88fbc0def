//! The segmentation pipeline.
//!
//! ```text
//! chars -> normalize -> atomize -> Table -> Tagger -> decode -> Terms
//!       -> [POS refinement] -> [user dictionary override] -> Terms
//! ```
//!
//! Every call owns its intermediate state; the segmenter itself only holds
//! read-only collaborators, so one instance can serve many threads.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, debug_span};

use crate::atom::atomize_to_table;
use crate::char_class::{CharNormalizer, CharTable};
use crate::config::SegmentConfig;
use crate::custom_dictionary::{CustomDictionary, UserDictionary};
use crate::decoder::decode;
use crate::dictionary::{CoreDictionary, Dictionary};
use crate::error::{Result, SegmentError};
use crate::model::{ModelLoader, ModelPool};
use crate::table::Table;
use crate::tagger::Tagger;
use crate::term::Term;
use crate::vertex::{to_term_list, to_vertex_list};
use crate::viterbi::{PosTagger, TransitionMatrix, ViterbiPosTagger};

/// Word segmenter driven by a boundary tagger
#[derive(Clone)]
pub struct CrfSegmenter {
    tagger: Arc<dyn Tagger>,
    normalizer: Arc<dyn CharNormalizer>,
    dictionary: Arc<dyn Dictionary>,
    pos_tagger: Arc<dyn PosTagger>,
    transitions: Option<Arc<TransitionMatrix>>,
    custom_dictionary: Arc<dyn CustomDictionary>,
}

impl CrfSegmenter {
    /// Create a segmenter around a loaded tagger.
    ///
    /// Defaults: [`CharTable`] normalization, an empty core dictionary,
    /// [`ViterbiPosTagger`] without a transition matrix (so POS tagging is
    /// unavailable until one is set) and an empty user dictionary.
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        CrfSegmenter {
            tagger,
            normalizer: Arc::new(CharTable),
            dictionary: Arc::new(CoreDictionary::new()),
            pos_tagger: Arc::new(ViterbiPosTagger),
            transitions: None,
            custom_dictionary: Arc::new(UserDictionary::default()),
        }
    }

    /// Create a segmenter whose tagger is taken from `pool`, loading it from
    /// `path` with `loader` if the pool does not have it yet
    pub fn load(path: impl AsRef<Path>, loader: &dyn ModelLoader, pool: &ModelPool) -> Result<Self> {
        let tagger = pool.get_or_load(path.as_ref(), loader)?;
        Ok(CrfSegmenter::new(tagger))
    }

    /// Replace the character normalizer used before tagging
    pub fn with_normalizer(mut self, normalizer: Arc<dyn CharNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Replace the dictionary that supplies word attributes
    pub fn with_dictionary(mut self, dictionary: Arc<dyn Dictionary>) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Replace the part-of-speech tagger
    pub fn with_pos_tagger(mut self, pos_tagger: Arc<dyn PosTagger>) -> Self {
        self.pos_tagger = pos_tagger;
        self
    }

    /// Set the transition matrix, enabling part-of-speech tagging
    pub fn with_transition_matrix(mut self, matrix: Arc<TransitionMatrix>) -> Self {
        self.transitions = Some(matrix);
        self
    }

    /// Replace the user dictionary used by the override stage
    pub fn with_custom_dictionary(mut self, custom_dictionary: Arc<dyn CustomDictionary>) -> Self {
        self.custom_dictionary = custom_dictionary;
        self
    }

    /// Get the shared tagger (for building other segmenters over the same model)
    pub fn tagger(&self) -> Arc<dyn Tagger> {
        Arc::clone(&self.tagger)
    }

    /// Number/quantifier recognition is not available for tag-based segmentation
    pub fn enable_number_quantifier_recognize(&self, _enable: bool) -> Result<()> {
        Err(SegmentError::unsupported("number/quantifier recognition"))
    }

    /// Segment a string
    pub fn seg(&self, text: &str, config: &SegmentConfig) -> Result<Vec<Term>> {
        let chars: Vec<char> = text.chars().collect();
        self.segment(&chars, config)
    }

    /// Segment a character sequence into terms.
    ///
    /// The returned words concatenate back to `chars` exactly. Fails when
    /// `config` asks for a refinement this segmenter cannot perform, or when
    /// the normalizer does not preserve the input length.
    pub fn segment(&self, chars: &[char], config: &SegmentConfig) -> Result<Vec<Term>> {
        let transitions = match (config.part_of_speech_tagging, &self.transitions) {
            (true, None) => {
                return Err(SegmentError::unsupported(
                    "part-of-speech tagging without a transition matrix",
                ))
            }
            (true, Some(matrix)) => Some(matrix.as_ref()),
            (false, _) => None,
        };

        if chars.is_empty() {
            return Ok(Vec::new());
        }

        let normalized = self.normalizer.normalize(chars);
        if normalized.len() != chars.len() {
            return Err(SegmentError::Alignment {
                expected: chars.len(),
                actual: normalized.len(),
            });
        }

        let mut table = Table::from_atoms(atomize_to_table(&normalized));
        self.tagger.tag(&mut table);
        debug!("boundary tags:\n{}", table);

        let mut terms = decode(chars, &table);

        if let Some(matrix) = transitions {
            self.refine_part_of_speech(&mut terms, matrix);
        }

        if config.use_custom_dictionary {
            terms = self.combine_by_custom_dictionary(terms, config.offset_tracking);
        } else if config.offset_tracking {
            assign_offsets(&mut terms);
        }

        Ok(terms)
    }

    /// Resolve natures and copy them onto words that have none yet
    fn refine_part_of_speech(&self, terms: &mut [Term], matrix: &TransitionMatrix) {
        let _span = debug_span!("pos_refinement", words = terms.len()).entered();

        let mut vertices = to_vertex_list(terms, self.dictionary.as_ref(), true);
        self.pos_tagger.compute(&mut vertices, matrix);

        for (term, vertex) in terms.iter_mut().zip(vertices.iter().skip(1)) {
            if term.nature.is_none() {
                term.nature = vertex.guess_nature().map(String::from);
            }
        }
    }

    /// Merge words through the user dictionary and flatten the result
    fn combine_by_custom_dictionary(&self, terms: Vec<Term>, offset_enabled: bool) -> Vec<Term> {
        let _span = debug_span!("custom_dictionary", words = terms.len()).entered();

        let vertices = to_vertex_list(&terms, self.dictionary.as_ref(), false);
        let vertices = self.custom_dictionary.combine(vertices);
        to_term_list(vertices, offset_enabled)
    }
}

/// Set each term's offset to the total length of the terms before it
fn assign_offsets(terms: &mut [Term]) {
    let mut offset = 0;
    for term in terms {
        term.offset = Some(offset);
        offset += term.len();
    }
}
