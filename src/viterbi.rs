//! Part-of-speech disambiguation over a vertex path.
//!
//! Each vertex offers a few candidate natures. The tagger picks one per vertex
//! so that the summed cost of nature-to-nature transitions and of emitting each
//! word with its nature is minimal.
//!
//! ```text
//! cost(v_i = t) = min_{t'} [cost(v_{i-1} = t') + trans(t', t)] - ln((freq(v_i, t) + 1e-8) / total(t))
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, SegmentError};
use crate::vertex::Vertex;

/// Smoothing added to counts before taking logarithms
const SMOOTHING: f64 = 1e-8;

/// Nature-to-nature transition costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    /// State labels (natures), in matrix order
    states: Vec<String>,
    /// Raw transition counts, `counts[from][to]`
    counts: Vec<Vec<u64>>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    costs: Vec<Vec<f64>>,
    #[serde(skip)]
    totals: Vec<f64>,
}

impl TransitionMatrix {
    /// Build a matrix from state labels and a square table of transition counts.
    ///
    /// Returns `None` if the table is not `states.len()` x `states.len()`.
    pub fn from_counts(states: Vec<String>, counts: Vec<Vec<u64>>) -> Option<Self> {
        let n = states.len();
        if counts.len() != n || counts.iter().any(|row| row.len() != n) {
            return None;
        }
        let mut matrix = TransitionMatrix {
            states,
            counts,
            index: HashMap::new(),
            costs: Vec::new(),
            totals: Vec::new(),
        };
        matrix.rebuild();
        Some(matrix)
    }

    /// Parse a matrix from JSON of the form `{"states": [..], "counts": [[..], ..]}`
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: TransitionMatrix =
            serde_json::from_str(json).map_err(|e| SegmentError::Dictionary {
                line: e.line(),
                message: e.to_string(),
            })?;
        TransitionMatrix::from_counts(raw.states, raw.counts).ok_or(SegmentError::Dictionary {
            line: 0,
            message: "transition counts must form a square table over the states".to_string(),
        })
    }

    /// Recompute derived tables from states and counts
    fn rebuild(&mut self) {
        let n = self.states.len();
        self.index = self
            .states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();

        // A state's total frequency counts every transition into or out of it
        self.totals = (0..n)
            .map(|i| {
                let out: u64 = self.counts[i].iter().sum();
                let into: u64 = self.counts.iter().map(|row| row[i]).sum();
                (out + into) as f64
            })
            .collect();

        self.costs = self
            .counts
            .iter()
            .map(|row| {
                let row_total: u64 = row.iter().sum();
                row.iter()
                    .map(|&c| {
                        if row_total == 0 {
                            -SMOOTHING.ln()
                        } else {
                            -((c as f64 + SMOOTHING) / row_total as f64).ln()
                        }
                    })
                    .collect()
            })
            .collect();
    }

    /// Number of states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if the matrix has no states
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Index of a nature, if known
    pub fn state(&self, nature: &str) -> Option<usize> {
        self.index.get(nature).copied()
    }

    /// Cost of moving from `from` to `to`; unknown natures get the maximal cost
    pub fn transition_cost(&self, from: &str, to: &str) -> f64 {
        match (self.state(from), self.state(to)) {
            (Some(i), Some(j)) => self.costs[i][j],
            _ => -SMOOTHING.ln(),
        }
    }

    /// Total frequency of a nature (at least 1, so it is always a valid divisor)
    pub fn total_frequency(&self, nature: &str) -> f64 {
        self.state(nature)
            .map(|i| self.totals[i])
            .unwrap_or(0.0)
            .max(1.0)
    }
}

/// Resolves one nature per vertex
pub trait PosTagger: Send + Sync {
    /// Confirm a nature on every vertex after `vertices[0]`, which is the start
    /// vertex and keeps its own nature
    fn compute(&self, vertices: &mut [Vertex], matrix: &TransitionMatrix);
}

/// Minimum-cost path search with backpointers
#[derive(Debug, Clone, Copy, Default)]
pub struct ViterbiPosTagger;

impl ViterbiPosTagger {
    fn emission_cost(frequency: u32, nature: &str, matrix: &TransitionMatrix) -> f64 {
        -((frequency as f64 + SMOOTHING) / matrix.total_frequency(nature)).ln()
    }
}

impl PosTagger for ViterbiPosTagger {
    fn compute(&self, vertices: &mut [Vertex], matrix: &TransitionMatrix) {
        if vertices.len() < 2 {
            return;
        }

        let start = vertices[0].guess_nature().unwrap_or_default().to_string();

        // cost[k] for each candidate k of the previous vertex
        let mut prev_natures: Vec<String> = vec![start];
        let mut prev_costs: Vec<f64> = vec![0.0];
        // backptr[i][k] = best candidate index of vertex i for candidate k of vertex i + 1
        let mut backptr: Vec<Vec<usize>> = Vec::with_capacity(vertices.len());

        for vertex in vertices.iter().skip(1) {
            let natures: Vec<String> = vertex.attribute.natures.clone();
            let mut costs = Vec::with_capacity(natures.len());
            let mut pointers = Vec::with_capacity(natures.len());

            for (nature, freq) in vertex.attribute.iter() {
                let emission = Self::emission_cost(freq, nature, matrix);
                let (best_prev, best_cost) = prev_natures
                    .iter()
                    .zip(prev_costs.iter())
                    .enumerate()
                    .map(|(j, (p, c))| (j, c + matrix.transition_cost(p, nature)))
                    .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best });
                costs.push(best_cost + emission);
                pointers.push(best_prev);
            }

            backptr.push(pointers);
            prev_natures = natures;
            prev_costs = costs;
        }

        // Backtrack from the cheapest final candidate
        let mut k = prev_costs
            .iter()
            .enumerate()
            .fold((0, f64::INFINITY), |best, (i, &c)| if c < best.1 { (i, c) } else { best })
            .0;
        for i in (1..vertices.len()).rev() {
            let nature = vertices[i].attribute.natures.get(k).cloned();
            if let Some(nature) = nature {
                trace!(word = %vertices[i].word, nature = %nature, "resolved nature");
                vertices[i].confirm_nature(&nature);
            }
            k = backptr[i - 1].get(k).copied().unwrap_or(0);
        }
    }
}
