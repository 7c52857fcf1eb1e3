use std::collections::HashMap;

use serde::Serialize;

use crate::classify::Classification;

/// All clone IDs seen for one gene in one run.
///
/// `clone_ids` keeps sighting order and duplicates; `clone_count` always equals
/// its length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneSummary {
    gene_name: String,
    clone_ids: Vec<String>,
    clone_count: usize,
}

impl GeneSummary {
    pub fn new(gene_name: impl Into<String>) -> Self {
        Self {
            gene_name: gene_name.into(),
            clone_ids: Vec::new(),
            clone_count: 0,
        }
    }

    pub fn push(&mut self, clone_id: impl Into<String>) {
        self.clone_ids.push(clone_id.into());
        self.clone_count += 1;
    }

    pub fn gene_name(&self) -> &str {
        &self.gene_name
    }

    pub fn clone_ids(&self) -> &[String] {
        &self.clone_ids
    }

    pub fn clone_count(&self) -> usize {
        self.clone_count
    }

    /// `gene_name` with its first `_` replaced by `-`.
    pub fn display_prefix(&self) -> String {
        self.gene_name.replacen('_', "-", 1)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateResult {
    genes: HashMap<String, GeneSummary>,
    invalid_count: usize,
}

impl AggregateResult {
    pub fn genes(&self) -> &HashMap<String, GeneSummary> {
        &self.genes
    }

    pub fn get(&self, gene_name: &str) -> Option<&GeneSummary> {
        self.genes.get(gene_name)
    }

    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_count
    }

    pub fn valid_read_count(&self) -> usize {
        self.genes.values().map(GeneSummary::clone_count).sum()
    }

    /// Summaries ordered by gene name. Map iteration order is never used for output.
    pub fn sorted_genes(&self) -> Vec<&GeneSummary> {
        let mut genes: Vec<_> = self.genes.values().collect();
        genes.sort_by(|a, b| a.gene_name.cmp(&b.gene_name));
        genes
    }
}

/// Sequential accumulator over a stream of classifications.
#[derive(Debug, Default)]
pub struct Aggregator {
    result: AggregateResult,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Valid(read) => {
                let gene_name = read.gene_name();
                self.result
                    .genes
                    .entry(gene_name)
                    .or_insert_with_key(|key| GeneSummary::new(key.clone()))
                    .push(read.clone_id);
            }
            Classification::Invalid => self.result.invalid_count += 1,
        }
    }

    pub fn finish(self) -> AggregateResult {
        self.result
    }
}

pub fn aggregate(classifications: impl IntoIterator<Item = Classification>) -> AggregateResult {
    let mut aggregator = Aggregator::new();
    for classification in classifications {
        aggregator.record(classification);
    }
    aggregator.finish()
}
