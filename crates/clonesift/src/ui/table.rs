use clonesift_report::{AggregateResult, CLONE_SEPARATOR, GeneSummary};
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    pub footer: Option<String>,
}

pub struct Formatter;

impl Formatter {
    pub fn build<T: Tabled>(data: impl IntoIterator<Item = T>, config: FormatConfig) -> Table {
        let mut table = Table::new(data);
        if let Some(footer) = config.footer {
            table.with(Panel::footer(footer));
        }
        table.with(Style::sharp());
        table
    }
}

#[derive(Debug, Clone, Tabled)]
pub struct GeneRow {
    #[tabled(rename = "Gene")]
    pub gene_name: String,
    #[tabled(rename = "Clones")]
    pub clone_count: usize,
    #[tabled(rename = "Clone IDs")]
    pub clone_ids: String,
}

impl From<&GeneSummary> for GeneRow {
    fn from(summary: &GeneSummary) -> Self {
        Self {
            gene_name: summary.gene_name().to_string(),
            clone_count: summary.clone_count(),
            clone_ids: summary.clone_ids().join(CLONE_SEPARATOR),
        }
    }
}

pub fn summary_table(result: &AggregateResult) -> Table {
    let rows: Vec<GeneRow> = result.sorted_genes().into_iter().map(GeneRow::from).collect();
    Formatter::build(
        rows,
        FormatConfig {
            footer: Some(format!(
                "{} genes, {} valid reads, {} invalid read filenames",
                result.gene_count(),
                result.valid_read_count(),
                result.invalid_count()
            )),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clonesift_report::{Grammar, aggregate};

    #[test]
    fn table_lists_sorted_genes_and_invalid_count() {
        let grammar = Grammar::standard();
        let result = aggregate(
            ["2024EGB-002-1.T7.ab1", "2024EGA-001X--3.T7.ab1", "junk.ab1"]
                .into_iter()
                .map(|n| grammar.classify(n)),
        );
        let rendered = summary_table(&result).to_string();
        let a = rendered.find("2024EGA_001X").unwrap();
        let b = rendered.find("2024EGB_002").unwrap();
        assert!(a < b);
        assert!(rendered.contains("2 genes, 2 valid reads, 1 invalid read filenames"));
    }
}
