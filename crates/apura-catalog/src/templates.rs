//! Static analysis templates
//!
//! Named preset configurations used to pre-populate a new builder session.
//! Consumed once at session start, never mutated by the core.

use crate::catalog::fields_for;
use apura_model::{
    Aggregation, AnalysisConfiguration, Bucket, DataSource, FieldDescriptor, OptionsPatch,
    SortDirection, VisualizationType,
};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// A named preset configuration
#[derive(Debug, Clone)]
pub struct AnalysisTemplate {
    /// Stable template id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Short description shown in the template picker
    pub description: &'static str,
    /// The preset configuration
    pub configuration: AnalysisConfiguration,
}

fn historic_field(id: &str) -> FieldDescriptor {
    fields_for(&DataSource::Historico)
        .iter()
        .find(|f| f.id.as_str() == id)
        .cloned()
        .unwrap_or_else(|| panic!("template references unknown catalog field {id}"))
}

static TEMPLATES: Lazy<IndexMap<&'static str, AnalysisTemplate>> = Lazy::new(|| {
    let mut templates = IndexMap::new();

    let cbs_mensal = AnalysisConfiguration::new("CBS mensal")
        .add_field(historic_field("mes"), Bucket::Group)
        .set_grouping_sort(0, SortDirection::Asc)
        .add_field(historic_field("valor_cbs"), Bucket::Values)
        .set_value_label(0, "Total CBS")
        .set_visualization(VisualizationType::Line);
    templates.insert(
        "cbs-mensal",
        AnalysisTemplate {
            id: "cbs-mensal",
            name: "CBS mensal",
            description: "Total de CBS apurada por mês",
            configuration: cbs_mensal,
        },
    );

    let totais_uf = AnalysisConfiguration::new("Totais por UF")
        .add_field(historic_field("uf"), Bucket::Group)
        .add_field(historic_field("valor_cbs"), Bucket::Values)
        .set_value_label(0, "Total CBS")
        .add_field(historic_field("valor_ibs"), Bucket::Values)
        .set_value_label(1, "Total IBS")
        .set_visualization(VisualizationType::Column);
    templates.insert(
        "totais-uf",
        AnalysisTemplate {
            id: "totais-uf",
            name: "Totais por UF",
            description: "CBS e IBS apurados por unidade federativa",
            configuration: totais_uf,
        },
    );

    let operacoes = AnalysisConfiguration::new("Operações por tipo")
        .add_field(historic_field("tipo_operacao"), Bucket::Group)
        .add_field(historic_field("quantidade_notas"), Bucket::Values)
        .set_value_aggregation(0, Aggregation::Count)
        .set_visualization(VisualizationType::Pie)
        .set_options(&OptionsPatch::new().show_percent(true));
    templates.insert(
        "operacoes-tipo",
        AnalysisTemplate {
            id: "operacoes-tipo",
            name: "Operações por tipo",
            description: "Distribuição das notas por tipo de operação",
            configuration: operacoes,
        },
    );

    templates
});

/// All templates, in picker order
#[must_use]
pub fn templates() -> impl Iterator<Item = &'static AnalysisTemplate> {
    TEMPLATES.values()
}

/// Look a template up by id
#[must_use]
pub fn template(id: &str) -> Option<&'static AnalysisTemplate> {
    TEMPLATES.get(id)
}
