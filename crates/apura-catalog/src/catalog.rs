//! Static per-source field catalogs and catalog search

use apura_model::{DataSource, FieldDescriptor, ValueType};
use once_cell::sync::Lazy;

/// Fields shared by every source: the consolidated tax-movement columns
fn movement_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("periodo", "periodo", "Período", ValueType::Date)
            .with_description("Período de apuração (ano-mês)"),
        FieldDescriptor::new("mes", "mes", "Mês", ValueType::Date)
            .with_description("Mês da operação"),
        FieldDescriptor::new("uf", "uf", "UF", ValueType::Text)
            .with_description("Unidade federativa do destinatário"),
        FieldDescriptor::new("municipio", "municipio", "Município", ValueType::Text),
        FieldDescriptor::new("cfop", "cfop", "CFOP", ValueType::Text)
            .with_description("Código fiscal da operação"),
        FieldDescriptor::new("ncm", "ncm", "NCM", ValueType::Text)
            .with_description("Classificação fiscal da mercadoria"),
        FieldDescriptor::new("tipo_operacao", "tipoOperacao", "Tipo de operação", ValueType::Text)
            .with_description("Entrada, saída ou devolução"),
        FieldDescriptor::new("valor_operacao", "valorOperacao", "Valor da operação", ValueType::Number),
        FieldDescriptor::new("valor_cbs", "valorCBS", "Valor CBS", ValueType::Number)
            .with_description("Contribuição sobre bens e serviços apurada"),
        FieldDescriptor::new("valor_ibs", "valorIBS", "Valor IBS", ValueType::Number)
            .with_description("Imposto sobre bens e serviços apurado"),
        FieldDescriptor::new("aliquota_efetiva", "aliquotaEfetiva", "Alíquota efetiva", ValueType::Number),
        FieldDescriptor::new("quantidade_notas", "quantidadeNotas", "Quantidade de notas", ValueType::Number),
    ]
}

static HISTORICO_FIELDS: Lazy<Vec<FieldDescriptor>> = Lazy::new(movement_fields);

static SIMULACAO_FIELDS: Lazy<Vec<FieldDescriptor>> = Lazy::new(|| {
    let mut fields = movement_fields();
    fields.extend([
        FieldDescriptor::new("cenario", "cenario", "Cenário", ValueType::Text)
            .with_description("Cenário de simulação aplicado à base"),
        FieldDescriptor::new("valor_cbs_simulado", "valorCBSSimulado", "Valor CBS simulado", ValueType::Number),
        FieldDescriptor::new("valor_ibs_simulado", "valorIBSSimulado", "Valor IBS simulado", ValueType::Number),
        FieldDescriptor::new("delta_tributo", "deltaTributo", "Variação de tributo", ValueType::Number)
            .with_description("Diferença entre o tributo simulado e o apurado"),
    ]);
    fields
});

/// Catalog of selectable fields for a data source
///
/// Pure and deterministic: the same backing table is returned on every
/// call and field ids are stable, which drag identifiers and the keyboard
/// selection index rely on.
#[must_use]
pub fn fields_for(source: &DataSource) -> &'static [FieldDescriptor] {
    match source {
        DataSource::Historico => &HISTORICO_FIELDS,
        DataSource::BaseSimulacao { .. } => &SIMULACAO_FIELDS,
    }
}

/// Case-insensitive substring search over label, name, and description
///
/// A blank query returns the full list in catalog order. Never mutates the
/// catalog.
#[must_use]
pub fn filter_fields<'a>(fields: &'a [FieldDescriptor], query: &str) -> Vec<&'a FieldDescriptor> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return fields.iter().collect();
    }
    fields
        .iter()
        .filter(|f| {
            f.label.to_lowercase().contains(&query)
                || f.name.to_lowercase().contains(&query)
                || f.description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_are_stable_across_calls() {
        let a = fields_for(&DataSource::Historico);
        let b = fields_for(&DataSource::Historico);
        assert_eq!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn simulation_catalog_extends_the_movement_fields() {
        let historic = fields_for(&DataSource::Historico);
        let simulated = fields_for(&DataSource::simulacao());
        assert!(simulated.len() > historic.len());
        assert!(simulated.iter().any(|f| f.id.as_str() == "cenario"));
        assert!(historic.iter().all(|f| f.id.as_str() != "cenario"));
    }

    #[test]
    fn field_ids_are_unique_within_each_catalog() {
        for source in [DataSource::Historico, DataSource::simulacao()] {
            let fields = fields_for(&source);
            let mut ids: Vec<_> = fields.iter().map(|f| f.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), fields.len());
        }
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let fields = fields_for(&DataSource::Historico);
        let filtered = filter_fields(fields, "   ");
        assert_eq!(filtered.len(), fields.len());
        assert_eq!(filtered[0].id, fields[0].id);
    }

    #[test]
    fn search_is_case_insensitive_over_label_name_and_description() {
        let fields = fields_for(&DataSource::Historico);

        let by_label = filter_fields(fields, "valor cbs");
        assert!(by_label.iter().any(|f| f.id.as_str() == "valor_cbs"));

        let by_name = filter_fields(fields, "valorcbs");
        assert!(by_name.iter().any(|f| f.id.as_str() == "valor_cbs"));

        let by_description = filter_fields(fields, "mercadoria");
        assert!(by_description.iter().any(|f| f.id.as_str() == "ncm"));
    }

    #[test]
    fn search_with_no_match_returns_empty() {
        let fields = fields_for(&DataSource::Historico);
        assert!(filter_fields(fields, "zzz-nada").is_empty());
    }
}
