//! Deterministic export filenames
//!
//! Every export strategy names its file `<slug(name)>_<timestamp>.<ext>`.

use crate::format::ExportFormat;
use chrono::{DateTime, Utc};

/// Fallback slug for blank analysis names
const FALLBACK_SLUG: &str = "analise";

/// Fold one lowercase character's diacritic, if any
///
/// Covers the Portuguese accent set the analysis names actually use.
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Slug an analysis name for use in a filename
///
/// Lower-cases, folds diacritics, and collapses every run of
/// non-alphanumeric characters into a single underscore. Blank input
/// falls back to a fixed slug.
#[must_use]
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.to_lowercase().chars().map(fold_diacritic) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }

    if out.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        out
    }
}

/// Filename for an export produced at `at`
#[must_use]
pub fn export_file_name(name: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{}",
        slug(name),
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn slug_lowercases_and_folds_diacritics() {
        assert_eq!(slug("Análise de Crédito"), "analise_de_credito");
        assert_eq!(slug("Operações por UF"), "operacoes_por_uf");
    }

    #[test]
    fn slug_collapses_symbol_runs_into_one_separator() {
        assert_eq!(slug("CBS -- 2026 (mensal)"), "cbs_2026_mensal");
    }

    #[test]
    fn slug_trims_leading_and_trailing_separators() {
        assert_eq!(slug("  ** CBS **  "), "cbs");
    }

    #[test]
    fn blank_names_fall_back() {
        assert_eq!(slug(""), "analise");
        assert_eq!(slug("---"), "analise");
    }

    #[test]
    fn filename_shape_is_slug_timestamp_extension() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        assert_eq!(
            export_file_name("CBS mensal", ExportFormat::Csv, at),
            "cbs_mensal_20260314_150926.csv"
        );
    }
}
