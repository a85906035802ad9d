use super::layout::{HeaderPlan, HeaderRule, Label};
use crate::excel::sheet::RawSheet;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStrategy {
    Fixed,
    RowMatch,
    Scored,
    Fallback,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch {
    pub row: usize,
    /// Column of the anchor cell when the matching rule identified one.
    pub anchor_col: Option<usize>,
    pub strategy: HeaderStrategy,
}
/// Evaluates the plan's rules in order, then its fallback row.
pub fn locate_header(
    sheet: &RawSheet,
    plan: &HeaderPlan,
    scan_rows_override: Option<usize>,
) -> Option<HeaderMatch> {
    if sheet.height() == 0 {
        return None;
    }
    plan.rules
        .iter()
        .find_map(|rule| apply_rule(sheet, rule, scan_rows_override))
        .or_else(|| {
            plan.fallback_row.map(|row| HeaderMatch {
                row: row.min(sheet.height().saturating_sub(1)),
                anchor_col: None,
                strategy: HeaderStrategy::Fallback,
            })
        })
}
fn apply_rule(
    sheet: &RawSheet,
    rule: &HeaderRule,
    scan_rows_override: Option<usize>,
) -> Option<HeaderMatch> {
    match *rule {
        HeaderRule::Fixed { row } => (row < sheet.height()).then_some(HeaderMatch {
            row,
            anchor_col: None,
            strategy: HeaderStrategy::Fixed,
        }),
        HeaderRule::RowMatch {
            scan_rows,
            required,
        } => scan_range(sheet, scan_rows_override.unwrap_or(scan_rows)).find_map(|row| {
            let folded = sheet.folded_row(row);
            row_has_all(&folded, required).then_some(HeaderMatch {
                row,
                anchor_col: None,
                strategy: HeaderStrategy::RowMatch,
            })
        }),
        HeaderRule::Scored {
            scan_rows,
            tokens,
            threshold,
            anchor,
        } => scan_range(sheet, scan_rows_override.unwrap_or(scan_rows)).find_map(|row| {
            let folded = sheet.folded_row(row);
            let joined = folded.join(" | ");
            let score = tokens.iter().filter(|t| joined.contains(**t)).count();
            if score < threshold {
                return None;
            }
            let anchor_col = folded.iter().position(|cell| anchor.matches(cell))?;
            Some(HeaderMatch {
                row,
                anchor_col: Some(anchor_col),
                strategy: HeaderStrategy::Scored,
            })
        }),
    }
}
fn scan_range(sheet: &RawSheet, scan_rows: usize) -> std::ops::Range<usize> {
    0..scan_rows.min(sheet.height())
}
fn row_has_all(folded: &[String], required: &[Label]) -> bool {
    required
        .iter()
        .all(|label| folded.iter().any(|cell| label.matches(cell)))
}
#[cfg(test)]
mod tests {
    use super::*;
    const DIAG_PLAN: HeaderPlan = HeaderPlan {
        rules: &[HeaderRule::Scored {
            scan_rows: 120,
            tokens: &["diagn", "qtd", "valor", "custo", "benef"],
            threshold: 3,
            anchor: Label::Any(&[Label::Contains("diagn"), Label::Equals("cid")]),
        }],
        fallback_row: Some(10),
    };
    #[test]
    fn scored_rule_reports_row_and_anchor() {
        let sheet = RawSheet::from_text_rows(
            "Plan1",
            &[
                &["Estatísticas de Diagnóstico"],
                &["", "Valor"],
                &["", "CID", "Qtd Internações", "", "Valor Total", "Custo Médio"],
                &["", "A00", "2"],
            ],
        );
        let found = locate_header(&sheet, &DIAG_PLAN, None);
        assert_eq!(
            found,
            Some(HeaderMatch {
                row: 2,
                anchor_col: Some(1),
                strategy: HeaderStrategy::Scored,
            }),
            "row 1 scores too low, row 2 has the CID anchor"
        );
    }
    #[test]
    fn enough_tokens_without_anchor_is_rejected() {
        let sheet = RawSheet::from_text_rows("Plan1", &[&["Qtd", "Valor", "Custo"], &["x"]]);
        let found = locate_header(&sheet, &DIAG_PLAN, None);
        assert_eq!(
            found.map(|m| (m.row, m.strategy)),
            Some((1, HeaderStrategy::Fallback)),
            "fallback row 10 is clamped to the last row"
        );
    }
    #[test]
    fn scan_override_limits_the_search() {
        let sheet = RawSheet::from_text_rows(
            "Plan1",
            &[&[""], &[""], &["Diagnóstico", "Qtd", "Valor"]],
        );
        let found = locate_header(&sheet, &DIAG_PLAN, Some(2));
        assert_eq!(found.map(|m| m.strategy), Some(HeaderStrategy::Fallback), "override");
    }
    #[test]
    fn row_match_needs_every_label() {
        let plan = HeaderPlan {
            rules: &[HeaderRule::RowMatch {
                scan_rows: 50,
                required: &[Label::Equals("mes"), Label::Contains("fatur")],
            }],
            fallback_row: None,
        };
        let sheet = RawSheet::from_text_rows(
            "Plan1",
            &[
                &["Mês de referência", "Faturamento"],
                &["Mês", "Eventos"],
                &["MÊS", "Faturamento", "Eventos"],
            ],
        );
        let found = locate_header(&sheet, &plan, None);
        assert_eq!(found.map(|m| m.row), Some(2), "only row 2 has both labels");
        let empty = RawSheet::from_text_rows("Plan1", &[&["Mês"]]);
        assert_eq!(locate_header(&empty, &plan, None), None, "no fallback");
    }
    #[test]
    fn fixed_row_outside_the_sheet_fails() {
        let plan = HeaderPlan {
            rules: &[HeaderRule::Fixed { row: 14 }],
            fallback_row: None,
        };
        let sheet = RawSheet::from_text_rows("Plan1", &[&["a"], &["b"]]);
        assert_eq!(locate_header(&sheet, &plan, None), None, "too short");
        assert_eq!(
            locate_header(&RawSheet::from_text_rows("Plan1", &[]), &DIAG_PLAN, None),
            None,
            "empty sheet has no header even with a fallback"
        );
    }
}
