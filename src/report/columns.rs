use super::{
    header::HeaderMatch,
    layout::{FieldSource, KindSpec, Label, Resolver},
};
use crate::excel::sheet::RawSheet;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    HeaderAnchor,
    Position,
    Label,
    AnchorOffset,
    AfterField,
    ScanAfterField,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapped {
    pub col: usize,
    pub resolution: Resolution,
}
/// Field index to source column, aligned with `KindSpec::fields`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    entries: Vec<Option<Mapped>>,
}
impl ColumnMap {
    pub fn get(&self, field_index: usize) -> Option<Mapped> {
        self.entries.get(field_index).copied().flatten()
    }
    pub fn column_of(&self, spec: &KindSpec, field: &str) -> Option<usize> {
        spec.field_index(field)
            .and_then(|i| self.get(i))
            .map(|m| m.col)
    }
    pub fn mapped_count(&self) -> usize {
        self.entries.iter().flatten().count()
    }
}
struct Resolving<'a> {
    spec: &'a KindSpec,
    labels: &'a [String],
    width: usize,
    anchor_col: Option<usize>,
    claimed: &'a [usize],
    resolved: &'a [Option<Mapped>],
}
impl Resolving<'_> {
    fn label_at(&self, col: usize) -> &str {
        self.labels.get(col).map_or("", String::as_str)
    }
    fn resolved_col(&self, field: &str) -> Option<usize> {
        let index = self.spec.field_index(field)?;
        self.resolved.get(index).copied().flatten().map(|m| m.col)
    }
    fn first_unclaimed(&self, label: Label) -> Option<usize> {
        self.labels
            .iter()
            .enumerate()
            .find(|&(col, text)| !self.claimed.contains(&col) && label.matches(text))
            .map(|(col, _)| col)
    }
    fn count_matching(&self, label: Label) -> usize {
        self.labels.iter().filter(|text| label.matches(text)).count()
    }
    fn resolve(&self, resolver: &Resolver) -> Option<Mapped> {
        let (col, resolution) = match *resolver {
            Resolver::Position(col) => (col, Resolution::Position),
            Resolver::Label(label) => (self.first_unclaimed(label)?, Resolution::Label),
            Resolver::CountedLabel { label, min_count } => {
                if self.count_matching(label) < min_count {
                    return None;
                }
                (self.first_unclaimed(label)?, Resolution::Label)
            }
            Resolver::AnchorOffset(offset) => {
                let col = self.anchor_col?.checked_add(offset)?;
                if col >= self.width {
                    return None;
                }
                (col, Resolution::AnchorOffset)
            }
            Resolver::AfterField {
                field,
                offset,
                header,
            } => {
                let col = self.resolved_col(field)?.checked_add(offset)?;
                if !header.matches(self.label_at(col)) {
                    return None;
                }
                (col, Resolution::AfterField)
            }
            Resolver::ScanAfterField {
                field,
                span,
                header,
            } => {
                let base = self.resolved_col(field)?;
                let col = (1..=span)
                    .filter_map(|step| base.checked_add(step))
                    .take_while(|col| *col < self.width)
                    .find(|col| header.matches(self.label_at(*col)))?;
                (col, Resolution::ScanAfterField)
            }
        };
        Some(Mapped { col, resolution })
    }
}
/// Resolves each column field in table order; label matches skip columns
/// already taken by earlier fields.
pub fn map_columns(sheet: &RawSheet, header: &HeaderMatch, spec: &KindSpec) -> ColumnMap {
    let labels = sheet.folded_row(header.row);
    let width = sheet.width().max(labels.len());
    let mut resolved: Vec<Option<Mapped>> = Vec::with_capacity(spec.fields.len());
    let mut claimed: Vec<usize> = Vec::new();
    let mut anchor_col = header.anchor_col;
    for field in spec.fields {
        let FieldSource::Column { resolvers, .. } = field.source else {
            resolved.push(None);
            continue;
        };
        let is_anchor = field.name == spec.anchor_field;
        let mapped = match header.anchor_col {
            Some(col) if is_anchor => Some(Mapped {
                col,
                resolution: Resolution::HeaderAnchor,
            }),
            Some(_) | None => {
                let ctx = Resolving {
                    spec,
                    labels: &labels,
                    width,
                    anchor_col,
                    claimed: &claimed,
                    resolved: &resolved,
                };
                resolvers.iter().find_map(|r| ctx.resolve(r))
            }
        };
        match mapped {
            Some(m) => {
                tracing::debug!(
                    field = field.name,
                    col = m.col,
                    resolution = ?m.resolution,
                    "coluna mapeada"
                );
                claimed.push(m.col);
                if is_anchor {
                    anchor_col = Some(m.col);
                }
            }
            None => tracing::debug!(field = field.name, "coluna não encontrada"),
        }
        resolved.push(mapped);
    }
    ColumnMap { entries: resolved }
}
