//! Vocabulary of the per-kind configuration tables.
use crate::numeric::PercentScale;
/// Predicate over a folded header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Contains(&'static str),
    StartsWith(&'static str),
    Equals(&'static str),
    All(&'static [Label]),
    Any(&'static [Label]),
    Not(&'static Label),
}
impl Label {
    pub fn matches(&self, folded: &str) -> bool {
        if folded.is_empty() {
            return false;
        }
        match *self {
            Self::Contains(token) => folded.contains(token),
            Self::StartsWith(token) => folded.starts_with(token),
            Self::Equals(token) => folded == token,
            Self::All(labels) => labels.iter().all(|l| l.matches(folded)),
            Self::Any(labels) => labels.iter().any(|l| l.matches(folded)),
            Self::Not(label) => !label.matches(folded),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRule {
    Fixed {
        row: usize,
    },
    /// First row in which every required label is matched by some cell.
    RowMatch {
        scan_rows: usize,
        required: &'static [Label],
    },
    /// First row whose joined text holds at least `threshold` of `tokens`
    /// and that has a cell matching `anchor`.
    Scored {
        scan_rows: usize,
        tokens: &'static [&'static str],
        threshold: usize,
        anchor: Label,
    },
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderPlan {
    pub rules: &'static [HeaderRule],
    pub fallback_row: Option<usize>,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    Position(usize),
    Label(Label),
    /// First unclaimed label match, only when the header row holds at least
    /// `min_count` matching columns.
    CountedLabel {
        label: Label,
        min_count: usize,
    },
    AnchorOffset(usize),
    AfterField {
        field: &'static str,
        offset: usize,
        header: Label,
    },
    ScanAfterField {
        field: &'static str,
        span: usize,
        header: Label,
    },
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAs {
    Text,
    Number { blank_zero: bool },
    Percent { blank_zero: bool },
    Code,
    Month,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    Text,
    Int,
    Float,
    Percent,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Column {
        resolvers: &'static [Resolver],
        read: ReadAs,
        carry: bool,
    },
    ReportName,
    Contract,
    PeriodStart,
    PeriodEnd,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub source: FieldSource,
    pub store: StoreType,
}
impl FieldSpec {
    pub const fn column(
        name: &'static str,
        resolvers: &'static [Resolver],
        read: ReadAs,
        store: StoreType,
    ) -> Self {
        Self {
            name,
            source: FieldSource::Column {
                resolvers,
                read,
                carry: false,
            },
            store,
        }
    }
    pub const fn carried(
        name: &'static str,
        resolvers: &'static [Resolver],
        read: ReadAs,
        store: StoreType,
    ) -> Self {
        Self {
            name,
            source: FieldSource::Column {
                resolvers,
                read,
                carry: true,
            },
            store,
        }
    }
    pub const fn meta(name: &'static str, source: FieldSource, store: StoreType) -> Self {
        Self {
            name,
            source,
            store,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodRule {
    /// "DD/MM/YYYY até DD/MM/YYYY": whitespace tokens 0 and 2.
    Range,
    /// First and last MM/YYYY occurrence in the period row.
    MonthYear,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaLayout {
    pub contract_cells: &'static [(usize, usize)],
    pub period_cells: &'static [(usize, usize)],
    pub period_rule: PeriodRule,
}
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    pub report_name: &'static str,
    pub store_file: &'static str,
    pub header: HeaderPlan,
    pub meta: MetaLayout,
    pub fields: &'static [FieldSpec],
    pub anchor_field: &'static str,
    pub total_markers: &'static [&'static str],
    pub percent_scale: PercentScale,
    pub dedup_period_field: &'static str,
    pub sniff_keywords: &'static [&'static str],
}
impl KindSpec {
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }
}
