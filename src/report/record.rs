use super::kinds::ReportKind;
use crate::error::{Error, Result};
/// One extracted row: values aligned with the kind's field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    kind: ReportKind,
    values: Vec<String>,
}
impl Record {
    pub(crate) const fn new(kind: ReportKind, values: Vec<String>) -> Self {
        Self { kind, values }
    }
    /// Builds a record from named values; fields not named stay empty.
    pub fn from_pairs(kind: ReportKind, pairs: &[(&str, &str)]) -> Result<Self> {
        let spec = kind.spec();
        let mut values = vec![String::new(); spec.fields.len()];
        for &(name, value) in pairs {
            let slot = spec
                .field_index(name)
                .and_then(|i| values.get_mut(i))
                .ok_or_else(|| Error::UnknownField {
                    kind,
                    field: name.to_owned(),
                })?;
            value.clone_into(slot);
        }
        Ok(Self::new(kind, values))
    }
    pub const fn kind(&self) -> ReportKind {
        self.kind
    }
    pub fn values(&self) -> &[String] {
        &self.values
    }
    pub fn get(&self, field: &str) -> Option<&str> {
        let index = self.kind.spec().field_index(field)?;
        self.values.get(index).map(String::as_str)
    }
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.kind
            .spec()
            .field_names()
            .zip(self.values.iter().map(String::as_str))
    }
    pub fn contract(&self) -> &str {
        self.get("contrato").unwrap_or_default()
    }
    /// Period value used with the contract as the duplicate key.
    pub fn period_key(&self) -> &str {
        self.get(self.kind.spec().dedup_period_field)
            .unwrap_or_default()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn from_pairs_fills_named_fields_only() -> Result<()> {
        let record = Record::from_pairs(
            ReportKind::Providers,
            &[("prestador", "Clínica A"), ("contrato", "77")],
        )?;
        assert_eq!(record.get("prestador"), Some("Clínica A"));
        assert_eq!(record.contract(), "77");
        assert_eq!(record.get("uf"), Some(""), "unnamed field is empty");
        assert_eq!(record.get("nope"), None, "unknown field");
        assert_eq!(record.fields().count(), record.values().len(), "aligned");
        Ok(())
    }
    #[test]
    fn unknown_field_is_rejected() {
        let result = Record::from_pairs(ReportKind::Exams, &[("beneficiario", "x")]);
        assert!(
            matches!(result, Err(Error::UnknownField { .. })),
            "exams have no beneficiary column"
        );
    }
    #[test]
    fn loss_ratio_keys_on_month() -> Result<()> {
        let record = Record::from_pairs(
            ReportKind::LossRatio,
            &[("competencia", "03/2024"), ("dtcompetde", "01/2024")],
        )?;
        assert_eq!(record.period_key(), "03/2024", "one row per month");
        Ok(())
    }
}
