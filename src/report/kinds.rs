use super::layout::{
    FieldSource, FieldSpec, HeaderPlan, HeaderRule, KindSpec, Label, MetaLayout, PeriodRule,
    ReadAs, Resolver, StoreType,
};
use crate::numeric::PercentScale;
use std::fmt;
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum ReportKind {
    #[value(name = "beneficiarios", alias = "beneficiaries")]
    Beneficiaries,
    #[value(name = "prestadores", alias = "providers")]
    Providers,
    #[value(name = "procedimentos", alias = "procedures")]
    Procedures,
    #[value(name = "consultas", alias = "consultations")]
    Consultations,
    #[value(name = "diagnosticos", alias = "diagnoses")]
    Diagnoses,
    #[value(name = "exames", alias = "exams")]
    Exams,
    #[value(name = "terapias", alias = "therapies")]
    Therapies,
    #[value(name = "sinistralidade", alias = "loss-ratio")]
    LossRatio,
}
impl ReportKind {
    pub const ALL: [Self; 8] = [
        Self::Beneficiaries,
        Self::Providers,
        Self::Procedures,
        Self::Consultations,
        Self::Diagnoses,
        Self::Exams,
        Self::Therapies,
        Self::LossRatio,
    ];
    pub fn spec(self) -> &'static KindSpec {
        match self {
            Self::Beneficiaries => &BENEFICIARIES,
            Self::Providers => &PROVIDERS,
            Self::Procedures => &PROCEDURES,
            Self::Consultations => &CONSULTATIONS,
            Self::Diagnoses => &DIAGNOSES,
            Self::Exams => &EXAMS,
            Self::Therapies => &THERAPIES,
            Self::LossRatio => &LOSS_RATIO,
        }
    }
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Beneficiaries => "beneficiarios",
            Self::Providers => "prestadores",
            Self::Procedures => "procedimentos",
            Self::Consultations => "consultas",
            Self::Diagnoses => "diagnosticos",
            Self::Exams => "exames",
            Self::Therapies => "terapias",
            Self::LossRatio => "sinistralidade",
        }
    }
}
impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
const TEXT: ReadAs = ReadAs::Text;
const NUMBER: ReadAs = ReadAs::Number { blank_zero: false };
const NUMBER_OR_ZERO: ReadAs = ReadAs::Number { blank_zero: true };
const PERCENT: ReadAs = ReadAs::Percent { blank_zero: false };
const TOTAL_ONLY: &[&str] = &["total"];
const CONTRACT_CELL: &[(usize, usize)] = &[(2, 3)];
const PERIOD_CELLS: &[(usize, usize)] = &[(8, 3), (9, 3)];
const RANKING_CONTRACT_CELL: &[(usize, usize)] = &[(3, 3)];
const RELATORIO: FieldSpec = FieldSpec::meta("relatorio", FieldSource::ReportName, StoreType::Text);
const CONTRATO: FieldSpec = FieldSpec::meta("contrato", FieldSource::Contract, StoreType::Int);
const DTCOMPETDE: FieldSpec =
    FieldSpec::meta("dtcompetde", FieldSource::PeriodStart, StoreType::Text);
const DTCOMPETATE: FieldSpec =
    FieldSpec::meta("dtcompetate", FieldSource::PeriodEnd, StoreType::Text);
static BENEFICIARIES_FIELDS: &[FieldSpec] = &[
    FieldSpec::carried("certificado", &[Resolver::Position(2)], TEXT, StoreType::Text),
    FieldSpec::column("beneficiario", &[Resolver::Position(3)], TEXT, StoreType::Text),
    FieldSpec::column("codigodepend", &[Resolver::Position(7)], ReadAs::Code, StoreType::Text),
    FieldSpec::column("vigente", &[Resolver::Position(8)], TEXT, StoreType::Text),
    FieldSpec::column("qteventos", &[Resolver::Position(9)], NUMBER, StoreType::Int),
    FieldSpec::column("porcqteventos", &[Resolver::Position(10)], PERCENT, StoreType::Percent),
    FieldSpec::column("valorliq", &[Resolver::Position(11)], NUMBER, StoreType::Float),
    FieldSpec::column("inss", &[Resolver::Position(12)], NUMBER_OR_ZERO, StoreType::Float),
    FieldSpec::column("valortotal", &[Resolver::Position(13)], NUMBER, StoreType::Float),
    FieldSpec::column("porcvalortotal", &[Resolver::Position(14)], PERCENT, StoreType::Percent),
    FieldSpec::column("valorcopart", &[Resolver::Position(16)], NUMBER_OR_ZERO, StoreType::Float),
    FieldSpec::column("porcvalorcopart", &[Resolver::Position(17)], PERCENT, StoreType::Percent),
    FieldSpec::column("valorrecebido", &[Resolver::Position(18)], NUMBER, StoreType::Float),
    RELATORIO,
    CONTRATO,
    DTCOMPETDE,
    DTCOMPETATE,
];
static BENEFICIARIES: KindSpec = KindSpec {
    report_name: "Ranking de Beneficiários",
    store_file: "despesas.xlsx",
    header: HeaderPlan {
        rules: &[HeaderRule::Fixed { row: 14 }],
        fallback_row: None,
    },
    meta: MetaLayout {
        contract_cells: RANKING_CONTRACT_CELL,
        period_cells: &[(10, 3)],
        period_rule: PeriodRule::Range,
    },
    fields: BENEFICIARIES_FIELDS,
    anchor_field: "beneficiario",
    total_markers: TOTAL_ONLY,
    percent_scale: PercentScale::Fraction,
    dedup_period_field: "dtcompetde",
    sniff_keywords: &["beneficiar", "ranking", "certificado"],
};
static PROVIDERS_FIELDS: &[FieldSpec] = &[
    FieldSpec::carried("codigo", &[Resolver::Position(3)], TEXT, StoreType::Int),
    FieldSpec::column("prestador", &[Resolver::Position(6)], TEXT, StoreType::Text),
    FieldSpec::column("qtdeventos", &[Resolver::Position(8)], NUMBER, StoreType::Int),
    FieldSpec::column("uf", &[Resolver::Position(9)], TEXT, StoreType::Text),
    FieldSpec::column("valor", &[Resolver::Position(10)], NUMBER, StoreType::Float),
    FieldSpec::column("inss", &[Resolver::Position(11)], NUMBER, StoreType::Float),
    FieldSpec::column("valortotal", &[Resolver::Position(12)], NUMBER, StoreType::Float),
    FieldSpec::column("porctotal", &[Resolver::Position(13)], PERCENT, StoreType::Percent),
    FieldSpec::column("customedio", &[Resolver::Position(15)], NUMBER, StoreType::Float),
    RELATORIO,
    CONTRATO,
    DTCOMPETDE,
    DTCOMPETATE,
];
static PROVIDERS: KindSpec = KindSpec {
    report_name: "Ranking de Prestadores",
    store_file: "prestadores.xlsx",
    header: HeaderPlan {
        rules: &[HeaderRule::Fixed { row: 12 }],
        fallback_row: None,
    },
    meta: MetaLayout {
        contract_cells: RANKING_CONTRACT_CELL,
        period_cells: &[(8, 3)],
        period_rule: PeriodRule::Range,
    },
    fields: PROVIDERS_FIELDS,
    anchor_field: "prestador",
    total_markers: TOTAL_ONLY,
    percent_scale: PercentScale::Fraction,
    dedup_period_field: "dtcompetde",
    sniff_keywords: &["prestador", "valor", "codigo"],
};
static PROCEDURES_FIELDS: &[FieldSpec] = &[
    FieldSpec::carried("codigo", &[Resolver::Position(2)], TEXT, StoreType::Int),
    FieldSpec::column("nome", &[Resolver::Position(3)], TEXT, StoreType::Text),
    FieldSpec::column("qtdeventos", &[Resolver::Position(7)], NUMBER, StoreType::Int),
    FieldSpec::column("sobretotal", &[Resolver::Position(8)], PERCENT, StoreType::Percent),
    FieldSpec::column("valorliquido", &[Resolver::Position(9)], NUMBER, StoreType::Float),
    FieldSpec::column("inss", &[Resolver::Position(10)], NUMBER, StoreType::Float),
    FieldSpec::column("valortotal", &[Resolver::Position(11)], NUMBER, StoreType::Float),
    FieldSpec::column("porctotal", &[Resolver::Position(12)], PERCENT, StoreType::Percent),
    FieldSpec::column("customedio", &[Resolver::Position(13)], NUMBER, StoreType::Float),
    FieldSpec::column("partibeneficiario", &[Resolver::Position(14)], NUMBER, StoreType::Float),
    FieldSpec::column("porcsobretotal", &[Resolver::Position(16)], PERCENT, StoreType::Percent),
    RELATORIO,
    CONTRATO,
    DTCOMPETDE,
    DTCOMPETATE,
];
static PROCEDURES: KindSpec = KindSpec {
    report_name: "Ranking de Procedimentos",
    store_file: "procedimentos.xlsx",
    header: HeaderPlan {
        rules: &[HeaderRule::Fixed { row: 13 }],
        fallback_row: None,
    },
    meta: MetaLayout {
        contract_cells: RANKING_CONTRACT_CELL,
        period_cells: &[(9, 3)],
        period_rule: PeriodRule::Range,
    },
    fields: PROCEDURES_FIELDS,
    anchor_field: "nome",
    total_markers: TOTAL_ONLY,
    percent_scale: PercentScale::Fraction,
    dedup_period_field: "dtcompetde",
    sniff_keywords: &["procedimento", "custo", "ranking"],
};
const PERCENT_SIGN: Label = Label::Contains("%");
static CONSULTATIONS_FIELDS: &[FieldSpec] = &[
    FieldSpec::column(
        "codigo",
        &[Resolver::Label(Label::StartsWith("cod"))],
        ReadAs::Code,
        StoreType::Int,
    ),
    FieldSpec::column(
        "especialidade",
        &[Resolver::Label(Label::Contains("especial"))],
        TEXT,
        StoreType::Text,
    ),
    FieldSpec::column(
        "qtdeventos",
        &[Resolver::Label(Label::Contains("qt"))],
        NUMBER,
        StoreType::Int,
    ),
    FieldSpec::column(
        "sobretotal",
        &[Resolver::Label(Label::Any(&[
            Label::Contains("%sobre"),
            Label::All(&[PERCENT_SIGN, Label::Contains("event")]),
        ]))],
        PERCENT,
        StoreType::Percent,
    ),
    FieldSpec::column(
        "valorliquido",
        &[Resolver::Label(Label::Contains("liq"))],
        NUMBER,
        StoreType::Float,
    ),
    FieldSpec::column(
        "inss",
        &[Resolver::Label(Label::Contains("inss"))],
        NUMBER,
        StoreType::Float,
    ),
    FieldSpec::column(
        "valortotal",
        &[Resolver::Label(Label::StartsWith("valor total"))],
        NUMBER,
        StoreType::Float,
    ),
    FieldSpec::column(
        "porctotal",
        &[Resolver::Label(Label::All(&[
            PERCENT_SIGN,
            Label::Contains("sobre total"),
        ]))],
        PERCENT,
        StoreType::Percent,
    ),
    FieldSpec::column(
        "partibeneficiario",
        &[Resolver::Label(Label::Any(&[
            Label::Contains("particip"),
            Label::Contains("benefic"),
        ]))],
        NUMBER,
        StoreType::Float,
    ),
    FieldSpec::column(
        "porcsobretotal",
        &[Resolver::CountedLabel {
            label: PERCENT_SIGN,
            min_count: 2,
        }],
        PERCENT,
        StoreType::Percent,
    ),
    RELATORIO,
    CONTRATO,
    DTCOMPETDE,
    DTCOMPETATE,
];
static CONSULTATIONS: KindSpec = KindSpec {
    report_name: "Estatísticas de Consultas",
    store_file: "consultas.xlsx",
    header: HeaderPlan {
        rules: &[HeaderRule::RowMatch {
            scan_rows: 30,
            required: &[Label::StartsWith("codigo")],
        }],
        fallback_row: Some(12),
    },
    meta: MetaLayout {
        contract_cells: CONTRACT_CELL,
        period_cells: PERIOD_CELLS,
        period_rule: PeriodRule::Range,
    },
    fields: CONSULTATIONS_FIELDS,
    anchor_field: "especialidade",
    total_markers: &["total", "reembolso"],
    percent_scale: PercentScale::Points,
    dedup_period_field: "dtcompetde",
    sniff_keywords: &[],
};
static DIAGNOSES_FIELDS: &[FieldSpec] = &[
    FieldSpec::column(
        "diagnostico",
        &[Resolver::Label(Label::Contains("diagn"))],
        TEXT,
        StoreType::Text,
    ),
    FieldSpec::column(
        "qtdintern",
        &[
            Resolver::Label(Label::All(&[Label::Contains("qtd"), Label::Contains("intern")])),
            Resolver::AnchorOffset(1),
        ],
        NUMBER,
        StoreType::Int,
    ),
    FieldSpec::column(
        "percintern_total",
        &[Resolver::AfterField {
            field: "qtdintern",
            offset: 1,
            header: PERCENT_SIGN,
        }],
        PERCENT,
        StoreType::Percent,
    ),
    FieldSpec::column(
        "qtdpacientes",
        &[
            Resolver::Label(Label::All(&[Label::Contains("qtd"), Label::Contains("pac")])),
            Resolver::AnchorOffset(3),
        ],
        NUMBER,
        StoreType::Int,
    ),
    FieldSpec::column(
        "percpac_total",
        &[Resolver::AfterField {
            field: "qtdpacientes",
            offset: 1,
            header: PERCENT_SIGN,
        }],
        PERCENT,
        StoreType::Percent,
    ),
    FieldSpec::column(
        "valortotal",
        &[
            Resolver::Label(Label::All(&[Label::Contains("valor"), Label::Contains("total")])),
            Resolver::AnchorOffset(5),
        ],
        NUMBER,
        StoreType::Float,
    ),
    FieldSpec::column(
        "percvalor_total",
        &[Resolver::ScanAfterField {
            field: "valortotal",
            span: 3,
            header: Label::Any(&[PERCENT_SIGN, Label::Contains("sobre")]),
        }],
        PERCENT,
        StoreType::Percent,
    ),
    FieldSpec::column(
        "customedio",
        &[
            Resolver::Label(Label::Contains("custo")),
            Resolver::AnchorOffset(7),
        ],
        NUMBER,
        StoreType::Float,
    ),
    FieldSpec::column(
        "partibeneficiario",
        &[
            Resolver::Label(Label::All(&[Label::Contains("part"), Label::Contains("benef")])),
            Resolver::AnchorOffset(8),
        ],
        NUMBER,
        StoreType::Float,
    ),
    RELATORIO,
    CONTRATO,
    DTCOMPETDE,
    DTCOMPETATE,
];
static DIAGNOSES: KindSpec = KindSpec {
    report_name: "Estatísticas de Diagnóstico",
    store_file: "diagnosticos.xlsx",
    header: HeaderPlan {
        rules: &[HeaderRule::Scored {
            scan_rows: 120,
            tokens: &["diagn", "qtd", "valor", "custo", "benef"],
            threshold: 3,
            anchor: Label::Any(&[Label::Contains("diagn"), Label::Equals("cid")]),
        }],
        fallback_row: Some(10),
    },
    meta: MetaLayout {
        contract_cells: CONTRACT_CELL,
        period_cells: PERIOD_CELLS,
        period_rule: PeriodRule::Range,
    },
    fields: DIAGNOSES_FIELDS,
    anchor_field: "diagnostico",
    total_markers: TOTAL_ONLY,
    percent_scale: PercentScale::Points,
    dedup_period_field: "dtcompetde",
    sniff_keywords: &[],
};
const GROUP_HEADER: HeaderPlan = HeaderPlan {
    rules: &[HeaderRule::RowMatch {
        scan_rows: 40,
        required: &[Label::Any(&[
            Label::Contains("qtd"),
            Label::Contains("valor"),
            Label::Contains("grupo"),
        ])],
    }],
    fallback_row: Some(12),
};
const GRUPO: FieldSpec = FieldSpec::column(
    "grupo",
    &[Resolver::Label(Label::Contains("grupo"))],
    TEXT,
    StoreType::Text,
);
const GROUP_QTDEVENTOS: FieldSpec = FieldSpec::column(
    "qtdeventos",
    &[Resolver::Label(Label::Contains("qtd"))],
    NUMBER,
    StoreType::Int,
);
const GROUP_SOBRETOTAL: FieldSpec = FieldSpec::column(
    "sobretotal",
    &[Resolver::Label(Label::All(&[PERCENT_SIGN, Label::Contains("sobre")]))],
    PERCENT,
    StoreType::Percent,
);
const GROUP_VALORLIQUIDO: FieldSpec = FieldSpec::column(
    "valorliquido",
    &[Resolver::Label(Label::Contains("liq"))],
    NUMBER,
    StoreType::Float,
);
const GROUP_INSS: FieldSpec = FieldSpec::column(
    "inss",
    &[Resolver::Label(Label::Contains("inss"))],
    NUMBER,
    StoreType::Float,
);
const GROUP_VALORTOTAL: FieldSpec = FieldSpec::column(
    "valortotal",
    &[Resolver::Label(Label::Contains("valor total"))],
    NUMBER,
    StoreType::Float,
);
const GROUP_PORCTOTAL: FieldSpec = FieldSpec::column(
    "porctotal",
    &[Resolver::Label(Label::All(&[
        PERCENT_SIGN,
        Label::Contains("sobre total"),
    ]))],
    PERCENT,
    StoreType::Percent,
);
const GROUP_CUSTOMEDIO: FieldSpec = FieldSpec::column(
    "customedio",
    &[Resolver::Label(Label::Contains("custo"))],
    NUMBER,
    StoreType::Float,
);
static EXAMS_FIELDS: &[FieldSpec] = &[
    GRUPO,
    GROUP_QTDEVENTOS,
    GROUP_SOBRETOTAL,
    GROUP_VALORLIQUIDO,
    GROUP_INSS,
    GROUP_VALORTOTAL,
    GROUP_PORCTOTAL,
    GROUP_CUSTOMEDIO,
    RELATORIO,
    CONTRATO,
    DTCOMPETDE,
    DTCOMPETATE,
];
static EXAMS: KindSpec = KindSpec {
    report_name: "Estatísticas de Exames",
    store_file: "exames.xlsx",
    header: GROUP_HEADER,
    meta: MetaLayout {
        contract_cells: CONTRACT_CELL,
        period_cells: PERIOD_CELLS,
        period_rule: PeriodRule::Range,
    },
    fields: EXAMS_FIELDS,
    anchor_field: "grupo",
    total_markers: TOTAL_ONLY,
    percent_scale: PercentScale::Points,
    dedup_period_field: "dtcompetde",
    sniff_keywords: &[],
};
static THERAPIES_FIELDS: &[FieldSpec] = &[
    GRUPO,
    GROUP_QTDEVENTOS,
    GROUP_SOBRETOTAL,
    GROUP_VALORLIQUIDO,
    GROUP_INSS,
    GROUP_VALORTOTAL,
    GROUP_PORCTOTAL,
    GROUP_CUSTOMEDIO,
    FieldSpec::column(
        "partibeneficiario",
        &[Resolver::Label(Label::Any(&[
            Label::Contains("partic"),
            Label::Contains("benef"),
        ]))],
        NUMBER,
        StoreType::Float,
    ),
    FieldSpec::column(
        "porcsobretotal",
        &[
            Resolver::AfterField {
                field: "partibeneficiario",
                offset: 1,
                header: PERCENT_SIGN,
            },
            Resolver::CountedLabel {
                label: PERCENT_SIGN,
                min_count: 3,
            },
        ],
        PERCENT,
        StoreType::Percent,
    ),
    RELATORIO,
    CONTRATO,
    DTCOMPETDE,
    DTCOMPETATE,
];
static THERAPIES: KindSpec = KindSpec {
    report_name: "Estatísticas de Terapias",
    store_file: "terapias.xlsx",
    header: GROUP_HEADER,
    meta: MetaLayout {
        contract_cells: CONTRACT_CELL,
        period_cells: PERIOD_CELLS,
        period_rule: PeriodRule::Range,
    },
    fields: THERAPIES_FIELDS,
    anchor_field: "grupo",
    total_markers: TOTAL_ONLY,
    percent_scale: PercentScale::Points,
    dedup_period_field: "dtcompetde",
    sniff_keywords: &[],
};
const NOT_PER_CAPITA: Label = Label::Not(&Label::Contains("capit"));
static LOSS_RATIO_FIELDS: &[FieldSpec] = &[
    FieldSpec::column(
        "competencia",
        &[Resolver::Label(Label::Contains("mes"))],
        ReadAs::Month,
        StoreType::Text,
    ),
    FieldSpec::column(
        "faturamento",
        &[Resolver::Label(Label::All(&[Label::Contains("fatur"), NOT_PER_CAPITA]))],
        NUMBER,
        StoreType::Float,
    ),
    FieldSpec::column(
        "evento",
        &[Resolver::Label(Label::All(&[
            Label::Contains("evento"),
            NOT_PER_CAPITA,
            Label::Not(&PERCENT_SIGN),
        ]))],
        NUMBER,
        StoreType::Float,
    ),
    FieldSpec::column(
        "perc_eventos",
        &[Resolver::Label(Label::All(&[
            Label::Any(&[PERCENT_SIGN, Label::Contains("percent")]),
            Label::Contains("evento"),
        ]))],
        PERCENT,
        StoreType::Percent,
    ),
    FieldSpec::column(
        "numero_vidas",
        &[Resolver::Label(Label::Contains("vida"))],
        NUMBER,
        StoreType::Int,
    ),
    FieldSpec::column(
        "faturamento_per_capita",
        &[Resolver::Label(Label::All(&[Label::Contains("capit"), Label::Contains("fatur")]))],
        NUMBER,
        StoreType::Float,
    ),
    FieldSpec::column(
        "evento_per_capita",
        &[Resolver::Label(Label::All(&[Label::Contains("capit"), Label::Contains("evento")]))],
        NUMBER,
        StoreType::Float,
    ),
    RELATORIO,
    FieldSpec::meta("contrato", FieldSource::Contract, StoreType::Text),
    DTCOMPETDE,
    DTCOMPETATE,
    FieldSpec::meta("periodo_referencia_de", FieldSource::PeriodStart, StoreType::Text),
    FieldSpec::meta("periodo_referencia_ate", FieldSource::PeriodEnd, StoreType::Text),
];
static LOSS_RATIO: KindSpec = KindSpec {
    report_name: "Estatisticas de Sinistralidade",
    store_file: "sinistralidade.xlsx",
    header: HeaderPlan {
        rules: &[HeaderRule::RowMatch {
            scan_rows: usize::MAX,
            required: &[Label::Equals("mes"), Label::Contains("fatur")],
        }],
        fallback_row: None,
    },
    meta: MetaLayout {
        contract_cells: CONTRACT_CELL,
        period_cells: &[],
        period_rule: PeriodRule::MonthYear,
    },
    fields: LOSS_RATIO_FIELDS,
    anchor_field: "competencia",
    total_markers: TOTAL_ONLY,
    percent_scale: PercentScale::Points,
    dedup_period_field: "competencia",
    sniff_keywords: &[],
};
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    #[test]
    fn every_kind_has_meta_columns_and_a_resolvable_anchor() {
        for kind in ReportKind::ALL {
            let spec = kind.spec();
            for name in ["relatorio", "contrato", "dtcompetde", "dtcompetate"] {
                assert!(spec.field_index(name).is_some(), "{kind} lacks {name}");
            }
            assert!(spec.field_index(spec.anchor_field).is_some(), "{kind} anchor");
            assert!(
                spec.field_index(spec.dedup_period_field).is_some(),
                "{kind} dedup field"
            );
        }
    }
    #[test]
    fn field_names_are_unique_per_kind() {
        for kind in ReportKind::ALL {
            let names: Vec<&str> = kind.spec().field_names().collect();
            let unique: HashSet<&str> = names.iter().copied().collect();
            assert_eq!(names.len(), unique.len(), "{kind} has duplicated fields");
            assert!(names.iter().all(|n| !n.is_empty()), "{kind} has a blank field");
        }
    }
    #[test]
    fn relative_resolvers_point_at_earlier_fields() {
        for kind in ReportKind::ALL {
            let spec = kind.spec();
            for (i, field) in spec.fields.iter().enumerate() {
                let FieldSource::Column { resolvers, .. } = field.source else {
                    continue;
                };
                assert!(!resolvers.is_empty(), "{kind}.{} has no resolver", field.name);
                for resolver in resolvers {
                    let target = match *resolver {
                        Resolver::AfterField { field: target, .. }
                        | Resolver::ScanAfterField { field: target, .. } => target,
                        Resolver::Position(_)
                        | Resolver::Label(_)
                        | Resolver::CountedLabel { .. }
                        | Resolver::AnchorOffset(_) => continue,
                    };
                    let target_index = spec.field_index(target);
                    assert!(
                        target_index.is_some_and(|t| t < i),
                        "{kind}.{} refers to {target}",
                        field.name
                    );
                }
            }
        }
    }
    #[test]
    fn store_files_are_distinct() {
        let files: HashSet<&str> = ReportKind::ALL.iter().map(|k| k.spec().store_file).collect();
        assert_eq!(files.len(), ReportKind::ALL.len(), "one store per kind");
    }
}
