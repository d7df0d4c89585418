//! Tax-form templates: per form type, the identifying phrases
//! and the labeled fields to extract. Templates are embedded literals,
//! compiled once behind a `LazyLock`, mirroring the reference tables in
//! `retirement_core::reference`.

use crate::model::FormType;
use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Currency,
    Code,
}

pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub box_number: Option<&'static str>,
    pub label_patterns: &'static [&'static str],
    pub value_type: ValueType,
    pub required: bool,
}

pub struct FormTemplate {
    pub form_type: FormType,
    pub form_identifiers: &'static [&'static str],
    pub fields: &'static [FieldSpec],
}

macro_rules! field {
    ($key:expr, $label:expr, $box:expr, $patterns:expr, $value_type:expr, $required:expr) => {
        FieldSpec {
            key: $key,
            label: $label,
            box_number: $box,
            label_patterns: $patterns,
            value_type: $value_type,
            required: $required,
        }
    };
}

static W2_FIELDS: &[FieldSpec] = &[
    field!("wages", "Wages, tips, other compensation", Some("1"), &["[Ww]ages,? tips"], ValueType::Currency, true),
    field!(
        "federal_withheld",
        "Federal income tax withheld",
        Some("2"),
        &["[Ff]ederal income tax withheld"],
        ValueType::Currency,
        true
    ),
    field!(
        "state_withheld",
        "State income tax",
        Some("17"),
        &["[Ss]tate income tax"],
        ValueType::Currency,
        false
    ),
];

static FORM_1099_INT_FIELDS: &[FieldSpec] = &[field!(
    "interest",
    "Interest income",
    Some("1"),
    &["[Ii]nterest [Ii]ncome"],
    ValueType::Currency,
    true
)];

static FORM_1099_DIV_FIELDS: &[FieldSpec] = &[
    field!("dividends", "Total ordinary dividends", Some("1a"), &["[Tt]otal ordinary dividends"], ValueType::Currency, true),
    field!(
        "qualified_dividends",
        "Qualified dividends",
        Some("1b"),
        &["[Qq]ualified dividends"],
        ValueType::Currency,
        false
    ),
    field!(
        "capital_gain_distributions",
        "Total capital gain distr.",
        Some("2a"),
        &["[Tt]otal capital gain distr"],
        ValueType::Currency,
        false
    ),
];

static FORM_1099_R_FIELDS: &[FieldSpec] = &[
    field!(
        "gross_distribution",
        "Gross distribution",
        Some("1"),
        &["[Gg]ross distribution"],
        ValueType::Currency,
        true
    ),
    field!(
        "taxable_amount",
        "Taxable amount",
        Some("2a"),
        &["[Tt]axable amount"],
        ValueType::Currency,
        true
    ),
    field!(
        "distribution_code",
        "Distribution code",
        Some("7"),
        &["[Dd]istribution code"],
        ValueType::Code,
        false
    ),
];

static FORM_1099_B_FIELDS: &[FieldSpec] = &[
    field!("proceeds", "Proceeds", Some("1d"), &["[Pp]roceeds"], ValueType::Currency, true),
    field!("cost_basis", "Cost basis", Some("1e"), &["[Cc]ost basis"], ValueType::Currency, false),
    field!(
        "gain_loss",
        "Gain or loss",
        None,
        &["[Gg]ain or loss", "[Gg]ain/loss"],
        ValueType::Currency,
        false
    ),
];

static FORM_1099_MISC_FIELDS: &[FieldSpec] = &[
    field!("rents", "Rents", Some("1"), &["[Rr]ents"], ValueType::Currency, false),
    field!(
        "other_income",
        "Other income",
        Some("3"),
        &["[Oo]ther income"],
        ValueType::Currency,
        false
    ),
];

static FORM_1099_NEC_FIELDS: &[FieldSpec] = &[field!(
    "nonemployee_compensation",
    "Nonemployee compensation",
    Some("1"),
    &["[Nn]onemployee compensation"],
    ValueType::Currency,
    true
)];

static FORM_1098_FIELDS: &[FieldSpec] = &[field!(
    "mortgage_interest",
    "Mortgage interest received",
    Some("1"),
    &["[Mm]ortgage interest received"],
    ValueType::Currency,
    true
)];

static FORM_K1_FIELDS: &[FieldSpec] = &[
    field!("interest_income", "Interest income", Some("5"), &["[Ii]nterest income"], ValueType::Currency, false),
    field!("ordinary_dividends", "Ordinary dividends", Some("6a"), &["[Oo]rdinary dividends"], ValueType::Currency, false),
    field!("qualified_dividends", "Qualified dividends", Some("6b"), &["[Qq]ualified dividends"], ValueType::Currency, false),
    field!("net_rental_income", "Net rental real estate income", Some("2"), &["[Nn]et rental real estate income"], ValueType::Currency, false),
    field!("ordinary_business_income", "Ordinary business income", Some("1"), &["[Oo]rdinary business income"], ValueType::Currency, false),
    field!("net_short_term_gain", "Net short-term capital gain", Some("8"), &["[Nn]et short.term capital gain"], ValueType::Currency, false),
    field!("net_long_term_gain", "Net long-term capital gain", Some("9a"), &["[Nn]et long.term capital gain"], ValueType::Currency, false),
];

pub static TEMPLATES: &[FormTemplate] = &[
    FormTemplate {
        form_type: FormType::W2,
        form_identifiers: &["Form W-2", "Wage and Tax Statement"],
        fields: W2_FIELDS,
    },
    FormTemplate {
        form_type: FormType::Form1099Int,
        form_identifiers: &["Form 1099-INT", "Interest Income"],
        fields: FORM_1099_INT_FIELDS,
    },
    FormTemplate {
        form_type: FormType::Form1099Div,
        form_identifiers: &["Form 1099-DIV", "Dividends and Distributions"],
        fields: FORM_1099_DIV_FIELDS,
    },
    FormTemplate {
        form_type: FormType::Form1099R,
        form_identifiers: &["Form 1099-R", "Distributions From Pensions"],
        fields: FORM_1099_R_FIELDS,
    },
    FormTemplate {
        form_type: FormType::Form1099B,
        form_identifiers: &["Form 1099-B", "Proceeds From Broker"],
        fields: FORM_1099_B_FIELDS,
    },
    FormTemplate {
        form_type: FormType::Form1099Misc,
        form_identifiers: &["Form 1099-MISC", "Miscellaneous Income"],
        fields: FORM_1099_MISC_FIELDS,
    },
    FormTemplate {
        form_type: FormType::Form1099Nec,
        form_identifiers: &["Form 1099-NEC", "Nonemployee Compensation"],
        fields: FORM_1099_NEC_FIELDS,
    },
    FormTemplate {
        form_type: FormType::Form1098,
        form_identifiers: &["Form 1098", "Mortgage Interest Statement"],
        fields: FORM_1098_FIELDS,
    },
    FormTemplate {
        form_type: FormType::FormK1,
        form_identifiers: &["Schedule K-1", "Partner's Share of"],
        fields: FORM_K1_FIELDS,
    },
];

pub static COMPILED_LABEL_PATTERNS: LazyLock<Vec<Vec<Vec<Regex>>>> = LazyLock::new(|| {
    TEMPLATES
        .iter()
        .map(|template| {
            template
                .fields
                .iter()
                .map(|field| {
                    field
                        .label_patterns
                        .iter()
                        .map(|p| Regex::new(p).expect("template regex is a fixed literal"))
                        .collect()
                })
                .collect()
        })
        .collect()
});
