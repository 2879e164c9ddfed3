//! Keyword-based legal area classification

/// Area assigned when no keyword matches
pub const DEFAULT_LEGAL_AREA: &str = "general";

/// Ordered (area, keywords) table. The first area with a keyword contained in
/// the query wins, so more specific areas are listed before broader ones.
pub const LEGAL_AREA_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "employment",
        &[
            "employment",
            "employer",
            "employee",
            "minimum wage",
            "wage",
            "salary",
            "labour",
            "labor",
            "dismissal",
            "redundancy",
            "maternity",
            "working hours",
        ],
    ),
    (
        "company",
        &[
            "company",
            "companies",
            "director",
            "shareholder",
            "incorporation",
            "business registration",
            "partnership",
        ],
    ),
    (
        "land",
        &[
            "land",
            "title deed",
            "property",
            "lease",
            "tenant",
            "landlord",
            "eviction",
        ],
    ),
    (
        "family",
        &[
            "marriage",
            "divorce",
            "custody",
            "child",
            "succession",
            "inheritance",
            "will",
        ],
    ),
    (
        "criminal",
        &[
            "criminal",
            "offence",
            "offense",
            "arrest",
            "bail",
            "police",
            "sentence",
        ],
    ),
    (
        "constitutional",
        &["constitution", "constitutional", "bill of rights", "fundamental rights"],
    ),
    ("tax", &["tax", "vat", "kra", "customs duty"]),
];

/// Classify a normalized query into a legal area
pub fn classify_legal_area(normalized_query: &str) -> &'static str {
    LEGAL_AREA_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| normalized_query.contains(kw)))
        .map(|(area, _)| *area)
        .unwrap_or(DEFAULT_LEGAL_AREA)
}
