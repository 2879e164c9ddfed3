//! Seed answers loaded on first initialization

use crate::domain::legal_cache::LegalResponse;

const PRELOAD_MODEL: &str = "preload";

/// A seed question with its answer and legal area
#[derive(Debug, Clone)]
pub struct PreloadEntry {
    pub query: &'static str,
    pub response: LegalResponse,
    pub legal_area: &'static str,
}

impl PreloadEntry {
    fn new(query: &'static str, legal_area: &'static str, answer: &str, source: &str) -> Self {
        Self {
            query,
            response: LegalResponse::new(answer)
                .with_success(true)
                .with_confidence(0.9)
                .with_model_used(PRELOAD_MODEL)
                .with_sources(vec![source.to_string()])
                .with_query_type("statutory"),
            legal_area,
        }
    }
}

/// Frequently asked questions with settled statutory answers
pub fn preload_entries() -> Vec<PreloadEntry> {
    vec![
        PreloadEntry::new(
            "How do I register a company in Kenya?",
            "company",
            "Companies are registered with the Registrar of Companies under the Companies Act, 2015. \
             Reserve a name, file the application with the constitution of the company and the \
             particulars of directors and shareholders, then pay the prescribed fee to receive a \
             certificate of incorporation.",
            "Companies Act, 2015",
        ),
        PreloadEntry::new(
            "What are the legal requirements for marriage in Kenya?",
            "family",
            "Under the Marriage Act, 2014 both parties must be at least eighteen years old, must \
             consent freely, must not be within the prohibited degrees of relationship and the \
             marriage must be registered. Civil, Christian, Hindu, Islamic and customary marriages \
             are all recognised.",
            "Marriage Act, 2014",
        ),
        PreloadEntry::new(
            "How is land ownership transferred in Kenya?",
            "land",
            "Transfers are governed by the Land Registration Act, 2012. The parties execute a \
             transfer instrument, obtain land control board consent where the land is agricultural, \
             pay stamp duty and lodge the transfer at the land registry for registration of the \
             new proprietor.",
            "Land Registration Act, 2012",
        ),
        PreloadEntry::new(
            "What are the maximum working hours under Kenyan law?",
            "employment",
            "The Employment Act, 2007 and the Regulation of Wages (General) Order set normal working \
             hours at fifty-two hours a week for most employees, with at least one rest day in every \
             period of seven days. Work beyond normal hours is paid as overtime.",
            "Employment Act, 2007",
        ),
    ]
}
