//! Professional Tax jurisdiction resolution.
//!
//! Branch labels are free text ("Pune Plant 2", "Bengaluru - Whitefield").
//! This module maps them onto a state by keyword and picks the state's
//! Professional Tax preset, falling back to the configured defaults.

use crate::config::{ProfessionalTaxConfig, PtCycle, PtSlab};
use crate::models::{AuditStep, IndianState};

/// City and state keywords, matched on whole words of the normalized label.
const STATE_KEYWORDS: &[(IndianState, &[&str])] = &[
    (
        IndianState::Maharashtra,
        &[
            "maharashtra",
            "mumbai",
            "navi mumbai",
            "bombay",
            "pune",
            "nagpur",
            "nashik",
            "thane",
            "aurangabad",
            "kolhapur",
            "solapur",
        ],
    ),
    (
        IndianState::Karnataka,
        &[
            "karnataka",
            "bangalore",
            "bengaluru",
            "mysore",
            "mysuru",
            "mangalore",
            "mangaluru",
            "hubli",
        ],
    ),
    (
        IndianState::TamilNadu,
        &[
            "tamil nadu",
            "tamilnadu",
            "chennai",
            "madras",
            "coimbatore",
            "madurai",
            "trichy",
            "tiruchirappalli",
            "salem",
            "hosur",
        ],
    ),
    (
        IndianState::Kerala,
        &[
            "kerala",
            "kochi",
            "cochin",
            "ernakulam",
            "trivandrum",
            "thiruvananthapuram",
            "kozhikode",
            "calicut",
            "thrissur",
        ],
    ),
    (
        IndianState::WestBengal,
        &[
            "west bengal",
            "kolkata",
            "calcutta",
            "howrah",
            "durgapur",
            "siliguri",
        ],
    ),
    (IndianState::Telangana, &["telangana", "hyderabad", "secunderabad", "warangal"]),
    (
        IndianState::AndhraPradesh,
        &[
            "andhra pradesh",
            "andhra",
            "visakhapatnam",
            "vizag",
            "vijayawada",
            "guntur",
            "tirupati",
        ],
    ),
    (
        IndianState::Gujarat,
        &[
            "gujarat",
            "ahmedabad",
            "surat",
            "vadodara",
            "baroda",
            "rajkot",
            "gandhinagar",
        ],
    ),
    (IndianState::MadhyaPradesh, &["madhya pradesh", "indore", "bhopal", "gwalior", "jabalpur"]),
    (IndianState::Odisha, &["odisha", "orissa", "bhubaneswar", "cuttack"]),
    (IndianState::Assam, &["assam", "guwahati"]),
    (IndianState::Meghalaya, &["meghalaya", "shillong"]),
    (IndianState::Jharkhand, &["jharkhand", "ranchi", "jamshedpur"]),
    (IndianState::Bihar, &["bihar", "patna"]),
    (IndianState::Goa, &["goa", "panaji", "margao", "vasco"]),
    (IndianState::Delhi, &["delhi", "new delhi"]),
    (IndianState::Haryana, &["haryana", "gurgaon", "gurugram", "faridabad"]),
    (IndianState::Punjab, &["punjab", "ludhiana", "amritsar", "mohali"]),
    (IndianState::Rajasthan, &["rajasthan", "jaipur", "jodhpur", "udaipur"]),
    (IndianState::UttarPradesh, &["uttar pradesh", "noida", "lucknow", "kanpur", "ghaziabad"]),
];

/// Where the applied Professional Tax rules came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JurisdictionSource {
    /// A state preset matched the branch label.
    StatePreset,
    /// No state matched, or the matched state has no preset.
    Default,
}

/// The Professional Tax rules that apply to an employee.
#[derive(Debug, Clone)]
pub struct Jurisdiction<'a> {
    /// The matched state, if any.
    pub state: Option<IndianState>,
    /// Assessment cycle.
    pub cycle: PtCycle,
    /// Ordered slabs.
    pub slabs: &'a [PtSlab],
    /// Where the rules came from.
    pub source: JurisdictionSource,
}

/// The result of resolving a jurisdiction, including the audit step.
#[derive(Debug, Clone)]
pub struct JurisdictionResult<'a> {
    /// The resolved jurisdiction.
    pub jurisdiction: Jurisdiction<'a>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Matches a free-text branch label to a state.
///
/// Keywords are matched on whole words, case-insensitively, so "Pune" matches
/// "PUNE-Hinjewadi" but "Goa" does not match "Goalpara".
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::match_state;
/// use payroll_engine::models::IndianState;
///
/// assert_eq!(match_state("Bengaluru - Whitefield"), Some(IndianState::Karnataka));
/// assert_eq!(match_state("Head Office"), None);
/// ```
pub fn match_state(branch: &str) -> Option<IndianState> {
    let normalized: String = branch
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let padded = format!(" {} ", normalized.split_whitespace().collect::<Vec<_>>().join(" "));

    STATE_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| padded.contains(&format!(" {} ", keyword)))
        })
        .map(|(state, _)| *state)
}

/// Resolves the Professional Tax rules for a branch label.
pub fn resolve_jurisdiction<'a>(
    branch: &str,
    config: &'a ProfessionalTaxConfig,
    step_number: u32,
) -> JurisdictionResult<'a> {
    let state = match_state(branch);
    let preset = state.and_then(|s| config.preset_for(s));

    let jurisdiction = match preset {
        Some(preset) => Jurisdiction {
            state,
            cycle: preset.cycle,
            slabs: &preset.slabs,
            source: JurisdictionSource::StatePreset,
        },
        None => Jurisdiction {
            state,
            cycle: config.default_cycle,
            slabs: &config.default_slabs,
            source: JurisdictionSource::Default,
        },
    };

    let reasoning = match (state, jurisdiction.source) {
        (Some(s), JurisdictionSource::StatePreset) => {
            format!("Branch '{}' resolved to {}", branch, s.name())
        }
        (Some(s), JurisdictionSource::Default) => format!(
            "Branch '{}' resolved to {} but no preset is configured - using default slabs",
            branch,
            s.name()
        ),
        (None, _) => format!(
            "Branch '{}' matched no known state - using default slabs",
            branch
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pt_jurisdiction".to_string(),
        rule_name: "Professional Tax Jurisdiction".to_string(),
        statute_ref: "Constitution of India, Art. 276".to_string(),
        input: serde_json::json!({ "branch": branch }),
        output: serde_json::json!({
            "state": state.map(|s| s.name()),
            "cycle": jurisdiction.cycle,
            "slab_count": jurisdiction.slabs.len()
        }),
        reasoning,
    };

    JurisdictionResult {
        jurisdiction,
        audit_step,
    }
}
