//! Indian states and union territories that levy or exempt Professional Tax.

use serde::{Deserialize, Serialize};

/// A state or union territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndianState {
    /// Andhra Pradesh.
    AndhraPradesh,
    /// Assam.
    Assam,
    /// Bihar.
    Bihar,
    /// Delhi.
    Delhi,
    /// Goa.
    Goa,
    /// Gujarat.
    Gujarat,
    /// Haryana.
    Haryana,
    /// Jharkhand.
    Jharkhand,
    /// Karnataka.
    Karnataka,
    /// Kerala.
    Kerala,
    /// Madhya Pradesh.
    MadhyaPradesh,
    /// Maharashtra.
    Maharashtra,
    /// Meghalaya.
    Meghalaya,
    /// Odisha.
    Odisha,
    /// Punjab.
    Punjab,
    /// Rajasthan.
    Rajasthan,
    /// Tamil Nadu.
    TamilNadu,
    /// Telangana.
    Telangana,
    /// Uttar Pradesh.
    UttarPradesh,
    /// West Bengal.
    WestBengal,
}

impl IndianState {
    /// Display name of the state.
    pub fn name(self) -> &'static str {
        match self {
            IndianState::AndhraPradesh => "Andhra Pradesh",
            IndianState::Assam => "Assam",
            IndianState::Bihar => "Bihar",
            IndianState::Delhi => "Delhi",
            IndianState::Goa => "Goa",
            IndianState::Gujarat => "Gujarat",
            IndianState::Haryana => "Haryana",
            IndianState::Jharkhand => "Jharkhand",
            IndianState::Karnataka => "Karnataka",
            IndianState::Kerala => "Kerala",
            IndianState::MadhyaPradesh => "Madhya Pradesh",
            IndianState::Maharashtra => "Maharashtra",
            IndianState::Meghalaya => "Meghalaya",
            IndianState::Odisha => "Odisha",
            IndianState::Punjab => "Punjab",
            IndianState::Rajasthan => "Rajasthan",
            IndianState::TamilNadu => "Tamil Nadu",
            IndianState::Telangana => "Telangana",
            IndianState::UttarPradesh => "Uttar Pradesh",
            IndianState::WestBengal => "West Bengal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_serialization() {
        assert_eq!(
            serde_json::to_string(&IndianState::TamilNadu).unwrap(),
            "\"tamil_nadu\""
        );
        let state: IndianState = serde_json::from_str("\"west_bengal\"").unwrap();
        assert_eq!(state, IndianState::WestBengal);
    }

    #[test]
    fn test_state_name() {
        assert_eq!(IndianState::MadhyaPradesh.name(), "Madhya Pradesh");
    }
}
