use serde::{Deserialize, Serialize};

use ehsrbac_core::EstablishmentId;

/// An OSHA-registered physical location that can carry its own overlay of
/// OSHA permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Establishment {
    pub id: EstablishmentId,
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub establishment_number: Option<String>,
}

impl Establishment {
    pub fn new(
        id: impl Into<EstablishmentId>,
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: city.into(),
            state: state.into(),
            establishment_number: None,
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.establishment_number = Some(number.into());
        self
    }
}
