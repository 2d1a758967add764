use serde::{Deserialize, Serialize};

/// Region label used when the upstream record carries none.
const UNKNOWN_REGION: &str = "Unknown";

/// A sovereign country as served to the front end.
///
/// `id` and `code` carry the same upstream identifier; both are kept because
/// the front end reads either depending on the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Country {
    pub id: String,
    pub code: String,
    pub name: String,
    pub region: String,
    pub capital: String,
}

// Raw record from the upstream /country endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamCountry {
    pub id: String,
    pub name: String,
    pub region: Option<UpstreamLabel>,
    #[serde(rename = "capitalCity")]
    pub capital_city: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamLabel {
    pub value: Option<String>,
}

impl UpstreamCountry {
    /// Convert to the served shape.
    ///
    /// Returns `None` for aggregates ("World", "Euro area", income groups),
    /// which upstream lists alongside real countries but without a capital.
    pub fn to_country(&self) -> Option<Country> {
        let capital = self.capital_city.as_deref().map(str::trim).unwrap_or("");
        if capital.is_empty() {
            return None;
        }

        let region = self
            .region
            .as_ref()
            .and_then(|r| r.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN_REGION);

        Some(Country {
            id: self.id.clone(),
            code: self.id.clone(),
            name: self.name.clone(),
            region: region.to_string(),
            capital: capital.to_string(),
        })
    }
}
