use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum IndicatorCategory {
    Economic,
    Demographic,
    Social,
    Environmental,
}

impl IndicatorCategory {
    pub const ALL: [IndicatorCategory; 4] = [
        IndicatorCategory::Economic,
        IndicatorCategory::Demographic,
        IndicatorCategory::Social,
        IndicatorCategory::Environmental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorCategory::Economic => "economic",
            IndicatorCategory::Demographic => "demographic",
            IndicatorCategory::Social => "social",
            IndicatorCategory::Environmental => "environmental",
        }
    }
}

impl std::fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A statistical metric identified by its opaque upstream code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Indicator {
    pub id: String,
    pub name: String,
    pub category: IndicatorCategory,
}

impl Indicator {
    pub fn new(id: &str, name: &str, category: IndicatorCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
        }
    }
}

/// Indicators grouped by category, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct IndicatorCatalog {
    pub economic: Vec<Indicator>,
    pub demographic: Vec<Indicator>,
    pub social: Vec<Indicator>,
    pub environmental: Vec<Indicator>,
}

impl IndicatorCatalog {
    pub fn category(&self, category: IndicatorCategory) -> &[Indicator] {
        match category {
            IndicatorCategory::Economic => &self.economic,
            IndicatorCategory::Demographic => &self.demographic,
            IndicatorCategory::Social => &self.social,
            IndicatorCategory::Environmental => &self.environmental,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        IndicatorCategory::ALL
            .into_iter()
            .flat_map(move |c| self.category(c).iter())
    }

    pub fn find(&self, id: &str) -> Option<&Indicator> {
        self.iter().find(|i| i.id == id)
    }
}
