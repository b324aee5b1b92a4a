//! Baseline laboratory results stored with the patient record.

use serde::{Deserialize, Serialize};

/// Laboratory results. Every value is optional; absent means not done.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcv: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platelets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fbs_rbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gct_gtt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsh: Option<f64>,
    #[serde(default, rename = "rubellaIgG", skip_serializing_if = "Option::is_none")]
    pub rubella_igg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vdrl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hbs_ag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ict: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hba1c: Option<f64>,
}

impl LabResults {
    /// Name and value of every numeric result that has been recorded.
    pub fn recorded_values(&self) -> Vec<(&'static str, f64)> {
        [
            ("Hb", self.hb),
            ("PCV", self.pcv),
            ("Platelets", self.platelets),
            ("FBS/RBS", self.fbs_rbs),
            ("TSH", self.tsh),
            ("HbA1c", self.hba1c),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}
