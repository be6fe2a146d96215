use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tabled::Tabled;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawExtract {
    pub carbon_metrics: Option<Vec<RawKpi>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawKpi {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub value: Option<Value>,
    pub metric_type: Option<Value>,
    pub year: Option<Value>,
    pub category_detail: Option<Value>,
    pub reference: Option<Value>,
    pub qualitative_notes: Option<Value>,
    pub methodology_standards: Option<Value>,
    pub data_assurance: Option<Value>,
    pub policy_name: Option<Value>,
    pub commitment_description: Option<Value>,
    pub scope_boundary_details: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KpiValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for KpiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KpiValue::Number(n) => write!(f, "{}", n),
            KpiValue::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Kpi {
    pub id: String,
    pub name: String,
    pub value: KpiValue,
    pub metric_type: Option<String>,
    pub year: Option<i32>,
    pub category_detail: Option<String>,
    pub reference: Option<String>,
    pub qualitative_notes: Option<String>,
    pub methodology_standards: Option<String>,
    pub data_assurance: Option<String>,
    pub policy_name: Option<String>,
    pub commitment_description: Option<String>,
    pub scope_boundary_details: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractedCarbonData {
    pub carbon_metrics: Vec<Kpi>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ExportRow {
    pub id: String,
    pub name: String,
    pub value: String,
    pub metric_type: Option<String>,
    pub year: Option<i32>,
    pub category_detail: Option<String>,
    pub reference: Option<String>,
    pub qualitative_notes: Option<String>,
    pub methodology_standards: Option<String>,
    pub data_assurance: Option<String>,
    pub policy_name: Option<String>,
    pub commitment_description: Option<String>,
    pub scope_boundary_details: Option<String>,
}

impl From<&Kpi> for ExportRow {
    fn from(kpi: &Kpi) -> Self {
        ExportRow {
            id: kpi.id.clone(),
            name: kpi.name.clone(),
            value: kpi.value.to_string(),
            metric_type: kpi.metric_type.clone(),
            year: kpi.year,
            category_detail: kpi.category_detail.clone(),
            reference: kpi.reference.clone(),
            qualitative_notes: kpi.qualitative_notes.clone(),
            methodology_standards: kpi.methodology_standards.clone(),
            data_assurance: kpi.data_assurance.clone(),
            policy_name: kpi.policy_name.clone(),
            commitment_description: kpi.commitment_description.clone(),
            scope_boundary_details: kpi.scope_boundary_details.clone(),
        }
    }
}

#[derive(Debug, Tabled, Clone)]
pub struct KpiTableRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "KPI Name")]
    pub name: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Metric Type")]
    pub metric_type: String,
    #[tabled(rename = "Year")]
    pub year: String,
}

impl From<&Kpi> for KpiTableRow {
    fn from(kpi: &Kpi) -> Self {
        KpiTableRow {
            id: kpi.id.clone(),
            name: kpi.name.clone(),
            value: kpi.value.to_string(),
            metric_type: kpi.metric_type.clone().unwrap_or_default(),
            year: kpi
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}
