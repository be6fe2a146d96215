use crate::types::{ExtractedCarbonData, Kpi, RawExtract};
use crate::util::{kpi_value_from_value, string_from_value, year_from_value};
use std::error::Error;
use std::fs;

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_records: usize,
    pub loaded_records: usize,
    pub skipped_records: usize,
    pub synthesized_ids: usize,
}

pub fn load_extract(path: &str) -> Result<(ExtractedCarbonData, LoadReport), Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let raw: RawExtract = serde_json::from_str(&text)?;
    Ok(clean_records(raw))
}

pub fn clean_records(raw: RawExtract) -> (ExtractedCarbonData, LoadReport) {
    let raw_metrics = raw.carbon_metrics.unwrap_or_default();
    let total_records = raw_metrics.len();
    let mut skipped_records = 0usize;
    let mut synthesized_ids = 0usize;
    let mut carbon_metrics: Vec<Kpi> = Vec::new();

    for (idx, row) in raw_metrics.into_iter().enumerate() {
        // name and value are the only required fields; everything else
        // degrades to absent.
        let Some(name) = string_from_value(row.name.as_ref()) else {
            skipped_records += 1;
            continue;
        };
        let Some(value) = kpi_value_from_value(row.value.as_ref()) else {
            skipped_records += 1;
            continue;
        };

        // Records without a usable id get a positional one so the display
        // and detail toggles still have a stable key.
        let id = match string_from_value(row.id.as_ref()) {
            Some(id) => id,
            None => {
                synthesized_ids += 1;
                format!("kpi-{}", idx + 1)
            }
        };

        carbon_metrics.push(Kpi {
            id,
            name,
            value,
            metric_type: string_from_value(row.metric_type.as_ref()),
            year: year_from_value(row.year.as_ref()),
            category_detail: string_from_value(row.category_detail.as_ref()),
            reference: string_from_value(row.reference.as_ref()),
            qualitative_notes: string_from_value(row.qualitative_notes.as_ref()),
            methodology_standards: string_from_value(row.methodology_standards.as_ref()),
            data_assurance: string_from_value(row.data_assurance.as_ref()),
            policy_name: string_from_value(row.policy_name.as_ref()),
            commitment_description: string_from_value(row.commitment_description.as_ref()),
            scope_boundary_details: string_from_value(row.scope_boundary_details.as_ref()),
        });
    }

    let loaded_records = carbon_metrics.len();
    let report = LoadReport {
        total_records,
        loaded_records,
        skipped_records,
        synthesized_ids,
    };
    (ExtractedCarbonData { carbon_metrics }, report)
}
