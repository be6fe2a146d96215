use crate::types::{ExportRow, ExtractedCarbonData};
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};

/// File name for an export performed on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("carbon_metrics_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the extracted KPI list to a CSV file in `dir`.
///
/// Returns `Ok(None)` without touching the filesystem when nothing has
/// been extracted or the KPI list is empty. Rows are written in the
/// original input order, one per KPI, after a header row naming every
/// exported field. The csv writer applies RFC 4180 quoting, so values
/// containing delimiters, quotes or line breaks survive a round trip.
pub fn export_carbon_metrics(
    data: Option<&ExtractedCarbonData>,
    dir: &Path,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let Some(data) = data else {
        return Ok(None);
    };
    if data.carbon_metrics.is_empty() {
        return Ok(None);
    }

    let path = dir.join(export_filename(chrono::Local::now().date_naive()));
    let mut wtr = csv::Writer::from_path(&path)?;
    for kpi in &data.carbon_metrics {
        wtr.serialize(ExportRow::from(kpi))?;
    }
    wtr.flush()?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Kpi, KpiValue};
    use std::fs;

    fn kpi(id: &str, name: &str, value: KpiValue) -> Kpi {
        Kpi {
            id: id.to_string(),
            name: name.to_string(),
            value,
            metric_type: None,
            year: None,
            category_detail: None,
            reference: None,
            qualitative_notes: None,
            methodology_standards: None,
            data_assurance: None,
            policy_name: None,
            commitment_description: None,
            scope_boundary_details: None,
        }
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("kpi_report_tests").join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("test dir");
        dir
    }

    #[test]
    fn filename_is_date_stamped() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(export_filename(date), "carbon_metrics_2024-05-17.csv");
    }

    #[test]
    fn absent_or_empty_data_is_a_no_op() {
        let dir = test_dir("no_op");
        assert!(export_carbon_metrics(None, &dir).unwrap().is_none());
        let empty = ExtractedCarbonData::default();
        assert!(export_carbon_metrics(Some(&empty), &dir).unwrap().is_none());
        let entries = fs::read_dir(&dir).unwrap().count();
        assert_eq!(entries, 0);
    }

    #[test]
    fn awkward_field_values_survive_a_round_trip() {
        let dir = test_dir("round_trip");
        let mut tricky = kpi(
            "k1",
            "Emissions, gross (\"market-based\")",
            KpiValue::Text("1,204 tCO2e".to_string()),
        );
        tricky.qualitative_notes = Some("line one\nline two".to_string());
        tricky.reference = Some("p. 12, table 3".to_string());
        let data = ExtractedCarbonData {
            carbon_metrics: vec![tricky],
        };

        let path = export_carbon_metrics(Some(&data), &dir)
            .unwrap()
            .expect("file written");
        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "k1");
        assert_eq!(&rows[0][1], "Emissions, gross (\"market-based\")");
        assert_eq!(&rows[0][2], "1,204 tCO2e");
        assert_eq!(&rows[0][6], "p. 12, table 3");
        assert_eq!(&rows[0][7], "line one\nline two");
    }

    #[test]
    fn header_names_every_exported_field() {
        let dir = test_dir("header");
        let data = ExtractedCarbonData {
            carbon_metrics: vec![kpi("k1", "Scope 1", KpiValue::Number(9.0))],
        };
        let path = export_carbon_metrics(Some(&data), &dir)
            .unwrap()
            .expect("file written");
        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            headers,
            vec![
                "id",
                "name",
                "value",
                "metric_type",
                "year",
                "category_detail",
                "reference",
                "qualitative_notes",
                "methodology_standards",
                "data_assurance",
                "policy_name",
                "commitment_description",
                "scope_boundary_details",
            ]
        );
    }

    #[test]
    fn export_preserves_input_order_not_classifier_order() {
        let dir = test_dir("order");
        let data = ExtractedCarbonData {
            carbon_metrics: vec![
                kpi("k1", "Employee Count", KpiValue::Number(310.0)),
                kpi("k2", "Scope 2 Emissions", KpiValue::Number(80.0)),
                kpi("k3", "Carbon Intensity", KpiValue::Number(0.4)),
                kpi("k4", "Scope 1 Emissions", KpiValue::Number(120.0)),
            ],
        };
        let path = export_carbon_metrics(Some(&data), &dir)
            .unwrap()
            .expect("file written");
        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let ids: Vec<String> = rdr
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();
        assert_eq!(ids, vec!["k1", "k2", "k3", "k4"]);
    }

    #[test]
    fn missing_optionals_export_as_empty_fields() {
        let dir = test_dir("optionals");
        let data = ExtractedCarbonData {
            carbon_metrics: vec![kpi("k1", "Scope 1", KpiValue::Number(42.0))],
        };
        let path = export_carbon_metrics(Some(&data), &dir)
            .unwrap()
            .expect("file written");
        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let row = rdr.records().next().unwrap().unwrap();
        assert_eq!(&row[2], "42");
        assert_eq!(&row[3], "");
        assert_eq!(&row[4], "");
        assert_eq!(&row[12], "");
    }
}
