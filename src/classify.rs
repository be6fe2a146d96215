use crate::types::{ExtractedCarbonData, Kpi};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static SCOPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)scope\s*(\d{1,2}(?:\.\d{1,2})?)").expect("valid scope regex"));
static INTENSITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)intensity").expect("valid intensity regex"));
static GHG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)ghg|carbon").expect("valid ghg regex"));

#[derive(Debug, Clone)]
pub struct ScopeBucket {
    pub label: String,
    pub kpis: Vec<Kpi>,
}

#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub scope_emissions: Vec<ScopeBucket>,
    pub ghg_metrics: Vec<Kpi>,
    pub other_metrics: Vec<Kpi>,
}

impl Classified {
    pub fn is_empty(&self) -> bool {
        self.scope_emissions.is_empty()
            && self.ghg_metrics.is_empty()
            && self.other_metrics.is_empty()
    }
}

pub fn classify(data: Option<&ExtractedCarbonData>) -> Classified {
    match data {
        Some(data) => classify_kpis(&data.carbon_metrics),
        None => Classified::default(),
    }
}

/// Partition KPIs into scope buckets, GHG/intensity metrics and the rest.
///
/// The scope check runs first: a KPI whose text names both a scope and
/// "intensity" lands in the scope bucket. Matching looks at the KPI name
/// and the category detail hint together. Within each bucket the input
/// order is preserved; buckets are ordered by the numeric value of the
/// captured scope number ("Scope 10" sorts after "Scope 2").
pub fn classify_kpis(kpis: &[Kpi]) -> Classified {
    let mut buckets: Vec<ScopeBucket> = Vec::new();
    let mut ghg_metrics: Vec<Kpi> = Vec::new();
    let mut other_metrics: Vec<Kpi> = Vec::new();

    for kpi in kpis {
        let mut combined = kpi.name.to_lowercase();
        if let Some(detail) = &kpi.category_detail {
            combined.push(' ');
            combined.push_str(&detail.to_lowercase());
        }

        if let Some(caps) = SCOPE_RE.captures(&combined) {
            let label = format!("Scope {}", &caps[1]);
            match buckets.iter_mut().find(|b| b.label == label) {
                Some(bucket) => bucket.kpis.push(kpi.clone()),
                None => buckets.push(ScopeBucket {
                    label,
                    kpis: vec![kpi.clone()],
                }),
            }
        } else if INTENSITY_RE.is_match(&combined) || GHG_RE.is_match(&combined) {
            ghg_metrics.push(kpi.clone());
        } else {
            other_metrics.push(kpi.clone());
        }
    }

    // Stable sort, so labels that parse to the same number ("Scope 1" and
    // "Scope 1.0" stay distinct buckets) keep first-appearance order.
    buckets.sort_by(|a, b| {
        scope_number(&a.label)
            .partial_cmp(&scope_number(&b.label))
            .unwrap_or(Ordering::Equal)
    });

    Classified {
        scope_emissions: buckets,
        ghg_metrics,
        other_metrics,
    }
}

fn scope_number(label: &str) -> f64 {
    label
        .trim_start_matches("Scope ")
        .parse::<f64>()
        .unwrap_or(0.0)
}
