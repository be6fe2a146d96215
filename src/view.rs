// Console rendering of the categorized KPI report.
//
// Expand/collapse state is local view state: two sets of open identifiers
// (sections and rows) mutated by toggle events. Rendering is a pure
// function of the classifier output and that state, so `main` only prints.
use crate::classify::Classified;
use crate::types::{Kpi, KpiTableRow};
use std::collections::HashSet;
use tabled::{settings::Style, Table};

pub const SECTION_SCOPE: &str = "scope-emissions";
pub const SECTION_GHG: &str = "ghg-metrics";
pub const SECTION_OTHER: &str = "other-metrics";

pub const EMPTY_STATE_HEADLINE: &str = "No Specific Carbon Accounting KPIs Found";
pub const EMPTY_CATEGORY_MSG: &str = "No KPIs extracted for this category.";
pub const NO_DETAILS_MSG: &str = "(no further detail recorded)";

#[derive(Debug, Default, Clone)]
pub struct ViewState {
    open_sections: HashSet<String>,
    open_details: HashSet<String>,
}

impl ViewState {
    /// Default expansion: the scope and GHG sections open, plus the first
    /// scope bucket.
    pub fn with_defaults(classified: &Classified) -> Self {
        let mut open_sections: HashSet<String> = HashSet::new();
        open_sections.insert(SECTION_SCOPE.to_string());
        open_sections.insert(SECTION_GHG.to_string());
        if let Some(first) = classified.scope_emissions.first() {
            open_sections.insert(first.label.clone());
        }
        ViewState {
            open_sections,
            open_details: HashSet::new(),
        }
    }

    /// Flip a section's expanded state. Returns `true` if it is now open.
    pub fn toggle_section(&mut self, id: &str) -> bool {
        toggle(&mut self.open_sections, id)
    }

    /// Flip a row's detail panel. Returns `true` if it is now open.
    pub fn toggle_details(&mut self, id: &str) -> bool {
        toggle(&mut self.open_details, id)
    }

    pub fn is_section_open(&self, id: &str) -> bool {
        self.open_sections.contains(id)
    }

    pub fn is_details_open(&self, id: &str) -> bool {
        self.open_details.contains(id)
    }
}

fn toggle(set: &mut HashSet<String>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_string());
        true
    }
}

pub fn render(classified: &Classified, state: &ViewState) -> String {
    if classified.is_empty() {
        return format!(
            "{}\n\n\
             The analysis could not identify specific Carbon Accounting Key\n\
             Performance Indicators. Consider revising the input text or ensure\n\
             it contains clear, quantifiable carbon data.\n",
            EMPTY_STATE_HEADLINE
        );
    }

    let mut out = String::new();
    out.push_str("Extracted Carbon Metrics\n");
    out.push_str("Review the categorized KPIs extracted from the document.\n\n");

    section_header(&mut out, state, SECTION_SCOPE, "Scope Emissions", 0);
    if state.is_section_open(SECTION_SCOPE) {
        if classified.scope_emissions.is_empty() {
            out.push_str(EMPTY_CATEGORY_MSG);
            out.push_str("\n\n");
        }
        for bucket in &classified.scope_emissions {
            section_header(&mut out, state, &bucket.label, &bucket.label, 1);
            if state.is_section_open(&bucket.label) {
                kpi_table(&mut out, state, &bucket.kpis);
            }
        }
    }

    section_header(&mut out, state, SECTION_GHG, "GHG & Carbon Intensity Metrics", 0);
    if state.is_section_open(SECTION_GHG) {
        kpi_table(&mut out, state, &classified.ghg_metrics);
    }

    section_header(&mut out, state, SECTION_OTHER, "Other Extracted Metrics", 0);
    if state.is_section_open(SECTION_OTHER) {
        kpi_table(&mut out, state, &classified.other_metrics);
    }

    out
}

fn section_header(out: &mut String, state: &ViewState, id: &str, title: &str, depth: usize) {
    let marker = if state.is_section_open(id) { "[-]" } else { "[+]" };
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} {} (toggle: {})\n\n", marker, title, id));
}

fn kpi_table(out: &mut String, state: &ViewState, kpis: &[Kpi]) {
    if kpis.is_empty() {
        out.push_str(EMPTY_CATEGORY_MSG);
        out.push_str("\n\n");
        return;
    }
    let rows: Vec<KpiTableRow> = kpis.iter().map(KpiTableRow::from).collect();
    out.push_str(&Table::new(rows).with(Style::markdown()).to_string());
    out.push_str("\n\n");
    for kpi in kpis {
        if state.is_details_open(&kpi.id) {
            detail_panel(out, kpi);
        }
    }
}

fn detail_panel(out: &mut String, kpi: &Kpi) {
    out.push_str(&format!("Details: {} ({})\n", kpi.name, kpi.id));
    let mut any = false;
    if let Some(reference) = &kpi.reference {
        out.push_str(&format!("  Reference: \"{}\"\n", reference));
        any = true;
    }
    let labelled = [
        ("Notes", &kpi.qualitative_notes),
        ("Methodology", &kpi.methodology_standards),
        ("Assurance", &kpi.data_assurance),
        ("Policy", &kpi.policy_name),
        ("Commitment", &kpi.commitment_description),
        ("Scope/Boundary", &kpi.scope_boundary_details),
    ];
    for (label, field) in labelled {
        if let Some(text) = field {
            out.push_str(&format!("  {}: {}\n", label, text));
            any = true;
        }
    }
    if !any {
        out.push_str(&format!("  {}\n", NO_DETAILS_MSG));
    }
    out.push('\n');
}
