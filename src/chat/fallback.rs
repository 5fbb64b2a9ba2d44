//! Static per-plan coverage tables, substituted when the model output
//! yields no coverage items but plan context was available.

use crate::ingest::Category;

use super::types::CoverageItem;

fn item(facility: &str, service: &str, coverage: &str, details: &str) -> CoverageItem {
    CoverageItem {
        facility: facility.to_string(),
        service: service.to_string(),
        coverage: coverage.to_string(),
        details: details.to_string(),
    }
}

/// Illustrative coverage items for the detected plan; a generic
/// single-item table when no plan was detected.
pub fn fallback_items(category: Option<Category>) -> Vec<CoverageItem> {
    match category {
        Some(Category::Medicare) => vec![
            item(
                "Medicare Part A",
                "Hospital inpatient care",
                "Covered after Part A deductible",
                "Inpatient hospital stays, skilled nursing facility care, and some home health care.",
            ),
            item(
                "Medicare Part B",
                "Outpatient and specialist visits",
                "80% covered after annual deductible",
                "Doctor visits, outpatient care, durable medical equipment, and preventive services.",
            ),
            item(
                "Medicare Part D",
                "Prescription drugs",
                "Copay varies by drug tier",
                "Prescription drug coverage through Medicare-approved private plans.",
            ),
        ],
        Some(Category::AppleCare) => vec![
            item(
                "Primary Care Clinic",
                "Routine and same-day visits",
                "Up to $20 copay per visit",
                "Primary care and same-day appointments covered. Specialist referrals may require an additional copay.",
            ),
            item(
                "Specialist Network",
                "Specialist consultations and diagnostics",
                "80% covered after deductible",
                "Specialist visits and diagnostic tests. Annual deductible: $500.",
            ),
            item(
                "Emergency Room",
                "Emergency care",
                "Fully covered for emergencies",
                "No copay for true emergencies. If admitted, the standard hospital copay applies.",
            ),
        ],
        Some(Category::Health101) => vec![
            item(
                "Hall Health",
                "Primary care",
                "Up to $20 copay per visit",
                "Primary care and same-day appointments for enrolled students.",
            ),
            item(
                "UW Medical Center",
                "Specialist and diagnostic care",
                "80% covered after deductible",
                "Specialist visits, imaging, and lab work. Annual deductible: $500.",
            ),
            item(
                "Urgent Care",
                "Same-day urgent visits",
                "Fully covered for emergencies",
                "Urgent and emergency visits covered; coverage is the same at any ER for true emergencies.",
            ),
        ],
        Some(Category::Other) | None => vec![item(
            "General",
            "Plan information",
            "See plan documents",
            "No plan-specific coverage details were found for this question.",
        )],
    }
}
