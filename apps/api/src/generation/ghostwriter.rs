//! Ghostwriter logic: skills inferred from pay grade when the candidate's own
//! data is thin or misses a JD requirement.

use crate::models::Rank;

/// Skills a top performer at the given grade is expected to have.
pub fn inferred_skills(rank: Rank) -> &'static [&'static str] {
    match rank {
        Rank::E4 => &[
            "Data Accuracy & Record Integrity",
            "Technical Execution of Standard Operating Procedures",
            "Inventory Control & Cycle Count Operations",
            "ERP Data Entry & Transaction Processing",
        ],
        Rank::E5 => &[
            "Team Leadership (10-20 personnel)",
            "Training Program Development",
            "Risk Assessment & Mitigation",
            "Budget Oversight ($2M-$5M)",
            "Customer/Stakeholder Liaison",
        ],
        Rank::E6 => &[
            "Team Leadership (20+ personnel)",
            "Training Program Development & Execution",
            "Operational Risk Management",
            "Budget Administration ($5M-$10M)",
            "Cross-Functional Stakeholder Management",
            "Process Improvement Initiatives",
            "Customer Service & Internal Liaison",
        ],
        Rank::E7 => &[
            "Strategic Planning & Organizational Oversight",
            "Audit & Compliance Program Management",
            "Policy Development & Implementation",
            "Budget Authority ($10M-$15M+)",
            "Senior Stakeholder Advisory",
            "Workforce Development Strategy",
        ],
        Rank::E8 => &[
            "Enterprise-Level Strategic Operations",
            "Inspector General-Level Audit Oversight",
            "Organizational Policy Architecture",
            "Executive Budget Authority ($15M+)",
            "C-Suite Advisory & Cross-Org Coordination",
        ],
    }
}

pub fn skill_lines(rank: Rank) -> String {
    inferred_skills(rank)
        .iter()
        .map(|s| format!("  - {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}
