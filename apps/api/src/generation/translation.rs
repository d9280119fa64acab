//! Military-to-civilian term map fed to every document prompt.

/// Ordered pairs of (Army term, civilian phrasing).
pub const TRANSLATION_MAP: &[(&str, &str)] = &[
    ("Property Book", "Capital Asset Portfolio ($15M+)"),
    ("Hand Receipt", "Custodial Asset Transfer Protocol"),
    ("GCSS-Army", "SAP ERP Systems"),
    ("FLIPL", "Forensic Financial Audit"),
    ("PLL", "Preventive Maintenance Logistics Program"),
    ("CIF", "Central Inventory & Distribution Facility"),
    (
        "CSDP",
        "Command Supply Discipline Program / Internal Compliance Audit",
    ),
    ("PBUSE", "Automated Asset Tracking Systems"),
    ("NCOER", "Performance Evaluation / Annual Review"),
    ("TA-50", "Individual Equipment Accountability Program"),
    ("SSA", "Supply Support Activity / Regional Distribution Hub"),
    ("UBL", "Unit Basic Load / Critical Stock Reserve"),
    ("Class I", "Subsistence & Perishable Inventory"),
    ("Class II", "Administrative & General Supplies"),
    ("Class IV", "Construction & Barrier Materials"),
    ("Class IX", "Repair Parts & Supply Chain Maintenance"),
    ("S4 Shop", "Logistics Operations Center"),
    ("Motor Pool", "Fleet Maintenance Facility"),
    ("Battalion", "Regional Business Unit"),
    ("Brigade", "Divisional Headquarters"),
    ("Company Commander", "Operations Director"),
];

/// Renders the map as `  - K -> V` lines for prompt embedding.
pub fn translation_lines() -> String {
    TRANSLATION_MAP
        .iter()
        .map(|(mil, civ)| format!("  - {mil} -> {civ}"))
        .collect::<Vec<_>>()
        .join("\n")
}
