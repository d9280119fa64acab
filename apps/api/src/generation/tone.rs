//! Industry tone calibration: the language guidance and section naming each
//! target industry gets in the document prompts.

use crate::models::Industry;

/// Prompt guidance tied to one target industry.
#[derive(Debug, Clone, Copy)]
pub struct ToneGuide {
    /// Free-text instructions embedded in the context block.
    pub guidance: &'static str,
    /// Header of the resume's project section.
    pub project_header: &'static str,
}

/// Returns the tone guide for a target industry.
pub fn tone_guide(industry: Industry) -> ToneGuide {
    match industry {
        Industry::Corporate => ToneGuide {
            guidance: "Use business-neutral corporate language. Emphasize ROI, cost savings, efficiency, \
                and operational excellence. Avoid military jargon entirely. \
                If the role is Entry/Mid-level (Buyer, Specialist, Coordinator), use OPERATIONAL verbs: \
                'Executed,' 'Processed,' 'Maintained,' 'Resolved.' \
                If the role is Senior (Director, VP), use STRATEGIC verbs: 'Directed,' 'Spearheaded,' 'Optimized.'",
            project_header: "KEY STRATEGIC INITIATIVES",
        },
        Industry::DefenseContractor => ToneGuide {
            guidance: "Use defense/aerospace industry language. Reference security clearances, ITAR, DFARS, \
                government contracts, and controlled inventory. Emphasize Warfighter Readiness, \
                Production Speed, Mission Assurance, and Accelerated Procurement per 2026 Executive Order priorities. \
                Military familiarity is expected but translate MOS-specific jargon.",
            project_header: "KEY MILITARY PROJECTS",
        },
        Industry::Federal => ToneGuide {
            guidance: "Use federal resume conventions. Be VERBOSE and THOROUGH. Include '40 Hours/Week' for each position. \
                Use KSA-style detail. Match OPM qualification standards language. \
                Include supervisor name/phone placeholders. This resume should be 3-5 pages, not 1-2.",
            project_header: "RELEVANT PROJECT EXPERIENCE",
        },
        Industry::TechSaas => ToneGuide {
            guidance: "Use tech industry language. Emphasize data-driven decisions, automation, scalability, \
                agile methodology, cross-functional collaboration, and customer success. \
                Frame supply chain as 'Operations Management.' Keep it modern and concise.",
            project_header: "MAJOR OPERATIONS PROJECTS",
        },
    }
}
