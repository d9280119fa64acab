// All LLM prompt templates for the Generation module.
// Placeholders are filled by `llm_client::prompts::render_template`.

/// Keyword extraction ("Mirror Protocol").
/// Replace: {json_array_only}, {job_description}
pub const KEYWORDS_PROMPT_TEMPLATE: &str = r#"You are an expert ATS analyst.

Extract the 10-15 most important requirements, skills, and keywords from this job description.
Include BOTH hard skills AND soft skills (like Customer Service, Communication, Analytical Skills).
Prioritize skills that appear multiple times or are listed under "Required" / "Must Have."

{json_array_only}
Order from most critical to least.

Example: ["Supply Chain Management", "SAP ERP", "Customer Service", "Vendor Negotiation"]

JOB DESCRIPTION:
{job_description}"#;

/// Shared candidate/target context embedded in every document prompt.
/// Replace: {rank}, {years}, {experience}, {title}, {industry}, {tone},
///          {keywords}, {translations}, {rank_code}, {ghostwriter}
pub const CONTEXT_BLOCK_TEMPLATE: &str = r#"CANDIDATE PROFILE:
  Rank: {rank}
  Years of Service: {years}
  Raw Experience Data:
  ---
  {experience}
  ---

TARGET POSITION:
  Title: {title}
  Industry: {industry}
  Industry Tone: {tone}

CONFIRMED JD KEYWORDS TO MIRROR (address ALL of these):
{keywords}

MILITARY-TO-CIVILIAN TRANSLATIONS:
{translations}

GHOSTWRITER INFERRED SKILLS FOR {rank_code} (use if candidate data is thin or missing a JD requirement):
{ghostwriter}"#;

/// Stand-in experience when the candidate supplied nothing.
/// Replace: {rank}, {years}
pub const NO_DATA_TEMPLATE: &str = "[NO DATA PROVIDED. Generate from scratch for {rank} with {years} years of 92Y service. Assume top 10% performer.]";

/// Resume generation.
/// Replace: {context}, {title}, {rank}, {project_header}, {no_preamble}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"You are a Career Architect for U.S. Army 92Y veterans.

{context}

RESUME RULES:

1. THE NO-REPEAT PROTOCOL:
   - CORE COMPETENCIES: Short keyword phrases with brief context.
     Example: "Vendor Negotiation: Managed $5M contracts across 15 suppliers."
   - PROFESSIONAL EXPERIENCE: Detailed STAR-method bullets with different wording.
     Example: "Negotiated with 15 external vendors during a supply chain disruption, reducing costs by 20%."
   - The same skill may appear in both sections, but the LANGUAGE must be completely different.

2. SENIORITY CALIBRATION:
   - If the target role is Entry/Mid-level (Buyer, Specialist, Coordinator, Analyst):
     Use operational verbs: Executed, Processed, Maintained, Resolved, Reconciled.
     Do NOT use: Orchestrated, Visionary, Spearheaded, Strategic Strategy.
   - If the target role is Senior (Director, VP, Head of):
     Use strategic verbs: Directed, Engineered, Optimized, Led.

3. HIDDEN REQUIREMENT DETECTION:
   - Scan the JD for soft skills (Customer Service, Communication, Analytical).
   - If the candidate data does not mention them, use Ghostwriter logic to generate a bullet
     based on standard duties for the candidate's rank (e.g., "Liaison between vendors and internal units" for Customer Service).

4. Every bullet in Professional Experience must tie to at least one JD keyword.
   Quantify everything (dollars, percentages, personnel counts, timelines).
   Civilianize ALL military terms using the translation map.

5. If User Data is EMPTY or very thin, generate a "Top 10% Performer" resume from scratch
   based on Rank doctrine. Assume excellence: 100% accountability, zero loss, top ratings.

OUTPUT FORMAT ({no_preamble}, no "Here is the resume"):

# [Candidate Name]
### **{title}**
**[City, State]** | **[Phone]** | **[Email]** | **[LinkedIn URL]**

## PROFESSIONAL SUMMARY
[3 sentences. Power statement: Rank Authority + top 3 JD keywords + Degree/Clearance.]

## CORE COMPETENCIES
* **[JD Keyword 1]:** [8-15 word context]
* **[JD Keyword 2]:** [context]
* **[JD Keyword 3]:** [context]
* **[JD Keyword 4]:** [context]
* **[JD Keyword 5]:** [context]
* **[Soft Skill from JD]:** [context]

## {project_header}
* **[Project Name]:** [Action + quantified result matching a JD need]
* **[Project Name]:** [Action + quantified result matching a JD need]

## PROFESSIONAL EXPERIENCE
**[Civilianized Job Title]** (Former {rank}) | **U.S. Army**
*[Start Date] - [End Date]*
* [STAR bullet 1: Deep dive into top JD requirement. Different wording than Core Competencies.]
* [STAR bullet 2: Different JD requirement.]
* [STAR bullet 3: Leadership/mentorship with metrics.]
* [STAR bullet 4: Audit, compliance, or cost-savings metric.]
* [STAR bullet 5: Process improvement or customer service.]

## EDUCATION & CERTIFICATIONS
* [Degree] | [Institution] | [Year]
* [Clearance Level]
"#;

/// Cover letter generation.
/// Replace: {context}, {no_preamble}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are a Career Architect writing a cover letter for a 92Y veteran.

{context}

RULES:
- 3 paragraphs: Hook (who you are + why this role), Body (2-3 JD keywords matched to experience), Close (call to action).
- If there is an employment gap (e.g., 2022-Present), frame it as "Professional Development period:
  completed Bachelor's degree, pursued certifications, and upskilled in digital tools."
- Civilianize all military terms. Match the industry tone.
- Under 350 words. Do NOT repeat the resume verbatim.

OUTPUT ({no_preamble}):

[Full Name]
[City, State] | [Phone] | [Email]

[Date]

Dear Hiring Manager,

[Paragraph 1: Hook]

[Paragraph 2: Body]

[Paragraph 3: Close]

Respectfully,
[Full Name]
"#;

/// Interview prep generation.
/// Replace: {context}, {no_preamble}
pub const INTERVIEW_PROMPT_TEMPLATE: &str = r#"You are an Interview Coach for a 92Y veteran.

{context}

Generate interview prep. {no_preamble}.

## LIKELY INTERVIEW QUESTIONS

**Q1: [Question targeting top JD keyword]**
*Suggested Answer:* [STAR format, 3-4 sentences, using civilianized military experience.]

**Q2: [Question targeting second JD keyword]**
*Suggested Answer:* [STAR format.]

**Q3: [Behavioral question about leadership]**
*Suggested Answer:* [STAR format.]

**Q4: [Behavioral question about problem-solving or customer service]**
*Suggested Answer:* [STAR format.]

**Q5: [Industry-specific technical question]**
*Suggested Answer:* [STAR format.]

## QUESTIONS TO ASK THE INTERVIEWER
1. [Smart question demonstrating JD knowledge]
2. [Question about team structure or growth]
3. [Question about success metrics for the role]

## MILITARY TRANSLATION CHEAT SHEET
| If They Ask About... | Translate Your Experience As... |
|---|---|
| [Civilian concept 1] | [Military equivalent, civilianized] |
| [Civilian concept 2] | [Military equivalent, civilianized] |
| [Civilian concept 3] | [Military equivalent, civilianized] |
"#;
