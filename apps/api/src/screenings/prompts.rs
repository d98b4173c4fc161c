// Prompt template for screening conversations. The built prompt is persisted
// at creation time and never regenerated, so this function must stay
// deterministic.

/// System prompt template. Replace `{job_title}`, `{company_name}` and
/// `{job_description}` before persisting.
const SCREENING_PROMPT_TEMPLATE: &str = "You are a recruiter conducting a screening interview \
    for the {job_title} position at {company_name}.\n\n\
    Job description:\n{job_description}\n\n\
    Ask the candidate one question at a time about their background and \
    experience relevant to this role. Keep your responses brief and \
    conversational, and stay on the topic of the screening.";

/// Builds the system prompt for a screening from its structured job fields.
/// All three inputs are embedded verbatim.
pub fn build_screening_prompt(
    job_title: &str,
    company_name: &str,
    job_description: &str,
) -> String {
    SCREENING_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{company_name}", company_name)
        .replace("{job_description}", job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_all_inputs_verbatim() {
        let prompt = build_screening_prompt("Engineer", "Acme", "Build things");

        assert!(prompt.contains("Engineer"));
        assert!(prompt.contains("Acme"));
        assert!(prompt.contains("Build things"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_screening_prompt("Engineer", "Acme", "Build things");
        let b = build_screening_prompt("Engineer", "Acme", "Build things");

        assert_eq!(a, b, "same inputs must produce the same persisted prompt");
    }

    #[test]
    fn test_prompt_leaves_no_unfilled_placeholder() {
        let prompt = build_screening_prompt("Backend Developer", "Initech", "Maintain the stack");

        assert!(!prompt.contains("{job_title}"));
        assert!(!prompt.contains("{company_name}"));
        assert!(!prompt.contains("{job_description}"));
    }
}
