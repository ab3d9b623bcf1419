use super::{FieldSpec, INVALID_URL};

form_schema! {
    /// Profile details collected right after signup
    pub struct OnboardingInput {
        headline: String as "headline" => FieldSpec::text()
            .min_len(2, "Headline must be at least 2 characters")
            .max_len(80, "Headline must be at most 80 characters"),
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bio: Option<String> as "bio" => FieldSpec::text()
            .optional()
            .max_len(500, "Bio must be at most 500 characters"),
        skills: Vec<String> as "skills" => FieldSpec::list().min_len(1, "Add at least one skill"),
        #[serde(default, skip_serializing_if = "Option::is_none")]
        portfolio_url: Option<String> as "portfolioUrl" => FieldSpec::text().optional().url(INVALID_URL),
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<String> as "location" => FieldSpec::text().optional(),
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hourly_rate: Option<f64> as "hourlyRate" => FieldSpec::number()
            .optional()
            .min(0.0, "Hourly rate cannot be negative"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FormSchema;
    use serde_json::json;

    #[test]
    fn minimal_profile_is_accepted() {
        let input = OnboardingInput::validate(&json!({
            "headline": "Backend engineer",
            "skills": ["rust"],
            "portfolioUrl": "",
            "hourlyRate": ""
        }))
        .unwrap();

        assert_eq!(input.skills, vec!["rust".to_string()]);
        assert!(input.portfolio_url.is_none());
        assert!(input.hourly_rate.is_none());
        assert!(input.bio.is_none());
    }

    #[test]
    fn optional_fields_are_still_checked_when_present() {
        let errors = OnboardingInput::validate(&json!({
            "headline": "Designer",
            "skills": "figma, illustration",
            "portfolioUrl": "my site",
            "hourlyRate": "-5"
        }))
        .unwrap_err();

        assert_eq!(errors.first("portfolioUrl"), Some(INVALID_URL));
        assert!(errors.contains("hourlyRate"));
        assert!(!errors.contains("skills"));
    }

    #[test]
    fn hourly_rate_is_coerced() {
        let input = OnboardingInput::validate(&json!({
            "headline": "Writer",
            "skills": ["copy"],
            "hourlyRate": "40"
        }))
        .unwrap();
        assert_eq!(input.hourly_rate, Some(40.0));
    }

    #[test]
    fn empty_skill_list_is_rejected() {
        let errors = OnboardingInput::validate(&json!({
            "headline": "Writer",
            "skills": []
        }))
        .unwrap_err();
        assert_eq!(errors.first("skills"), Some("Add at least one skill"));
    }
}
