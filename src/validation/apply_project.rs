use super::{FieldSpec, INVALID_URL};

pub const RATE_NOT_POSITIVE: &str = "Expected rate must be greater than 0";

form_schema! {
    /// Application sent to a project's creator
    pub struct ApplyProjectInput {
        cover_letter: String as "coverLetter" => FieldSpec::text()
            .min_len(20, "Cover letter must be at least 20 characters")
            .max_len(2000, "Cover letter must be at most 2000 characters"),
        expected_rate: f64 as "expectedRate" => FieldSpec::number().greater_than(0.0, RATE_NOT_POSITIVE),
        #[serde(default, skip_serializing_if = "Option::is_none")]
        portfolio_url: Option<String> as "portfolioUrl" => FieldSpec::text().optional().url(INVALID_URL),
    }
}
