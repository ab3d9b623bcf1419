use super::FieldSpec;
use crate::models::PlanDuration;

const DURATIONS: &[&str] = &["monthly", "yearly"];

form_schema! {
    /// Subscription plan edit form of the admin panel
    pub struct AdminPlanInput {
        name: String as "name" => FieldSpec::text().min_len(2, "Plan name must be at least 2 characters"),
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String> as "description" => FieldSpec::text()
            .optional()
            .max_len(300, "Description must be at most 300 characters"),
        price: f64 as "price" => FieldSpec::number().min(0.0, "Price cannot be negative"),
        duration: PlanDuration as "duration" => FieldSpec::text().one_of(DURATIONS, "Duration must be monthly or yearly"),
        features: Vec<String> as "features" => FieldSpec::list().min_len(1, "Add at least one feature"),
        is_active: bool as "isActive" => FieldSpec::boolean(),
    }
}
