use super::login::PASSWORD_TOO_SHORT;
use super::{FieldSpec, INVALID_EMAIL};

// password and confirmPassword are only length-checked; equality between
// them is not enforced here.
form_schema! {
    pub struct SignupInput {
        name: String as "name" => FieldSpec::text().min_len(2, "Name must be at least 2 characters"),
        email: String as "email" => FieldSpec::text().email(INVALID_EMAIL),
        password: String as "password" => FieldSpec::text().min_len(6, PASSWORD_TOO_SHORT),
        confirm_password: String as "confirmPassword" => FieldSpec::text().min_len(6, PASSWORD_TOO_SHORT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FormSchema;
    use serde_json::json;

    #[test]
    fn accepts_mismatched_passwords_of_valid_length() {
        let input = SignupInput::validate(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret1",
            "confirmPassword": "different2"
        }))
        .unwrap();

        assert_ne!(input.password, input.confirm_password);
    }

    #[test]
    fn short_confirmation_is_reported_on_its_own_key() {
        let errors = SignupInput::validate(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret1",
            "confirmPassword": "abc"
        }))
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors.contains("confirmPassword"));
    }

    #[test]
    fn serializes_with_wire_names() {
        let input = SignupInput {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        };
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["confirmPassword"], "secret1");
    }
}
