use super::{FieldSpec, INVALID_EMAIL};

pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

form_schema! {
    /// Credentials submitted by the user and admin login forms
    pub struct LoginInput {
        email: String as "email" => FieldSpec::text().email(INVALID_EMAIL),
        password: String as "password" => FieldSpec::text().min_len(6, PASSWORD_TOO_SHORT),
    }
}
