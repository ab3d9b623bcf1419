// Forgot-password flow: request an OTP, verify it, then set a new password.

use super::login::PASSWORD_TOO_SHORT;
use super::{FieldSpec, INVALID_EMAIL};

form_schema! {
    pub struct ForgotPasswordInput {
        email: String as "email" => FieldSpec::text().email(INVALID_EMAIL),
    }
}

form_schema! {
    pub struct VerifyOtpInput {
        email: String as "email" => FieldSpec::text().email(INVALID_EMAIL),
        otp: String as "otp" => FieldSpec::text().digits(6, "Code must be 6 digits"),
    }
}

// Same as signup: the two passwords are not compared.
form_schema! {
    pub struct ResetPasswordInput {
        token: String as "token" => FieldSpec::text().min_len(1, "Reset token is missing"),
        password: String as "password" => FieldSpec::text().min_len(6, PASSWORD_TOO_SHORT),
        confirm_password: String as "confirmPassword" => FieldSpec::text().min_len(6, PASSWORD_TOO_SHORT),
    }
}
