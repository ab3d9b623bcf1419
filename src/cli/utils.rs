use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::error::ClientError;
use crate::validation::{FieldErrors, FormSchema};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output per-field validation messages in the appropriate format
pub fn output_field_errors(output_format: &OutputFormat, errors: &FieldErrors) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                "success": false,
                "error": "Validation failed",
                "error_code": "VALIDATION_ERROR",
                "field_errors": errors.to_json()
            }))?);
        }
        OutputFormat::Text => {
            eprintln!("Validation failed:");
            for (field, messages) in errors.iter() {
                for message in messages {
                    eprintln!("  {}: {}", field, message);
                }
            }
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Validate raw form values against a schema, reporting failures before
/// anything is sent
pub fn validate_form<S: FormSchema>(output_format: &OutputFormat, raw: Value) -> anyhow::Result<S> {
    match S::validate(&raw) {
        Ok(input) => Ok(input),
        Err(errors) => {
            output_field_errors(output_format, &errors)?;
            Err(errors.into())
        }
    }
}

/// Turn a failed API call into the command's error. JSON output also gets a
/// structured error object; text output is left to the binary's error line.
pub fn report_client_error(output_format: &OutputFormat, err: ClientError) -> anyhow::Error {
    if let OutputFormat::Json = output_format {
        if let Err(output_err) = output_error(output_format, &err.message(), Some(err.error_code())) {
            return output_err;
        }
    }
    err.into()
}
