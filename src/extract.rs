//! Request extractors that report malformed input as JSON validation errors.

use axum::extract::{FromRequest, FromRequestParts};

use crate::Error;

/// A JSON request body.
///
/// Works like [axum::Json] but rejections are turned into [Error::Validation]
/// so that clients always receive a JSON error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// A path parameter, such as a resource ID.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct PathParam<T>(pub T);

/// Return the trimmed `value`, or a validation error naming `field` if it is blank.
pub fn required_text(field: &str, value: &str) -> Result<String, Error> {
    let value = value.trim();

    if value.is_empty() {
        Err(Error::Validation(format!("{field} is required.")))
    } else {
        Ok(value.to_owned())
    }
}

/// Return `value` if it is present, finite and strictly greater than zero.
pub fn positive_amount(field: &str, value: Option<f64>) -> Result<f64, Error> {
    match value {
        None => Err(Error::Validation(format!("{field} is required."))),
        Some(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        Some(_) => Err(Error::Validation(format!(
            "{field} must be a number greater than zero."
        ))),
    }
}

/// Return `value`, defaulting to zero, if it is finite and not negative.
pub fn non_negative_amount(field: &str, value: Option<f64>) -> Result<f64, Error> {
    match value {
        None => Ok(0.0),
        Some(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        Some(_) => Err(Error::Validation(format!(
            "{field} must be a number that is zero or greater."
        ))),
    }
}
