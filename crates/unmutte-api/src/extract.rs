use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use unmutte_types::api::FieldError;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ApiError;

/// JSON body that has passed its `validator` rules. Every missing or
/// out-of-range field gets its own entry in `ApiError::Validation`; a body
/// that is not JSON, or has a wrongly typed field, yields a single entry.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(vec![from_rejection(&rejection)]))?;

        value
            .validate()
            .map_err(|errors| ApiError::Validation(from_validation(&errors)))?;

        Ok(Self(value))
    }
}

fn from_rejection(rejection: &JsonRejection) -> FieldError {
    let text = rejection.body_text();
    let (kind, field) = match rejection {
        JsonRejection::JsonDataError(_) => {
            let field = field_in_message(&text);
            let kind = if text.contains("missing field") { "missing" } else { "type_error" };
            (kind, field)
        }
        JsonRejection::JsonSyntaxError(_) => ("json_invalid", None),
        JsonRejection::MissingJsonContentType(_) => ("content_type", None),
        _ => ("body_error", None),
    };

    let mut loc = vec!["body".to_string()];
    loc.extend(field);
    FieldError {
        loc,
        msg: text,
        kind: kind.to_string(),
    }
}

/// Field named by a serde data error: "missing field `x`" or "x: invalid ...".
fn field_in_message(text: &str) -> Option<String> {
    let detail = text
        .split_once("target type: ")
        .map(|(_, rest)| rest)
        .unwrap_or(text);

    if let Some(rest) = detail.strip_prefix("missing field `") {
        return rest.split('`').next().map(str::to_string);
    }

    let (path, rest) = detail.split_once(": ")?;
    if rest.starts_with("invalid") && !path.contains(' ') {
        return Some(path.to_string());
    }
    None
}

fn from_validation(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| FieldError {
                loc: vec!["body".to_string(), field.clone()],
                msg: describe(err),
                kind: kind_of(err),
            })
        })
        .collect();

    out.sort_by(|a, b| a.loc.cmp(&b.loc));
    out
}

fn kind_of(err: &ValidationError) -> String {
    if err.code == "required" {
        "missing".to_string()
    } else {
        format!("{}_error", err.code)
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    if err.code == "required" {
        return "Field required".to_string();
    }

    match (err.params.get("min"), err.params.get("max")) {
        (Some(min), Some(max)) if err.code == "range" => {
            format!("Input should be between {} and {}", bound(min), bound(max))
        }
        _ => format!("Input failed '{}' check", err.code),
    }
}

/// Render a numeric bound without a trailing `.0`.
fn bound(value: &serde_json::Value) -> String {
    match value.as_f64() {
        Some(n) if n.fract() == 0.0 => format!("{}", n as i64),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unmutte_types::api::MoodRequest;

    #[test]
    fn reads_field_from_serde_messages() {
        assert_eq!(
            field_in_message(
                "Failed to deserialize the JSON body into the target type: missing field `mood` at line 1 column 20"
            )
            .as_deref(),
            Some("mood")
        );
        assert_eq!(
            field_in_message(
                "Failed to deserialize the JSON body into the target type: mood: invalid type: string \"x\", expected i64 at line 1 column 14"
            )
            .as_deref(),
            Some("mood")
        );
        assert_eq!(field_in_message("expected value at line 1 column 1"), None);
    }

    #[test]
    fn range_violation_names_field_and_bounds() {
        let req = MoodRequest {
            session_id: Some("s1".into()),
            mood: Some(6),
            note: None,
        };
        let errors = from_validation(&req.validate().unwrap_err());

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].loc, ["body", "mood"]);
        assert_eq!(errors[0].kind, "range_error");
        assert_eq!(errors[0].msg, "Input should be between 1 and 5");
    }

    #[test]
    fn missing_and_out_of_range_reported_together() {
        let req = MoodRequest {
            session_id: None,
            mood: Some(9),
            note: None,
        };
        let errors = from_validation(&req.validate().unwrap_err());

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].loc, ["body", "mood"]);
        assert_eq!(errors[0].kind, "range_error");
        assert_eq!(errors[1].loc, ["body", "session_id"]);
        assert_eq!(errors[1].kind, "missing");
        assert_eq!(errors[1].msg, "Field required");
    }
}
