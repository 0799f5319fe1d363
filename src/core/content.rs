//! Dual encoding of tool output: `structuredContent` plus its JSON text in `content[0]`.

use rmcp::model::{CallToolResult, Content, RawContent};
use serde::Serialize;

use crate::domain::FetchError;

/// Encode a payload as a successful tool result.
///
/// The text mirror is rendered from the structured value itself, so the two
/// can never disagree. Serialization failures are reported, never papered over
/// with a partial result.
pub fn encode_result<T: Serialize + ?Sized>(payload: &T) -> Result<CallToolResult, FetchError> {
    let structured = serde_json::to_value(payload).map_err(FetchError::encode)?;
    let text = serde_json::to_string(&structured).map_err(FetchError::encode)?;
    let mut result = CallToolResult::success(vec![Content::text(text)]);
    result.structured_content = Some(structured);
    Ok(result)
}

/// The text of the first content block, if it is text.
pub fn text_mirror(result: &CallToolResult) -> Option<&str> {
    match &result.content.as_ref()?.first()?.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde_json::{json, Value};

    use crate::domain::{ForecastPayload, ForecastResponse, GridpointForecastResponse};

    fn assert_mirrors(result: &CallToolResult) {
        let structured = result.structured_content.as_ref().expect("structured content");
        let text = text_mirror(result).expect("text content");
        assert_eq!(result.content.as_ref().unwrap().len(), 1);
        assert_eq!(text, serde_json::to_string(structured).unwrap());
        let reparsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(&reparsed, structured);
    }

    #[test]
    fn summary_text_is_exact_json_of_structured() {
        let payload: ForecastResponse =
            serde_json::from_value(json!({"periods":[{"temperature":75,"name":"Today"}]})).unwrap();
        let result = encode_result(&ForecastPayload::Summary(payload)).unwrap();
        assert_mirrors(&result);
        assert_eq!(result.is_error, Some(false));
        assert!(text_mirror(&result).unwrap().contains(r#""temperature":75"#));
    }

    #[test]
    fn gridpoint_text_is_exact_json_of_structured() {
        let payload: GridpointForecastResponse = serde_json::from_value(json!({
            "gridId": "MTR",
            "temperature": {"uom": "wmoUnit:degC", "values": [{"validTime": "2025-06-01T12:00:00+00:00/PT1H", "value": 23.88}]}
        }))
        .unwrap();
        let result = encode_result(&ForecastPayload::Gridpoint(payload)).unwrap();
        assert_mirrors(&result);
        assert_eq!(
            result.structured_content.unwrap()["temperature"]["values"][0]["value"],
            23.88
        );
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn serialization_failure_is_an_error_not_a_partial_result() {
        let err = encode_result(&Unencodable).unwrap_err();
        assert!(matches!(err, FetchError::Encode(_)));
        assert!(err.to_string().contains("refusing to serialize"));
    }
}
