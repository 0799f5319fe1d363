use rmcp::ErrorData;

use crate::domain::FetchError;

/// Every fetch failure is one protocol failure; the message is passed through unchanged.
impl From<FetchError> for ErrorData {
    fn from(e: FetchError) -> Self {
        ErrorData::internal_error(e.to_string(), None)
    }
}
