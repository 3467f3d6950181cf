//! Form definition fetch

use serde::Deserialize;

use crate::IntakeClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::FormSchema;

/// Response envelope of the `get-form` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FormResponse {
    /// Service status message.
    pub message: String,
    /// The form definition to drive.
    pub form: FormSchema,
}

impl IntakeClient {
    /// Fetches the form definition keyed by the given roll number.
    ///
    /// Any non-2xx response is surfaced as [`ApiError::Http`] with the
    /// raw body as its message; the caller decides how to present it.
    /// Load failures are not retried here.
    pub async fn get_form(&self, roll_number: &str) -> Result<FormResponse, Error> {
        let mut url = self.endpoint("get-form")?;
        url.query_pairs_mut().append_pair("rollNumber", roll_number);

        let request = self.apply_timeout(self.http().get(url));
        let response = request.send().await.map_err(ApiError::from)?;

        if response.status().is_success() {
            let body = response.text().await.map_err(ApiError::from)?;
            serde_json::from_str(&body)
                .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(Error::Api(ApiError::http(status, body)))
        }
    }
}
