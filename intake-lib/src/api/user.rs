//! User registration

use serde::Deserialize;
use serde::Serialize;

use crate::IntakeClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::identity::Identity;

/// Registration payload of the `create-user` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Roll number the user registers under.
    pub roll_number: String,
    /// Display name.
    pub name: String,
}

impl NewUser {
    /// Creates a new registration payload.
    pub fn new(roll_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            roll_number: roll_number.into(),
            name: name.into(),
        }
    }
}

impl From<&Identity> for NewUser {
    fn from(identity: &Identity) -> Self {
        Self {
            roll_number: identity.roll_number.clone(),
            name: identity.name.clone(),
        }
    }
}

impl IntakeClient {
    /// Registers a user with the intake service.
    ///
    /// The service does not document its success payload, so the body is
    /// returned as raw JSON for the caller to inspect or ignore.
    pub async fn create_user(&self, user: &NewUser) -> Result<serde_json::Value, Error> {
        let url = self.endpoint("create-user")?;

        let request = self.apply_timeout(self.http().post(url).json(user));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let user = NewUser::new("RA2211003010000", "Alice");
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"rollNumber":"RA2211003010000","name":"Alice"}"#);
    }

    #[test]
    fn test_from_identity() {
        let identity = Identity::new("R1", "Alice");
        let user = NewUser::from(&identity);
        assert_eq!(user, NewUser::new("R1", "Alice"));
    }
}
