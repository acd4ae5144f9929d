//! Bodies for the profile endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ProfileResponseBody {
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone_number.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_with_no_fields_is_empty() {
        let body: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(body.is_empty());

        let body: UpdateProfileRequest =
            serde_json::from_str(r#"{"fullName": "New Name"}"#).unwrap();
        assert!(!body.is_empty());
    }
}
