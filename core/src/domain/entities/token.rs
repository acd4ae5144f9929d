//! JWT claim set for identity tokens

use serde::{Deserialize, Serialize};

/// Claims carried by an issued identity token.
///
/// The claim shape is an implementation detail of the service; clients only
/// see an opaque signed string. `iat` and `exp` are Unix timestamps in
/// seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id
    #[serde(rename = "userID")]
    pub user_id: i64,
    /// Issued-at timestamp
    pub iat: i64,
    /// Expiry timestamp; the token is invalid the instant now >= exp
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_serializes_as_user_id_claim() {
        let claims = Claims {
            user_id: 42,
            iat: 1_700_000_000,
            exp: 1_700_021_600,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userID"], 42);
        assert_eq!(json["exp"], 1_700_021_600);
    }
}
