use serde::{Deserialize, Serialize};

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_wire_names() {
        let user = User {
            id: 1,
            email: "test@test.com".into(),
            last_name: "Doe".into(),
            first_name: "John".into(),
            admin: false,
            created_at: "2025-04-01T10:00:00.000Z".into(),
            updated_at: "2025-04-01T10:00:00.000Z".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["lastName"], "Doe");
        assert_eq!(json["admin"], false);
        assert!(json.get("password").is_none());
    }
}
