use serde::{Deserialize, Serialize};

/// Signed-in user as persisted under `userData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Token stored under `authToken` for this user.
    pub fn token(&self) -> String {
        format!("static-token-{}", self.id)
    }
}

/// An account the login form accepts.
#[derive(Debug, Clone)]
pub struct Account {
    pub user: User,
    pub password: String,
}

/// Built-in accounts.
pub fn static_accounts() -> Vec<Account> {
    vec![Account {
        user: User {
            id: 1,
            first_name: "Main".into(),
            last_name: "Admin".into(),
            email: "admin@example.com".into(),
            role: "admin".into(),
        },
        password: "admin@example.com".into(),
    }]
}
