use serde::{Deserialize, Serialize};

/// The authenticated caller, resolved once at the HTTP boundary by the
/// external identity collaborator and passed explicitly into every
/// operation. Core logic never looks up "the current user" on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    Professional,
}

impl Actor {
    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }

    pub fn is_professional(&self) -> bool {
        self.role == Role::Professional
    }
}
