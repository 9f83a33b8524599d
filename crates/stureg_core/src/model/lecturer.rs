use super::EntityId;
use serde::{Deserialize, Serialize};

/// Mutable lecturer columns, in the order partial updates inspect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LecturerField {
    Position,
    Firstname,
    Lastname,
}

impl LecturerField {
    pub const ALL: [LecturerField; 3] = [Self::Position, Self::Firstname, Self::Lastname];
}

/// Teaching staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: EntityId,
    pub firstname: String,
    pub lastname: String,
    /// Free-form job title, e.g. `Senior Lecturer`.
    pub position: String,
}

impl Lecturer {
    pub fn new(
        id: EntityId,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            id,
            firstname: firstname.into(),
            lastname: lastname.into(),
            position: position.into(),
        }
    }

    /// Lists fields whose values differ from `previous`, in
    /// `LecturerField::ALL` order.
    pub fn changed_fields(&self, previous: &Lecturer) -> Vec<LecturerField> {
        LecturerField::ALL
            .into_iter()
            .filter(|field| match field {
                LecturerField::Position => self.position != previous.position,
                LecturerField::Firstname => self.firstname != previous.firstname,
                LecturerField::Lastname => self.lastname != previous.lastname,
            })
            .collect()
    }
}
