use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    /// Email as entered at registration.
    pub email: String,

    /// Trimmed, lowercased email; enforces case-insensitive uniqueness.
    #[sea_orm(unique)]
    pub email_key: String,

    pub name: String,

    /// Plaintext secret.
    pub password: String,

    pub is_admin: bool,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
