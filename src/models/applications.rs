use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Application status stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// SeaORM entity for the `applications` table: an artist applying to a project.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    /// Artist-profile id of the applicant.
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::artists::Entity",
        from = "Column::FreelancerId",
        to = "super::artists::Column::Id"
    )]
    Freelancer,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::artists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplication {
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
    #[validate(length(min = 10, max = 5000))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplication {
    #[validate(length(min = 10, max = 5000))]
    pub message: Option<String>,
    pub status: Option<ApplicationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_length_is_bounded() {
        let with_message = |m: Option<String>| CreateApplication {
            project_id: Uuid::new_v4(),
            freelancer_id: Uuid::new_v4(),
            message: m,
        };

        assert!(with_message(None).validate().is_ok());
        assert!(with_message(Some("I would love to".into())).validate().is_ok());
        assert!(with_message(Some("too short".into())).validate().is_err());
        assert!(with_message(Some("x".repeat(5001))).validate().is_err());
        assert!(with_message(Some("x".repeat(5000))).validate().is_ok());
    }

    #[test]
    fn only_known_statuses_parse() {
        for (raw, expected) in [
            ("pending", ApplicationStatus::Pending),
            ("accepted", ApplicationStatus::Accepted),
            ("rejected", ApplicationStatus::Rejected),
        ] {
            let update: UpdateApplication =
                serde_json::from_value(serde_json::json!({ "status": raw })).unwrap();
            assert_eq!(update.status, Some(expected));
        }

        let bad = serde_json::from_value::<UpdateApplication>(serde_json::json!({
            "status": "withdrawn"
        }));
        assert!(bad.is_err());
    }
}
