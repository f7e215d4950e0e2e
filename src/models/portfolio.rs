use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::artists;

/// SeaORM entity for the `portfolios` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolios")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Artist-profile id of the owner.
    pub freelancer_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artists::Entity",
        from = "Column::FreelancerId",
        to = "super::artists::Column::Id"
    )]
    Freelancer,
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
pub struct CreatePortfolio {
    pub freelancer_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: String,
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolio {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// A portfolio row and its owning artist profile, if that profile still exists.
pub type PortfolioWithFreelancer = (Model, Option<artists::Model>);

/// Which portfolio items a listing returns.
#[derive(Debug, Clone)]
pub enum PortfolioFilter {
    All,
    Freelancer(Uuid),
    /// Items whose tag array contains this exact tag.
    Tag(String),
    /// Items whose freelancer name contains this text, ignoring case.
    FreelancerName(String),
}

/// A portfolio item with its owning artist profile joined under `freelancer`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    #[serde(flatten)]
    pub portfolio: Model,
    pub freelancer: Option<artists::Model>,
}

impl From<PortfolioWithFreelancer> for PortfolioResponse {
    fn from((portfolio, freelancer): PortfolioWithFreelancer) -> Self {
        Self {
            portfolio,
            freelancer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str, image_url: Option<&str>) -> CreatePortfolio {
        CreatePortfolio {
            freelancer_id: Uuid::new_v4(),
            title: title.to_string(),
            description: "Ink and wash".to_string(),
            image_url: image_url.map(str::to_string),
            tags: vec!["ink".to_string()],
        }
    }

    #[test]
    fn title_and_image_url_are_checked() {
        assert!(create("Harbour at dusk", Some("https://example.com/a.png")).validate().is_ok());
        assert!(create("", None).validate().is_err());
        assert!(create("Harbour", Some("not a url")).validate().is_err());
    }

    #[test]
    fn tags_default_to_empty() {
        let input: CreatePortfolio = serde_json::from_value(serde_json::json!({
            "freelancerId": Uuid::new_v4(),
            "title": "Studies",
            "description": "",
        }))
        .unwrap();
        assert!(input.tags.is_empty());
    }
}
