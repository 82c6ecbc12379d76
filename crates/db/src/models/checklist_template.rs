//! Checklist template models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studytrack_core::types::{DbId, Timestamp};

/// A row from the `checklist_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChecklistTemplate {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `checklist_template_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChecklistTemplateItem {
    pub id: DbId,
    pub template_id: DbId,
    pub text: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a template or replacing one wholesale.
///
/// `items` is positional: the array index becomes the item's `sort_order`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistTemplateInput {
    pub name: String,
    pub description: Option<String>,
    pub items: Option<Vec<String>>,
}

/// A template with its items in `sort_order`.
#[derive(Debug, Serialize)]
pub struct ChecklistTemplateWithItems {
    #[serde(flatten)]
    pub template: ChecklistTemplate,
    pub items: Vec<ChecklistTemplateItem>,
}
