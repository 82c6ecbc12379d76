//! Repository for `checklist_templates` and `checklist_template_items`.
//!
//! Templates are independent of lessons: replacing or deleting a template
//! never touches checklists already copied into lesson plans.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use studytrack_core::checklist::ChecklistItemSeed;
use studytrack_core::types::DbId;

use crate::models::checklist_template::{
    ChecklistTemplate, ChecklistTemplateItem, ChecklistTemplateWithItems,
};

const COLUMNS: &str = "id, name, description, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, template_id, text, sort_order, created_at, updated_at";

/// Provides CRUD operations for checklist templates and their items.
pub struct ChecklistTemplateRepo;

impl ChecklistTemplateRepo {
    /// Insert a template and its items in one transaction.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
        items: &[ChecklistItemSeed],
    ) -> Result<ChecklistTemplateWithItems, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO checklist_templates (name, description) VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let template = sqlx::query_as::<_, ChecklistTemplate>(&query)
            .bind(name)
            .bind(description)
            .fetch_one(&mut *tx)
            .await?;

        let items = insert_items(&mut tx, template.id, items).await?;

        tx.commit().await?;
        Ok(ChecklistTemplateWithItems { template, items })
    }

    /// Update name and description and replace all items, atomically.
    ///
    /// Returns `None` if the template does not exist.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        name: &str,
        description: Option<&str>,
        items: &[ChecklistItemSeed],
    ) -> Result<Option<ChecklistTemplateWithItems>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE checklist_templates SET name = $2, description = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let Some(template) = sqlx::query_as::<_, ChecklistTemplate>(&query)
            .bind(id)
            .bind(name)
            .bind(description)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM checklist_template_items WHERE template_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let items = insert_items(&mut tx, id, items).await?;

        tx.commit().await?;
        Ok(Some(ChecklistTemplateWithItems { template, items }))
    }

    /// Find a template by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ChecklistTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM checklist_templates WHERE id = $1");
        sqlx::query_as::<_, ChecklistTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a template with its items in `sort_order`.
    pub async fn find_with_items(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ChecklistTemplateWithItems>, sqlx::Error> {
        let Some(template) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let mut conn = pool.acquire().await?;
        let items = list_items(&mut conn, id).await?;
        Ok(Some(ChecklistTemplateWithItems { template, items }))
    }

    /// List all templates by name, each with its ordered items.
    pub async fn list_with_items(
        pool: &PgPool,
    ) -> Result<Vec<ChecklistTemplateWithItems>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM checklist_templates ORDER BY name ASC, id ASC");
        let templates = sqlx::query_as::<_, ChecklistTemplate>(&query)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = templates.iter().map(|t| t.id).collect();
        let item_query = format!(
            "SELECT {ITEM_COLUMNS} FROM checklist_template_items \
             WHERE template_id = ANY($1) \
             ORDER BY template_id, sort_order ASC"
        );
        let items = sqlx::query_as::<_, ChecklistTemplateItem>(&item_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_template: HashMap<DbId, Vec<ChecklistTemplateItem>> = HashMap::new();
        for item in items {
            by_template.entry(item.template_id).or_default().push(item);
        }

        Ok(templates
            .into_iter()
            .map(|template| {
                let items = by_template.remove(&template.id).unwrap_or_default();
                ChecklistTemplateWithItems { template, items }
            })
            .collect())
    }

    /// Hard-delete a template and its items. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM checklist_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Load a template's items in `sort_order` on an existing connection.
pub(crate) async fn list_items(
    conn: &mut PgConnection,
    template_id: DbId,
) -> Result<Vec<ChecklistTemplateItem>, sqlx::Error> {
    let query = format!(
        "SELECT {ITEM_COLUMNS} FROM checklist_template_items \
         WHERE template_id = $1 \
         ORDER BY sort_order ASC"
    );
    sqlx::query_as::<_, ChecklistTemplateItem>(&query)
        .bind(template_id)
        .fetch_all(conn)
        .await
}

/// Batch-insert template items, returned in `sort_order`.
async fn insert_items(
    conn: &mut PgConnection,
    template_id: DbId,
    items: &[ChecklistItemSeed],
) -> Result<Vec<ChecklistTemplateItem>, sqlx::Error> {
    if items.is_empty() {
        return Ok(vec![]);
    }

    let texts: Vec<String> = items.iter().map(|i| i.text.clone()).collect();
    let orders: Vec<i32> = items.iter().map(|i| i.order).collect();

    let query = format!(
        "INSERT INTO checklist_template_items (template_id, text, sort_order) \
         SELECT $1::bigint, t.text, t.sort_order \
         FROM UNNEST($2::text[], $3::int[]) AS t(text, sort_order) \
         RETURNING {ITEM_COLUMNS}"
    );
    let mut rows = sqlx::query_as::<_, ChecklistTemplateItem>(&query)
        .bind(template_id)
        .bind(&texts)
        .bind(&orders)
        .fetch_all(conn)
        .await?;
    rows.sort_by_key(|r| r.sort_order);
    Ok(rows)
}
