//! Checklist templates and lesson checklist rules.
//!
//! A lesson's checklist is a one-time snapshot of a template's items. Once a
//! lesson has items, its completion flag is derived from them: complete iff
//! every item is complete. Lessons with no items have no derived flag.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a template name.
pub const MAX_TEMPLATE_NAME_LENGTH: usize = 200;

/// Maximum length of a single checklist item's text.
pub const MAX_ITEM_TEXT_LENGTH: usize = 500;

/// Maximum number of items a template may carry.
pub const MAX_TEMPLATE_ITEMS: usize = 100;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a template name: non-blank and within the length limit.
pub fn validate_template_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Template name cannot be empty".to_string());
    }
    if name.len() > MAX_TEMPLATE_NAME_LENGTH {
        return Err(format!(
            "Template name exceeds maximum length of {MAX_TEMPLATE_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate the item list supplied when creating or replacing a template.
///
/// The list itself is required (an empty list is allowed); each entry must
/// be non-blank text within [`MAX_ITEM_TEXT_LENGTH`].
pub fn validate_template_items(items: Option<&[String]>) -> Result<&[String], String> {
    let items = items.ok_or_else(|| "Template items are required".to_string())?;

    if items.len() > MAX_TEMPLATE_ITEMS {
        return Err(format!(
            "Template cannot have more than {MAX_TEMPLATE_ITEMS} items"
        ));
    }
    for (index, text) in items.iter().enumerate() {
        if text.trim().is_empty() {
            return Err(format!("Template item {index} cannot be empty"));
        }
        if text.len() > MAX_ITEM_TEXT_LENGTH {
            return Err(format!(
                "Template item {index} exceeds maximum length of {MAX_ITEM_TEXT_LENGTH} characters"
            ));
        }
    }
    Ok(items)
}

// ---------------------------------------------------------------------------
// Template -> lesson snapshot
// ---------------------------------------------------------------------------

/// A checklist item about to be inserted for a new lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItemSeed {
    pub text: String,
    pub order: i32,
}

/// Assign zero-based positions to template item texts, in the given order.
pub fn ordered_items(texts: &[String]) -> Vec<ChecklistItemSeed> {
    texts
        .iter()
        .enumerate()
        .map(|(index, text)| ChecklistItemSeed {
            text: text.clone(),
            order: index as i32,
        })
        .collect()
}

/// Snapshot template items into lesson checklist seeds.
///
/// Text and order are copied as stored; the result is sorted by order so
/// inserts happen in template sequence. New items always start incomplete,
/// which the insert enforces.
pub fn snapshot_template<'a, I>(items: I) -> Vec<ChecklistItemSeed>
where
    I: IntoIterator<Item = (&'a str, i32)>,
{
    let mut seeds: Vec<ChecklistItemSeed> = items
        .into_iter()
        .map(|(text, order)| ChecklistItemSeed {
            text: text.to_string(),
            order,
        })
        .collect();
    seeds.sort_by_key(|seed| seed.order);
    seeds
}

// ---------------------------------------------------------------------------
// Derived completion
// ---------------------------------------------------------------------------

/// Completion derived from a lesson's checklist item states.
///
/// Returns `None` for an empty checklist: such a lesson's flag is owned by
/// the manual completion endpoint and must be left alone.
pub fn derived_completion<I>(states: I) -> Option<bool>
where
    I: IntoIterator<Item = bool>,
{
    let mut seen_any = false;
    let mut all_done = true;
    for done in states {
        seen_any = true;
        all_done &= done;
    }
    seen_any.then_some(all_done)
}

/// Partial-completion ratio of a checklist, computed on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistProgress {
    pub done: usize,
    pub total: usize,
    /// Rounded down to a whole percent; 0 for an empty checklist.
    pub percent: u8,
}

impl ChecklistProgress {
    pub fn from_states<I>(states: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let (done, total) = states
            .into_iter()
            .fold((0usize, 0usize), |(done, total), state| {
                (done + usize::from(state), total + 1)
            });
        let percent = if total == 0 {
            0
        } else {
            (done * 100 / total) as u8
        };
        Self {
            done,
            total,
            percent,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
