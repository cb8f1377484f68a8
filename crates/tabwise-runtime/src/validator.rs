//! Response validation.
//!
//! Nothing downstream of a provider trusts its output until it has passed
//! through [`validate`].

use serde_json::Value;
use tracing::debug;

use tabwise_protocols::error::ValidationError;
use tabwise_protocols::types::{GroupProposal, GroupingResult};

/// Check the canonical `{groups: [{name, tabIndices}]}` shape and convert it.
///
/// Numeric indices that are not whole numbers can never match a tab and are
/// dropped here.
pub fn validate(raw: &Value) -> Result<GroupingResult, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject)?;
    let groups = object
        .get("groups")
        .and_then(Value::as_array)
        .ok_or(ValidationError::GroupsNotArray)?;

    let mut proposals = Vec::with_capacity(groups.len());
    for (index, group) in groups.iter().enumerate() {
        let group = group
            .as_object()
            .ok_or(ValidationError::GroupNotObject { index })?;

        let name = group
            .get("name")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingName { index })?;
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName { index });
        }

        let indices = group
            .get("tabIndices")
            .and_then(Value::as_array)
            .ok_or(ValidationError::TabIndicesNotArray { index })?;

        let mut tab_indices = Vec::with_capacity(indices.len());
        for (position, value) in indices.iter().enumerate() {
            if !value.is_number() {
                return Err(ValidationError::TabIndexNotNumber { index, position });
            }
            match whole_number(value) {
                Some(n) => tab_indices.push(n),
                None => debug!("Dropping non-integral tab index {} in group '{}'", value, name),
            }
        }

        let reasoning = group
            .get("reasoning")
            .and_then(Value::as_str)
            .map(str::to_string);

        proposals.push(GroupProposal {
            name: name.trim().to_string(),
            tab_indices,
            reasoning,
        });
    }

    Ok(GroupingResult { groups: proposals })
}

fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64).then_some(f as i64)
}
