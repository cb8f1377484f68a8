//! Response envelope returned to the caller for every request.

use serde::{Deserialize, Serialize};

use tabwise_protocols::error::GroupingError;
use tabwise_protocols::types::{ApplyOutcome, ProviderKind};

use crate::classifier::classify;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    pub groups_created: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_names: Vec<String>,
    #[serde(default)]
    pub failed_groups: usize,
    #[serde(default)]
    pub partial_success: bool,
}

impl From<&ApplyOutcome> for ResponseData {
    fn from(outcome: &ApplyOutcome) -> Self {
        Self {
            groups_created: outcome.groups_created,
            group_names: outcome.group_names.clone(),
            failed_groups: outcome.failed_groups,
            partial_success: outcome.partial_success,
        }
    }
}

impl GroupingResponse {
    /// Success envelope for an applied grouping.
    ///
    /// Partial success is never retryable: repeating the request would
    /// duplicate the groups that already exist.
    pub fn from_outcome(outcome: &ApplyOutcome) -> Self {
        let data = Some(ResponseData::from(outcome));

        if outcome.partial_success {
            let total = outcome.groups_created + outcome.failed_groups;
            return Self {
                success: true,
                message: format!(
                    "Created {} of {} tab groups ({}). {} could not be created",
                    outcome.groups_created,
                    total,
                    outcome.group_names.join(", "),
                    outcome.failed_groups
                ),
                data,
                retryable: Some(false),
            };
        }

        let message = if outcome.groups_created == 0 {
            "No tab groups were created: none of the suggested groups matched open tabs".to_string()
        } else {
            format!(
                "Created {} tab groups: {}",
                outcome.groups_created,
                outcome.group_names.join(", ")
            )
        };
        Self {
            success: true,
            message,
            data,
            retryable: None,
        }
    }

    /// Failure envelope; retryability comes from the classifier.
    pub fn from_error(error: &GroupingError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            data: None,
            retryable: Some(classify(error).is_retryable()),
        }
    }

    pub fn ungrouped(count: usize) -> Self {
        let message = if count == 0 {
            "No grouped tabs to ungroup".to_string()
        } else {
            format!("Ungrouped {count} tabs")
        };
        Self {
            success: true,
            message,
            data: None,
            retryable: None,
        }
    }

    pub fn connection_ok(provider: ProviderKind) -> Self {
        Self {
            success: true,
            message: format!("Connected to {provider} successfully"),
            data: None,
            retryable: None,
        }
    }
}

impl From<Result<GroupingResponse, GroupingError>> for GroupingResponse {
    fn from(result: Result<GroupingResponse, GroupingError>) -> Self {
        result.unwrap_or_else(|e| GroupingResponse::from_error(&e))
    }
}
