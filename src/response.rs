use serde::Serialize;
use utoipa::ToSchema;

/// Pagination block of the envelope. Every field is `null` on responses
/// that are not listings.
#[derive(Debug, Serialize, ToSchema, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn page(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            total: Some(total),
        }
    }

    /// An unpaginated listing: one page holding all `count` rows.
    pub fn listing(count: usize) -> Self {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        Self::page(1, count, count)
    }
}

/// `{message, data, meta}` envelope shared by successes and errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_meta(message, data, Meta::default())
    }

    pub fn with_meta(message: impl Into<String>, data: T, meta: Meta) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta: Some(meta),
        }
    }
}
