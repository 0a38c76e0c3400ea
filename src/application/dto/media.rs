use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoredMediaDto {
    /// Reference to put in `cover` or `favicon` fields.
    pub reference: String,
    pub purpose: String,
    pub bytes: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
