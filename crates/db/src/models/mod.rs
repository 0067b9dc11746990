pub mod issue;
pub mod parent;

use mongodb::bson::oid::ObjectId;
use scrumboard_core::error::CoreError;

/// Parse a 24-character hex id supplied by a client.
///
/// `field` names the request field in the error message.
pub fn parse_id(field: &str, raw: &str) -> Result<ObjectId, CoreError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| CoreError::validation(format!("invalid {field} id '{raw}'")))
}
