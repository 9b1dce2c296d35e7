use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

pub mod activity;
pub mod plan;
pub mod user;

/// `?user_id=` on endpoints that persist optionally.
///
/// Ids issued by the mock login path are not UUIDs; those requests are served
/// normally and simply not persisted.
#[derive(Debug, Default, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

impl UserIdQuery {
    pub fn user_uuid(&self) -> Option<Uuid> {
        let raw = self.user_id.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring non-UUID user_id {raw:?}, result will not be saved");
                None
            }
        }
    }
}
