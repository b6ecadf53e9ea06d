pub use crate::error::{Error, SgResult};
pub use crate::types::{KeyId, SiteId, UserId};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
