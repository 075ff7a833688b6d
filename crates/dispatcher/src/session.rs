//! Optional multiplexer session resolution

use std::fs;
use std::path::Path;

use contracts::SessionName;
use tracing::debug;

/// Read the session file, if any
///
/// Missing, unreadable and blank files all resolve to `None`.
pub fn resolve_session(path: &Path) -> Option<SessionName> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let session = SessionName::parse(&content);
            if session.is_none() {
                debug!(path = %path.display(), "Session file is blank");
            }
            session
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No session file");
            None
        }
    }
}
