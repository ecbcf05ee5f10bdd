use crate::error::Result;
use crate::sync::Syncer;

pub fn handle_pull() -> Result<()> {
    Syncer::from_workspace()?.pull()
}
