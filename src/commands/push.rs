use crate::error::Result;
use crate::sync::Syncer;

pub fn handle_push() -> Result<()> {
    Syncer::from_workspace()?.push()
}
