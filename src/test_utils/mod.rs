#[cfg(all(test, unix))]
pub mod sync_fixture;

#[cfg(all(test, unix))]
pub use sync_fixture::{run_git, ScriptedInteraction, SyncFixture};
