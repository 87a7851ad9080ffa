//! Application services (use cases).
//!
//! These services drive the domain through the outbound ports: the session
//! manager feeds venue frames to the diff engine, whose events are rendered
//! and handed to the delivery queue.

pub mod delivery;
pub mod diff;
pub mod session;

pub use delivery::{DeliveryQueue, DeliveryStats};
pub use diff::DiffEngine;
pub use session::{Pipeline, Session, SessionPolicy, SessionState};

use tokio::sync::watch;

/// Resolve once the shutdown flag is set.
///
/// A dropped sender is not a shutdown request; the future then never
/// resolves.
pub(crate) async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
