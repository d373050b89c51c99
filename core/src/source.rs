//! The **abstraction** over whatever delivers advertisement events.
//!
//! The core never drives a radio itself. A real scanner, a capture replay or
//! a test fixture only has to hand out events one at a time; the session
//! owns the loop and decides when to stop asking.

use async_trait::async_trait;
use sniffr_common::device::event::AdvertisementEvent;

mod replay;

pub use replay::ReplaySource;

#[async_trait]
pub trait EventSource: Send {
    /// The next event, or `None` once the source has nothing more to give.
    ///
    /// Must be cancel safe: the session may drop the future when the scan
    /// deadline fires.
    async fn next_event(&mut self) -> Option<AdvertisementEvent>;
}

/// In-memory source, mostly for fixtures.
#[async_trait]
impl EventSource for std::vec::IntoIter<AdvertisementEvent> {
    async fn next_event(&mut self) -> Option<AdvertisementEvent> {
        self.next()
    }
}
