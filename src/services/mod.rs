pub mod poller;

pub use poller::StatusPoller;
