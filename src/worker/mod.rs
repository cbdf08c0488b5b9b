pub mod notify_worker;

pub use notify_worker::run as run_notify_worker;
pub use notify_worker::NotifyState;
