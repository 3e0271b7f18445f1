//! Configuration, time source and identifier policy

pub mod clock;
pub mod config;
pub mod ids;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AdminCredentials, Config};
pub use ids::{IdGenerator, SequentialIds};
