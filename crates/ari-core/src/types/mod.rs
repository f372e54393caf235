//! Types shared by the ARI client, the renewal checker and the CLI.

mod acme;
mod identifier;
mod timestamp;
mod verdict;
mod window;

pub use acme::*;
pub use identifier::*;
pub use timestamp::*;
pub use verdict::*;
pub use window::*;
