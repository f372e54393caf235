//! ACME endpoint modules.

mod directory;
mod renewal_info;

pub use directory::DirectoryApi;
pub use renewal_info::RenewalInfoApi;
