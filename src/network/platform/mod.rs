//! Platform-specific adapter source implementations.
//!
//! # Platform Support
//!
//! - **Windows**: `GetAdaptersAddresses` via the `windows` crate ([`IpHelperSource`]).
//! - **Other platforms**: [`UnsupportedSource`], which always reports
//!   [`FetchError::Unsupported`](crate::network::FetchError::Unsupported).

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::IpHelperSource;

#[cfg(windows)]
pub use windows::IpHelperSource as PlatformSource;

#[cfg(not(windows))]
pub use unsupported::UnsupportedSource as PlatformSource;

pub use unsupported::UnsupportedSource;

mod unsupported {
    use crate::network::{AdapterQuery, AdapterRecord, AdapterSource, FetchError};

    /// Source for platforms without the IP Helper API.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UnsupportedSource;

    impl UnsupportedSource {
        #[must_use]
        pub const fn new() -> Self {
            Self
        }
    }

    impl AdapterSource for UnsupportedSource {
        fn fetch(&self, _query: &AdapterQuery) -> Result<Vec<AdapterRecord>, FetchError> {
            Err(FetchError::Unsupported)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn always_unsupported() {
            let result = UnsupportedSource::new().fetch(&AdapterQuery::default());
            assert!(matches!(result, Err(FetchError::Unsupported)));
        }
    }
}
