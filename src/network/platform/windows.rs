//! Windows adapter enumeration using `GetAdaptersAddresses`.

use crate::layout::IpAdapterAddresses;
use crate::network::decode::decode_adapters;
use crate::network::{AdapterQuery, AdapterRecord, AdapterSource, FetchError};
use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, ERROR_NO_DATA, NO_ERROR, WIN32_ERROR};
use windows::Win32::NetworkManagement::IpHelper::{
    GET_ADAPTERS_ADDRESSES_FLAGS, GetAdaptersAddresses,
};

/// Initial buffer size; Microsoft recommends starting with 15 KB.
/// The API reports the required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 15 * 1024;

/// Adapters can appear between the sizing call and the retry, so the
/// required size may grow more than once.
const MAX_ATTEMPTS: u32 = 3;

/// Windows implementation of [`AdapterSource`] using `GetAdaptersAddresses`.
///
/// Each [`fetch`](AdapterSource::fetch) owns the OS block only for the
/// duration of the call; the returned records are deep copies.
///
/// # Example
///
/// ```no_run
/// use adapter_dns::network::{AdapterQuery, AdapterSource, platform::IpHelperSource};
///
/// let source = IpHelperSource::new();
/// let adapters = source.fetch(&AdapterQuery::default()).expect("Failed to fetch adapters");
///
/// for adapter in adapters {
///     println!("{}: {:?}", adapter.friendly_name, adapter.unicast);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IpHelperSource {
    _private: (),
}

impl IpHelperSource {
    /// Creates a new IP Helper adapter source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AdapterSource for IpHelperSource {
    fn fetch(&self, query: &AdapterQuery) -> Result<Vec<AdapterRecord>, FetchError> {
        let Some(block) = get_adapter_addresses(query)? else {
            return Ok(Vec::new());
        };

        // SAFETY: `block` holds a chain written by GetAdaptersAddresses, is
        // 8-byte aligned, and outlives the decode call.
        let records = unsafe { decode_adapters(block.as_ptr().cast::<IpAdapterAddresses>()) }?;

        tracing::debug!(
            "Enumerated {} adapter(s) from a {} byte block",
            records.len(),
            block.len() * size_of::<u64>()
        );
        Ok(records)
    }
}

/// Calls `GetAdaptersAddresses`, growing the buffer when the OS asks for more.
///
/// Returns `None` when the OS reports no adapters at all. The buffer is made
/// of `u64` words so the first `IP_ADAPTER_ADDRESSES_LH` is 8-byte aligned.
fn get_adapter_addresses(query: &AdapterQuery) -> Result<Option<Vec<u64>>, FetchError> {
    let family = u32::from(query.family());
    let flags = GET_ADAPTERS_ADDRESSES_FLAGS(query.flags.bits());
    let mut size = INITIAL_BUFFER_SIZE;

    for attempt in 1..=MAX_ATTEMPTS {
        let mut buffer = vec![0u64; words_for(size)];
        size = u32::try_from(buffer.len() * size_of::<u64>()).unwrap_or(u32::MAX);

        // SAFETY: `buffer` is writable for `size` bytes; the call updates
        // `size` with the required length on overflow.
        let result = unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut size,
            )
        };

        if result == NO_ERROR.0 {
            return Ok(Some(buffer));
        }
        if result == ERROR_NO_DATA.0 {
            tracing::debug!("GetAdaptersAddresses reported no adapters");
            return Ok(None);
        }
        if result != ERROR_BUFFER_OVERFLOW.0 {
            return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
        }

        tracing::debug!("Adapter buffer too small on attempt {attempt}, OS requires {size} bytes");
    }

    Err(FetchError::BufferGrowth {
        attempts: MAX_ATTEMPTS,
        size,
    })
}

fn words_for(bytes: u32) -> usize {
    usize::try_from(bytes)
        .unwrap_or(usize::MAX)
        .div_ceil(size_of::<u64>())
}
