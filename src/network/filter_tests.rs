//! Tests for the adapter filtering module.

use std::net::SocketAddr;
use std::sync::Mutex;

use super::filter::*;
use super::{AdapterKind, AdapterQuery, AdapterRecord, AdapterSource, FetchError, OperStatus};

// ============================================================================
// Test Fixtures
// ============================================================================

fn record(if_index: u32, name: &str, kind: AdapterKind) -> AdapterRecord {
    let mut record = AdapterRecord::new(if_index, name, kind);
    record.dns_servers = vec![SocketAddr::from(([192, 168, 1, 1], 53))];
    record
}

fn ethernet_adapter() -> AdapterRecord {
    record(1, "Ethernet", AdapterKind::Ethernet)
}

fn wifi_adapter() -> AdapterRecord {
    record(2, "Wi-Fi", AdapterKind::Wireless)
}

fn virtual_adapter() -> AdapterRecord {
    record(3, "vEthernet (WSL)", AdapterKind::Virtual)
}

fn loopback_adapter() -> AdapterRecord {
    record(4, "Loopback Pseudo-Interface 1", AdapterKind::Loopback)
}

fn docker_adapter() -> AdapterRecord {
    record(5, "Docker Network Adapter", AdapterKind::Virtual)
}

fn disconnected_adapter() -> AdapterRecord {
    let mut adapter = record(6, "Ethernet 2", AdapterKind::Ethernet);
    adapter.oper_status = OperStatus::Down;
    adapter
}

// ============================================================================
// KindFilter Tests
// ============================================================================

mod kind_filter {
    use super::*;

    #[test]
    fn matches_single_kind() {
        let filter = KindFilter::new([AdapterKind::Ethernet]);
        assert!(filter.matches(&ethernet_adapter()));
        assert!(!filter.matches(&wifi_adapter()));
    }

    #[test]
    fn matches_multiple_kinds() {
        let filter = KindFilter::new([AdapterKind::Ethernet, AdapterKind::Wireless]);
        assert!(filter.matches(&ethernet_adapter()));
        assert!(filter.matches(&wifi_adapter()));
        assert!(!filter.matches(&virtual_adapter()));
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let filter = KindFilter::new([]);
        assert!(filter.is_empty());
        assert!(!filter.matches(&ethernet_adapter()));
    }

    #[test]
    fn len_counts_distinct_kinds() {
        let filter = KindFilter::new([
            AdapterKind::Virtual,
            AdapterKind::Virtual,
            AdapterKind::Loopback,
        ]);
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn other_kind_matches_by_code() {
        let filter = KindFilter::new([AdapterKind::Other(53)]);
        assert!(filter.matches(&record(9, "VPN", AdapterKind::Other(53))));
        assert!(!filter.matches(&record(9, "VPN", AdapterKind::Other(54))));
    }
}

// ============================================================================
// NameRegexFilter Tests
// ============================================================================

mod name_regex_filter {
    use super::*;

    #[test]
    fn matches_friendly_name() {
        let filter = NameRegexFilter::new("^Ethernet$").unwrap();
        assert!(filter.matches(&ethernet_adapter()));
        assert!(!filter.matches(&wifi_adapter()));
    }

    #[test]
    fn partial_match_works() {
        let filter = NameRegexFilter::new("WSL").unwrap();
        assert!(filter.matches(&virtual_adapter()));
    }

    #[test]
    fn case_insensitive_with_flag() {
        let filter = NameRegexFilter::new("(?i)docker").unwrap();
        assert!(filter.matches(&docker_adapter()));
    }

    #[test]
    fn invalid_regex_returns_error() {
        assert!(NameRegexFilter::new("[invalid").is_err());
    }

    #[test]
    fn pattern_accessor_returns_regex() {
        let filter = NameRegexFilter::new("^eth").unwrap();
        assert_eq!(filter.pattern().as_str(), "^eth");
    }
}

// ============================================================================
// OperStatusFilter Tests
// ============================================================================

mod oper_status_filter {
    use super::*;

    #[test]
    fn up_adapters_match() {
        assert!(OperStatusFilter.matches(&ethernet_adapter()));
    }

    #[test]
    fn down_adapters_do_not_match() {
        assert!(!OperStatusFilter.matches(&disconnected_adapter()));
    }

    #[test]
    fn unknown_status_does_not_match() {
        let mut adapter = ethernet_adapter();
        adapter.oper_status = OperStatus::Other(99);
        assert!(!OperStatusFilter.matches(&adapter));
    }
}

// ============================================================================
// FilterChain Tests
// ============================================================================

mod filter_chain {
    use super::*;

    #[test]
    fn empty_chain_matches_all() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert!(chain.matches(&ethernet_adapter()));
        assert!(chain.matches(&loopback_adapter()));
        assert!(chain.matches(&disconnected_adapter()));
    }

    #[test]
    fn exclude_takes_priority_over_include() {
        let chain = FilterChain::new()
            .include(KindFilter::new([AdapterKind::Virtual]))
            .exclude(NameRegexFilter::new("Docker").unwrap());

        assert!(chain.matches(&virtual_adapter()));
        assert!(!chain.matches(&docker_adapter()));
    }

    #[test]
    fn multiple_includes_use_or_semantics() {
        let chain = FilterChain::new()
            .include(NameRegexFilter::new("^Ethernet$").unwrap())
            .include(KindFilter::new([AdapterKind::Wireless]));

        assert!(chain.matches(&ethernet_adapter()));
        assert!(chain.matches(&wifi_adapter()));
        assert!(!chain.matches(&virtual_adapter()));
        assert_eq!(chain.include_count(), 2);
    }

    #[test]
    fn multiple_excludes_use_and_semantics() {
        let chain = FilterChain::new()
            .exclude(KindFilter::new([AdapterKind::Loopback]))
            .exclude(KindFilter::new([AdapterKind::Virtual]));

        assert!(chain.matches(&ethernet_adapter()));
        assert!(!chain.matches(&loopback_adapter()));
        assert!(!chain.matches(&docker_adapter()));
        assert_eq!(chain.exclude_count(), 2);
    }

    #[test]
    fn require_applies_regardless_of_includes() {
        let chain = FilterChain::new()
            .require(OperStatusFilter)
            .include(KindFilter::new([AdapterKind::Ethernet]));

        assert!(chain.matches(&ethernet_adapter()));
        assert!(!chain.matches(&disconnected_adapter()));
        assert!(!chain.matches(&wifi_adapter()));
    }

    #[test]
    fn require_alone_is_not_empty() {
        let chain = FilterChain::new().require(OperStatusFilter);
        assert!(!chain.is_empty());
        assert!(chain.matches(&wifi_adapter()));
    }

    #[test]
    fn debug_impl_shows_counts() {
        let chain = FilterChain::new()
            .include(KindFilter::new([AdapterKind::Ethernet]))
            .exclude(KindFilter::new([AdapterKind::Loopback]));
        let debug = format!("{chain:?}");
        assert!(debug.contains("include_count: 1"));
        assert!(debug.contains("exclude_count: 1"));
    }
}

// ============================================================================
// FilteredSource Tests
// ============================================================================

mod filtered_source {
    use super::*;

    struct MockSource {
        result: Mutex<Option<Result<Vec<AdapterRecord>, FetchError>>>,
    }

    impl MockSource {
        fn returning(records: Vec<AdapterRecord>) -> Self {
            Self {
                result: Mutex::new(Some(Ok(records))),
            }
        }

        fn failing(error: FetchError) -> Self {
            Self {
                result: Mutex::new(Some(Err(error))),
            }
        }
    }

    impl AdapterSource for MockSource {
        fn fetch(&self, _query: &AdapterQuery) -> Result<Vec<AdapterRecord>, FetchError> {
            self.result.lock().unwrap().take().unwrap_or_else(|| Ok(vec![]))
        }
    }

    #[test]
    fn filters_records_and_keeps_order() {
        let inner = MockSource::returning(vec![
            ethernet_adapter(),
            loopback_adapter(),
            wifi_adapter(),
            disconnected_adapter(),
        ]);
        let chain = FilterChain::new()
            .require(OperStatusFilter)
            .exclude(KindFilter::new([AdapterKind::Loopback]));
        let source = FilteredSource::new(inner, chain);

        let names: Vec<String> = source
            .fetch(&AdapterQuery::default())
            .unwrap()
            .into_iter()
            .map(|r| r.friendly_name)
            .collect();

        assert_eq!(names, vec!["Ethernet", "Wi-Fi"]);
    }

    #[test]
    fn propagates_errors_from_inner_source() {
        let source = FilteredSource::new(
            MockSource::failing(FetchError::Unsupported),
            OperStatusFilter,
        );

        let error = source.fetch(&AdapterQuery::default()).unwrap_err();

        assert!(matches!(error, FetchError::Unsupported));
    }

    #[test]
    fn accessors_return_parts() {
        let source = FilteredSource::new(MockSource::returning(vec![]), OperStatusFilter);
        assert!(source.inner().result.lock().unwrap().is_some());
        let _filter: &OperStatusFilter = source.filter();
    }
}

// ============================================================================
// Blanket Implementations
// ============================================================================

mod blanket_impl {
    use super::*;

    #[test]
    fn reference_to_filter_implements_trait() {
        let filter = KindFilter::new([AdapterKind::Ethernet]);
        let by_ref = &filter;
        assert!(by_ref.matches(&ethernet_adapter()));
    }

    #[test]
    fn boxed_filter_implements_trait() {
        let boxed: Box<dyn AdapterFilter> = Box::new(OperStatusFilter);
        assert!(boxed.matches(&ethernet_adapter()));
        assert!(!boxed.matches(&disconnected_adapter()));
    }
}
