//! Tests for adapter filtering configuration.

use crate::network::filter::AdapterFilter;
use crate::network::{AdapterKind, AdapterRecord, OperStatus};

use super::*;

fn adapter(name: &str, kind: AdapterKind) -> AdapterRecord {
    AdapterRecord::new(1, name, kind)
}

fn down(name: &str) -> AdapterRecord {
    let mut record = adapter(name, AdapterKind::Ethernet);
    record.oper_status = OperStatus::Down;
    record
}

mod filter_building {
    use super::*;

    #[test]
    fn defaults_keep_up_adapters_of_any_kind() {
        let config = ValidatedConfig::from_raw(&cli(&["adapters"]), None).unwrap();

        assert!(config.filter.matches(&adapter("Ethernet", AdapterKind::Ethernet)));
        assert!(config.filter.matches(&adapter("Loopback", AdapterKind::Loopback)));
        assert!(config.filter.matches(&adapter("vpn0", AdapterKind::Virtual)));
        assert!(!config.filter.matches(&down("Ethernet 2")));
    }

    #[test]
    fn include_down_keeps_down_adapters() {
        let config =
            ValidatedConfig::from_raw(&cli(&["adapters", "--include-down"]), None).unwrap();

        assert!(config.include_down);
        assert!(config.filter.matches(&down("Ethernet 2")));
    }

    #[test]
    fn exclude_virtual_rejects_virtual() {
        let config =
            ValidatedConfig::from_raw(&cli(&["adapters", "--exclude-virtual"]), None).unwrap();

        assert!(!config.filter.matches(&adapter("vpn0", AdapterKind::Virtual)));
        assert!(config.filter.matches(&adapter("Ethernet", AdapterKind::Ethernet)));
    }

    #[test]
    fn exclude_loopback_rejects_loopback() {
        let config =
            ValidatedConfig::from_raw(&cli(&["adapters", "--exclude-loopback"]), None).unwrap();

        assert!(!config.filter.matches(&adapter("Loopback", AdapterKind::Loopback)));
    }

    #[test]
    fn include_patterns_use_or_semantics() {
        let cli = cli(&[
            "adapters",
            "--include-adapter",
            "^Ethernet$",
            "--include-adapter",
            "^Wi-Fi$",
        ]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.filter.include_count(), 2);
        assert!(config.filter.matches(&adapter("Ethernet", AdapterKind::Ethernet)));
        assert!(config.filter.matches(&adapter("Wi-Fi", AdapterKind::Wireless)));
        assert!(!config.filter.matches(&adapter("Bluetooth", AdapterKind::Other(6))));
    }

    #[test]
    fn exclude_pattern_wins_over_include() {
        let cli = cli(&[
            "adapters",
            "--include-adapter",
            "Ethernet",
            "--exclude-adapter",
            "^vEthernet",
        ]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert!(config.filter.matches(&adapter("Ethernet", AdapterKind::Ethernet)));
        assert!(!config.filter.matches(&adapter("vEthernet (WSL)", AdapterKind::Ethernet)));
    }

    #[test]
    fn invalid_regex_is_a_config_error() {
        let result = ValidatedConfig::from_raw(&cli(&["adapters", "--include-adapter", "("]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRegex { ref pattern, .. }) if pattern == "("
        ));
    }

    #[test]
    fn toml_filters_apply() {
        let toml = toml(
            r#"
            [filter]
            include = ["^Ethernet"]
            exclude_virtual = true
        "#,
        );
        let config = ValidatedConfig::from_raw(&cli(&["adapters"]), Some(&toml)).unwrap();

        assert!(config.filter.matches(&adapter("Ethernet", AdapterKind::Ethernet)));
        assert!(!config.filter.matches(&adapter("Wi-Fi", AdapterKind::Wireless)));
        assert!(!config.filter.matches(&adapter("Ethernet VPN", AdapterKind::Virtual)));
    }

    #[test]
    fn invalid_toml_regex_is_reported() {
        let toml = toml(
            r#"
            [filter]
            exclude = ["[unclosed"]
        "#,
        );
        let result = ValidatedConfig::from_raw(&cli(&["adapters"]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidRegex { .. })));
    }
}
