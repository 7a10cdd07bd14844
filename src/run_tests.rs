//! Tests for the run module.

use super::*;
use adapter_dns::network::{AdapterKind, OperStatus, PhysicalAddress, UnicastAddress};

fn ethernet() -> AdapterRecord {
    let mut record = AdapterRecord::new(12, "Ethernet", AdapterKind::Ethernet);
    record.adapter_name = "{4D36E972-E325-11CE-BFC1-08002BE10318}".to_string();
    record.description = "Intel(R) Ethernet Connection".to_string();
    record.physical_address = PhysicalAddress::new(&[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
    record.mtu = 1500;
    record.unicast = vec![UnicastAddress {
        address: "192.168.1.20:0".parse().unwrap(),
        flags: 0,
        prefix_origin: 3,
        suffix_origin: 3,
        dad_state: 4,
        valid_lifetime: 86_400,
        preferred_lifetime: 86_400,
        lease_lifetime: 86_400,
        on_link_prefix_length: 24,
    }];
    record.gateways = vec!["192.168.1.1:0".parse().unwrap()];
    record.dns_servers = vec!["192.168.1.1:53".parse().unwrap()];
    record.dns_suffix = "corp.example".to_string();
    record
}

fn render_text(adapters: &[AdapterRecord]) -> String {
    let mut out = Vec::new();
    render_adapters(&mut out, adapters, false).unwrap();
    String::from_utf8(out).unwrap()
}

mod adapters_output {
    use super::*;

    #[test]
    fn text_lists_identity_and_addresses() {
        let text = render_text(&[ethernet()]);

        assert!(text.starts_with("Ethernet (index 12, Ethernet, Up)\n"));
        assert!(text.contains("  mac:         00:1a:2b:3c:4d:5e\n"));
        assert!(text.contains("  unicast:     192.168.1.20/24\n"));
        assert!(text.contains("  gateway:     192.168.1.1\n"));
        assert!(text.contains("  dns server:  192.168.1.1\n"));
        assert!(text.contains("  dns suffix:  corp.example\n"));
    }

    #[test]
    fn text_omits_empty_optional_fields() {
        let mut record = AdapterRecord::new(1, "Loopback Pseudo-Interface 1", AdapterKind::Loopback);
        record.oper_status = OperStatus::Down;

        let text = render_text(&[record]);

        assert!(text.contains("(index 1, Loopback, Down)"));
        assert!(!text.contains("mac:"));
        assert!(!text.contains("dns suffix:"));
    }

    #[test]
    fn text_separates_adapters_with_blank_line() {
        let text = render_text(&[ethernet(), AdapterRecord::new(2, "Wi-Fi", AdapterKind::Wireless)]);
        assert!(text.contains("\n\nWi-Fi (index 2, Wireless, Up)\n"));
    }

    #[test]
    fn text_lists_wins_servers() {
        let mut record = ethernet();
        record.wins_servers = vec!["10.0.0.5:0".parse().unwrap()];

        let text = render_text(&[record]);

        assert!(text.contains("  wins server: 10.0.0.5\n"));
    }

    #[test]
    fn json_is_an_array_of_records() {
        let mut out = Vec::new();
        render_adapters(&mut out, &[ethernet()], true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let first = &value[0];
        assert_eq!(first["if_index"], 12);
        assert_eq!(first["friendly_name"], "Ethernet");
        assert_eq!(first["physical_address"], "00:1a:2b:3c:4d:5e");
        assert_eq!(first["dns_servers"][0], "192.168.1.1:53");
    }

    #[test]
    fn empty_list_renders_nothing_as_text() {
        assert_eq!(render_text(&[]), "");
    }
}

mod name_servers_output {
    use super::*;

    fn servers() -> NameServers {
        let mut servers = NameServers::new();
        servers.extend(
            DEFAULT_SEARCH_DOMAIN,
            [
                "10.0.0.1:53".parse().unwrap(),
                "[2001:db8::1]:53".parse().unwrap(),
            ],
        );
        servers.insert("corp.example", "10.1.0.1:53".parse().unwrap());
        servers
    }

    #[test]
    fn text_puts_default_domain_first_in_preference_order() {
        let mut out = Vec::new();
        render_name_servers(&mut out, &servers(), 1, IpPreference::Ipv6First, false).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ndots: 1\ndefault (ipv6-first):\n  [2001:db8::1]:53\n  10.0.0.1:53\ncorp.example:\n  10.1.0.1:53\n"
        );
    }

    #[test]
    fn json_separates_default_and_domains() {
        let mut out = Vec::new();
        render_name_servers(&mut out, &servers(), 5, IpPreference::Ipv4Only, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["ndots"], 5);
        assert_eq!(value["default"], serde_json::json!(["10.0.0.1:53"]));
        assert_eq!(
            value["domains"]["corp.example"],
            serde_json::json!(["10.1.0.1:53"])
        );
        assert!(value["domains"].get("").is_none());
    }

    #[test]
    fn text_reports_ndots_before_servers() {
        let mut out = Vec::new();
        render_name_servers(&mut out, &NameServers::new(), 15, IpPreference::AsListed, false)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ndots: 15\ndefault (as-listed):\n"
        );
    }
}

mod run_error {
    use super::*;

    #[test]
    fn fetch_error_displays_source() {
        let error = RunError::Fetch(FetchError::Unsupported);
        assert_eq!(
            error.to_string(),
            "Failed to enumerate adapters: Adapter enumeration is not supported on this platform"
        );
    }

    #[test]
    fn discovery_error_displays_source() {
        let error = RunError::Discovery(DnsError::Fetch(FetchError::BufferGrowth {
            attempts: 3,
            size: 40_000,
        }));
        assert!(error.to_string().starts_with("Failed to discover name servers: "));
        assert!(error.to_string().contains("after 3 attempts"));
    }
}
