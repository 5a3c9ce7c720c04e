//! End-to-end parsing of captured Cisco screens through the dispatcher.

use std::fs;
use std::path::PathBuf;

use netscreen_parser::{Dispatcher, ParseOutput, ParsedResponse, ResultNode, ResultTree, parse_response};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).expect("fixture file must be readable")
}

fn parse(command: &str, fixture_name: &str) -> ParseOutput {
    Dispatcher::default()
        .parse(command, &fixture(fixture_name))
        .unwrap_or_else(|| panic!("{command} on {fixture_name} returned nothing"))
}

/// Flattens a record into `(column, value)` pairs for whole-record asserts.
fn pairs(tree: &ResultTree, key: &str) -> Vec<(String, String)> {
    tree.record(key)
        .unwrap_or_else(|| panic!("no record for {key}"))
        .iter()
        .map(|(column, value)| (column.to_string(), value.clone()))
        .collect()
}

fn expected(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .collect()
}

#[test]
fn test_show_interface_status() {
    let output = parse("show interface status", "show_interface_status.txt");
    let tree = output.as_tree().expect("no duplicate ports");

    assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["Te1/0/1", "Gi0/1", "Po1"]);
    assert_eq!(
        pairs(tree, "Te1/0/1"),
        expected(&[
            ("Port", "Te1/0/1"),
            ("Name", "description"),
            ("Status", "connected"),
            ("Vlan", "trunk"),
            ("Duplex", "full"),
            ("Speed", "10G"),
            ("Type", "SFP-10GBase-SR"),
        ])
    );
    assert_eq!(
        pairs(tree, "Gi0/1"),
        expected(&[
            ("Port", "Gi0/1"),
            ("Name", "looong description"),
            ("Status", "err-disabled"),
            ("Vlan", "2"),
            ("Duplex", "auto"),
            ("Speed", "a-1000"),
            ("Type", "10/100/1000BaseTX"),
        ])
    );
    assert_eq!(
        pairs(tree, "Po1"),
        expected(&[
            ("Port", "Po1"),
            ("Name", ""),
            ("Status", "connected"),
            ("Vlan", "trunk"),
            ("Duplex", "a-full"),
            ("Speed", "a-1000"),
            ("Type", ""),
        ])
    );
}

#[test]
fn test_show_interface_counters() {
    let output = parse("show interface counters", "show_interface_counters.txt");
    let tree = output.as_tree().expect("no duplicate ports");

    assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["Gi0/1", "Po1"]);
    assert_eq!(
        pairs(tree, "Gi0/1"),
        expected(&[
            ("Port", "Gi0/1"),
            ("InOctets", "1024"),
            ("InUcastPkts", "64"),
            ("InMcastPkts", "32"),
            ("InBcastPkts", "16"),
            ("OutOctets", "2048"),
            ("OutUcastPkts", "512"),
            ("OutMcastPkts", "256"),
            ("OutBcastPkts", "128"),
        ])
    );
    assert_eq!(
        pairs(tree, "Po1"),
        expected(&[
            ("Port", "Po1"),
            ("InOctets", "12345678901234"),
            ("InUcastPkts", "11223344556677"),
            ("InMcastPkts", "12312312312312"),
            ("InBcastPkts", "67890123456789"),
            ("OutOctets", "43210987654321"),
            ("OutUcastPkts", "77665544332211"),
            ("OutMcastPkts", "21321321321321"),
            ("OutBcastPkts", "98765432109876"),
        ])
    );
}

#[test]
fn test_show_mac_address_table_is_two_levels() {
    let output = parse("show mac address-table", "show_mac_address_table.txt");
    let tree = output.as_tree().expect("vlan/mac pairs are unique");

    assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["All", "100", "200"]);
    let vlan100 = tree.get("100").and_then(ResultNode::as_branch).unwrap();
    assert_eq!(
        vlan100.keys().collect::<Vec<_>>(),
        vec!["0102.0304.0506", "0102.0304.0507"]
    );
    assert_eq!(
        pairs(tree.get("All").and_then(ResultNode::as_branch).unwrap(), "ffff.ffff.ffff"),
        expected(&[
            ("Vlan", "All"),
            ("MacAddress", "ffff.ffff.ffff"),
            ("Type", "STATIC"),
            ("Ports", "CPU"),
        ])
    );

    // The same MAC in two VLANs is two entries, not a collision.
    let in_200 = tree
        .get_path(&["200", "0102.0304.0506"])
        .and_then(ResultNode::as_record)
        .unwrap();
    assert_eq!(in_200.get("Vlan").map(String::as_str), Some("200"));
    assert_eq!(tree.records().len(), 5);
}

#[test]
fn test_show_lldp_neighbors() {
    let output = parse("show lldp neighbors", "show_lldp_neighbors.txt");
    let tree = output.as_tree().unwrap();

    assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["Gi1/0/1", "Gi1/0/2"]);
    assert_eq!(
        pairs(tree, "Gi1/0/2"),
        expected(&[
            ("DeviceID", "AP-01"),
            ("LocalIntf", "Gi1/0/2"),
            ("HoldTime", "120"),
            ("Capability", "B,W"),
            ("PortID", "ffff.ffff.ffff"),
        ])
    );
}

#[test]
fn test_show_ip_interface_brief() {
    let output = parse("show ip interface brief", "show_ip_interface_brief.txt");
    let tree = output.as_tree().unwrap();

    assert_eq!(
        tree.keys().collect::<Vec<_>>(),
        vec!["Vlan1", "Vlan2", "GigabitEthernet0/1"]
    );
    assert_eq!(
        pairs(tree, "Vlan2"),
        expected(&[
            ("Interface", "Vlan2"),
            ("IPAddress", "192.168.100.100"),
            ("OK", "YES"),
            ("Method", "NVRAM"),
            ("Status", "administratively down"),
            ("Protocol", "down"),
        ])
    );
    assert_eq!(
        tree.record("GigabitEthernet0/1")
            .and_then(|record| record.get("IPAddress"))
            .map(String::as_str),
        Some("unassigned")
    );
}

#[test]
fn test_show_arp() {
    let output = parse("show arp", "show_arp.txt");
    let tree = output.as_tree().unwrap();

    assert_eq!(
        pairs(tree, "10.0.0.2"),
        expected(&[
            ("Protocol", "Internet"),
            ("Address", "10.0.0.2"),
            ("Age", "0"),
            ("HardwareAddr", "ffff.ffff.ffff"),
            ("Type", "ARPA"),
            ("Interface", "Vlan1"),
        ])
    );
}

#[test]
fn test_abbreviated_commands_match_full_commands() {
    let cases = [
        ("sh int status", "show interface status", "show_interface_status.txt"),
        ("s int co", "show interface counters", "show_interface_counters.txt"),
        ("sh mac add", "show mac address-table", "show_mac_address_table.txt"),
        ("sh ll n", "show lldp neighbors", "show_lldp_neighbors.txt"),
        ("sh ip int br", "show ip interface brief", "show_ip_interface_brief.txt"),
        ("sh ar", "show arp", "show_arp.txt"),
    ];
    for (short, full, fixture_name) in cases {
        assert_eq!(parse(short, fixture_name), parse(full, fixture_name), "{short}");
    }
}

#[test]
fn test_empty_text_returns_none_for_every_command() {
    let dispatcher = Dispatcher::default();
    for info in dispatcher.supported_commands() {
        assert_eq!(dispatcher.parse(info.command, ""), None, "{}", info.command);
    }
    assert_eq!(dispatcher.parse("unknown command", ""), None);
}

#[test]
fn test_parsing_is_idempotent() {
    for (command, fixture_name) in [
        ("show interface counters", "show_interface_counters.txt"),
        ("show mac address-table", "show_mac_address_table.txt"),
    ] {
        assert_eq!(parse(command, fixture_name), parse(command, fixture_name));
    }
}

#[test]
fn test_crlf_screen_matches_lf_screen() {
    let raw = fixture("show_interface_status_crlf.txt");
    assert!(raw.contains("\r\n"));

    let from_crlf = parse_response("show interface status", &raw);
    let from_lf = parse_response("show interface status", &fixture("show_interface_status.txt"));
    assert!(from_crlf.is_some());
    assert_eq!(from_crlf, from_lf);

    let response = ParsedResponse::new("show interface status", &raw);
    assert_eq!(response.structured(), from_lf);
}

#[test]
fn test_explicit_separator_without_normalization() {
    let raw = fixture("show_interface_status_crlf.txt");
    let output = Dispatcher::default()
        .parse_with_separator("show interface status", &raw, "\r\n")
        .unwrap();
    assert_eq!(output.as_tree().map(ResultTree::len), Some(3));
}

#[test]
fn test_duplicate_ports_spill_into_slots() {
    let text = "Port      Name               Status       Vlan       Duplex  Speed Type\n\
                Gi0/1     first              connected    1            full    1000 copper\n\
                Gi0/1     second             notconnect   2            full    1000 copper\n";
    let output = parse_response("show interface status", text).unwrap();
    let slots = output.as_slots().expect("collision must produce slots");

    assert_eq!(slots.len(), 2);
    let name = |slot: &ResultTree| {
        slot.record("Gi0/1")
            .and_then(|record| record.get("Name"))
            .cloned()
    };
    assert_eq!(name(&slots[0]).as_deref(), Some("first"));
    assert_eq!(name(&slots[1]).as_deref(), Some("second"));
}

#[test]
fn test_generic_fallback() {
    let output = parse_response("unknown command", "dummy response\n123 abc xyz").unwrap();
    assert_eq!(
        output.as_tokens().unwrap(),
        &[vec!["dummy", "response"], vec!["123", "abc", "xyz"]]
    );
}

#[test]
fn test_results_serialize_as_nested_maps() {
    let output = parse("show mac address-table", "show_mac_address_table.txt");
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["100"]["0102.0304.0507"]["Type"], "DYNAMIC");
    assert_eq!(json["All"]["ffff.ffff.ffff"]["Ports"], "CPU");
}
