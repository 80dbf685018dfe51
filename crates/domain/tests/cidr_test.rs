use tollgate_domain::{parse_ipv4, Cidr, DomainError, PrefixSet};

#[test]
fn test_cidr_parse_valid() {
    let cidr: Cidr = "10.0.0.0/8".parse().unwrap();

    assert_eq!(cidr.address(), 0x0A00_0000);
    assert_eq!(cidr.prefix_len(), 8);
    assert_eq!(cidr.to_string(), "10.0.0.0/8");
}

#[test]
fn test_cidr_parse_missing_mask() {
    let result = "192.168.1.0".parse::<Cidr>();

    assert!(matches!(result, Err(DomainError::InvalidCidr(msg)) if msg.contains("must include prefix")));
}

#[test]
fn test_cidr_parse_prefix_too_long() {
    assert!("192.168.1.0/33".parse::<Cidr>().is_err());
}

#[test]
fn test_cidr_new_rejects_prefix_over_32() {
    assert!(Cidr::new(0, 33).is_err());
    assert!(Cidr::new(0, 32).is_ok());
    assert!(Cidr::new(0, 0).is_ok());
}

#[test]
fn test_cidr_contains() {
    let cidr: Cidr = "172.16.0.0/12".parse().unwrap();

    assert!(cidr.contains(parse_ipv4("172.16.0.1").unwrap()));
    assert!(cidr.contains(parse_ipv4("172.31.255.255").unwrap()));
    assert!(!cidr.contains(parse_ipv4("172.32.0.0").unwrap()));
}

#[test]
fn test_cidr_zero_prefix_contains_everything() {
    let cidr = Cidr::new(0, 0).unwrap();

    assert!(cidr.contains(0));
    assert!(cidr.contains(u32::MAX));
}

#[test]
fn test_parse_ipv4_accepts_dotted_quad() {
    assert_eq!(parse_ipv4("123.234.56.78").unwrap(), 0x7BEA_384E);
    assert_eq!(parse_ipv4("0.0.0.0").unwrap(), 0);
    assert_eq!(parse_ipv4("255.255.255.255").unwrap(), u32::MAX);
}

#[test]
fn test_parse_ipv4_rejects_malformed() {
    for bad in ["", "1.2.3", "1.2.3.4.5", "256.1.1.1", "1.2.3.-4", "a.b.c.d", "1.2.3.4 ", "::1"] {
        assert!(parse_ipv4(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn test_prefix_set_agrees_with_cidr_contains() {
    let cidrs: Vec<Cidr> = ["10.0.0.0/8", "10.1.0.0/16", "192.168.100.0/22", "8.8.8.8/32"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let set: PrefixSet = cidrs.iter().collect();

    for probe in [
        "10.0.0.5",
        "10.1.2.3",
        "11.0.0.0",
        "192.168.101.7",
        "192.168.104.1",
        "8.8.8.8",
        "8.8.8.9",
    ] {
        let addr = parse_ipv4(probe).unwrap();
        let expected = cidrs.iter().any(|c| c.contains(addr));
        assert_eq!(set.contains(addr), expected, "{probe}");
    }
}
