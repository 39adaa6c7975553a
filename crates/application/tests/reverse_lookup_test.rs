mod helpers;

use arpdns_application::use_cases::ReverseLookupUseCase;
use arpdns_domain::{
    EthersError, LookupOutcome, RecordType, ResolutionError, ReverseLookupError, ReverseQuery,
};
use helpers::{MockAddressResolver, MockStaticHostTable};
use std::sync::Arc;

const QUERY_NAME: &str = "4.3.2.1.in-addr.arpa.";

fn make_use_case(
    resolver: &MockAddressResolver,
    table: &MockStaticHostTable,
) -> ReverseLookupUseCase {
    ReverseLookupUseCase::new(Arc::new(resolver.clone()), Arc::new(table.clone()))
}

fn ptr_query(name: &str) -> ReverseQuery {
    ReverseQuery::new(name, RecordType::PTR)
}

// ── answers ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unknown_mac_answers_with_hardware_address() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    resolver.set_reply("1.2.3.4", "aa:bb:cc:dd:ee:ff");

    let outcome = make_use_case(&resolver, &table)
        .execute(&ptr_query(QUERY_NAME))
        .await;

    let answer = outcome.answer().expect("expected an answer");
    assert_eq!(&*answer.zone, QUERY_NAME);
    assert_eq!(answer.ttl, 3600);
    assert_eq!(answer.targets, vec!["aa:bb:cc:dd:ee:ff."]);
}

#[tokio::test]
async fn test_known_mac_answers_with_first_alias() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    resolver.set_reply("1.2.3.4", "aa:bb:cc:dd:ee:ff");
    table.insert("aa:bb:cc:dd:ee:ff", &["printer1", "printer1.local"]);

    let outcome = make_use_case(&resolver, &table)
        .execute(&ptr_query(QUERY_NAME))
        .await;

    assert_eq!(outcome.answer().unwrap().targets, vec!["printer1."]);
}

#[tokio::test]
async fn test_probe_output_is_canonicalized_before_lookup() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    let name = "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.e.f.ip6.arpa.";
    resolver.set_reply("fe80::1", "AA:BB:CC:DD:EE:FF");
    table.insert("aa:bb:cc:dd:ee:ff", &["Laptop"]);

    let outcome = make_use_case(&resolver, &table)
        .execute(&ptr_query(name))
        .await;

    assert_eq!(resolver.requests(), vec!["fe80::1"]);
    assert_eq!(outcome.answer().unwrap().targets, vec!["Laptop."]);
}

#[tokio::test]
async fn test_unparseable_hardware_address_is_used_verbatim() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    resolver.set_reply("1.2.3.4", "00:11:22:33:44:55:66:77");

    let outcome = make_use_case(&resolver, &table)
        .execute(&ptr_query(QUERY_NAME))
        .await;

    assert_eq!(
        outcome.answer().unwrap().targets,
        vec!["00:11:22:33:44:55:66:77."]
    );
}

#[tokio::test]
async fn test_custom_ttl() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    resolver.set_reply("1.2.3.4", "aa:bb:cc:dd:ee:ff");

    let outcome = make_use_case(&resolver, &table)
        .with_ttl(60)
        .execute(&ptr_query(QUERY_NAME))
        .await;

    assert_eq!(outcome.answer().unwrap().ttl, 60);
}

#[tokio::test]
async fn test_table_is_refreshed_on_each_resolution() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    resolver.set_reply("1.2.3.4", "aa:bb:cc:dd:ee:ff");
    let use_case = make_use_case(&resolver, &table);

    use_case.execute(&ptr_query(QUERY_NAME)).await;
    use_case.execute(&ptr_query(QUERY_NAME)).await;

    assert_eq!(table.refresh_count(), 2);
}

#[tokio::test]
async fn test_refresh_failure_still_answers() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    resolver.set_reply("1.2.3.4", "aa:bb:cc:dd:ee:ff");
    table.insert("aa:bb:cc:dd:ee:ff", &["printer1"]);
    table.set_refresh_error(EthersError::MalformedEntry {
        line: 3,
        value: "zz:zz".to_string(),
    });

    let outcome = make_use_case(&resolver, &table)
        .execute(&ptr_query(QUERY_NAME))
        .await;

    assert_eq!(outcome.answer().unwrap().targets, vec!["printer1."]);
}

// ── deferrals ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_non_ptr_query_defers_without_resolving() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    resolver.set_reply("1.2.3.4", "aa:bb:cc:dd:ee:ff");
    let use_case = make_use_case(&resolver, &table);
    let query = ReverseQuery::new(QUERY_NAME, RecordType::Other(1));

    assert_eq!(use_case.execute(&query).await, LookupOutcome::Defer);
    assert!(matches!(
        use_case.answer(&query).await,
        Err(ReverseLookupError::NotPtr(_))
    ));
    assert!(resolver.requests().is_empty());
    assert_eq!(table.refresh_count(), 0);
}

#[tokio::test]
async fn test_arp_timeout_defers() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    resolver.set_error("1.2.3.4", ResolutionError::NoReply("1.2.3.4".to_string()));
    let use_case = make_use_case(&resolver, &table);

    assert!(use_case.execute(&ptr_query(QUERY_NAME)).await.is_defer());
    assert!(matches!(
        use_case.answer(&ptr_query(QUERY_NAME)).await,
        Err(ReverseLookupError::Resolution(ResolutionError::NoReply(_)))
    ));
}

#[tokio::test]
async fn test_transport_unavailable_defers() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    resolver.set_error(
        "1.2.3.4",
        ResolutionError::TransportUnavailable("eth0".to_string()),
    );

    let outcome = make_use_case(&resolver, &table)
        .execute(&ptr_query(QUERY_NAME))
        .await;

    assert!(outcome.is_defer());
}

#[tokio::test]
async fn test_forward_name_defers() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();
    let use_case = make_use_case(&resolver, &table);

    let result = use_case.answer(&ptr_query("printer1.lan.")).await;

    assert!(matches!(result, Err(ReverseLookupError::NotReverseName(_))));
    assert!(resolver.requests().is_empty());
}

#[tokio::test]
async fn test_partial_reverse_zone_defers() {
    let resolver = MockAddressResolver::new();
    let table = MockStaticHostTable::new();

    let outcome = make_use_case(&resolver, &table)
        .execute(&ptr_query("2.1.in-addr.arpa."))
        .await;

    assert!(outcome.is_defer());
    assert!(resolver.requests().is_empty());
}
