//! Registry tests over an lnd-shaped schema

use ir::test_utils::{descriptor, enumeration, field, file, message, method, repeated_field, service};
use ir::{Descriptor, RestFieldDef};
use registry::{Daemon, Lookup, ResolveError, SchemaReader};

/// Two `lnrpc` files, an experimental `routerrpc` file and a `walletrpc` file
/// that refers back into `lnrpc`.
fn lnd_descriptor() -> Descriptor {
    let mut lightning = file("lightning.proto", "lnrpc");
    lightning.messages = vec![
        message(
            "Invoice",
            vec![
                field("memo", "string"),
                field("state", "lnrpc.Invoice.InvoiceState"),
                repeated_field("htlcs", "lnrpc.InvoiceHTLC"),
                repeated_field("route_hints", "lnrpc.RouteHint"),
            ],
        ),
        message(
            "InvoiceHTLC",
            vec![field("amt_msat", "uint64"), field("state", "lnrpc.InvoiceHTLCState")],
        ),
        message("RouteHint", vec![repeated_field("hop_hints", "lnrpc.HopHint")]),
        message("HopHint", vec![field("node_id", "string"), field("chan_id", "uint64")]),
        message("GetInfoRequest", vec![]),
        message("GetInfoResponse", vec![field("alias", "string")]),
        message("SendRequest", vec![field("dest", "bytes")]),
        message("SendResponse", vec![field("payment_route", "lnrpc.Route")]),
        message("Route", vec![repeated_field("hops", "lnrpc.Hop")]),
        message("Hop", vec![field("chan_id", "uint64")]),
    ];
    lightning.enums = vec![enumeration("InvoiceHTLCState", &["ACCEPTED", "SETTLED", "CANCELED"])];
    lightning.services = vec![service(
        "Lightning",
        vec![
            method("SendPayment", "lnrpc.SendRequest", "lnrpc.SendResponse", None),
            method(
                "GetInfo",
                "lnrpc.GetInfoRequest",
                "lnrpc.GetInfoResponse",
                Some(("GET", "/v1/getinfo")),
            ),
        ],
    )];

    let mut invoices = file("invoice.proto", "lnrpc");
    invoices.enums = vec![enumeration("Invoice.InvoiceState", &["OPEN", "SETTLED", "CANCELED"])];

    let mut router = file("router.proto", "routerrpc");
    router.messages = vec![
        message("SendPaymentRequest", vec![field("route_hints", "lnrpc.RouteHint")]),
        message("TrackPaymentRequest", vec![field("payment_hash", "bytes")]),
    ];
    router.services = vec![service(
        "Router",
        vec![
            method(
                "SendPaymentV2",
                "routerrpc.SendPaymentRequest",
                "lnrpc.Payment",
                Some(("POST", "/v2/router/send")),
            ),
            method(
                "TrackPaymentV2",
                "routerrpc.TrackPaymentRequest",
                "lnrpc.Payment",
                Some(("GET", "/v2/router/track/{payment_hash}")),
            ),
        ],
    )];

    let mut wallet = file("walletkit.proto", "walletrpc");
    wallet.messages = vec![message(
        "ListUnspentResponse",
        vec![repeated_field("utxos", "lnrpc.Utxo"), field("hint", "lnrpc.HopHint")],
    )];
    wallet.services = vec![service(
        "WalletKit",
        vec![method(
            "ListUnspent",
            "walletrpc.ListUnspentRequest",
            "walletrpc.ListUnspentResponse",
            Some(("POST", "/v2/wallet/utxos")),
        )],
    )];

    let mut desc = descriptor(vec![lightning, router, invoices, wallet]);
    desc.experimental_packages = vec!["routerrpc".to_string()];
    desc.rest_types
        .entry("lnrpc.HopHint".to_string())
        .or_default()
        .insert("chan_id".to_string(), RestFieldDef {
            type_name: "string".to_string(),
            full_type: None,
        });
    desc
}

fn lnd() -> Daemon { Daemon::new("lnd", lnd_descriptor()) }

#[test]
fn test_resolve_nested_enum_across_files() {
    let daemon = lnd();

    let state = daemon
        .resolve_enum("lnrpc.Invoice.InvoiceState", Lookup::Required)
        .expect("resolution should succeed")
        .expect("required lookup never yields None");
    let values: Vec<_> = state.values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(values, vec!["OPEN", "SETTLED", "CANCELED"]);
    assert_eq!(state.file_name, "invoice.proto");

    let invoice = daemon.message("lnrpc.Invoice").expect("Invoice should resolve");
    let enums = daemon.closure_enums(invoice).expect("closure should succeed");
    let keys: Vec<_> = enums.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["lnrpc.Invoice.InvoiceState", "lnrpc.InvoiceHTLCState"]);
}

#[test]
fn test_invoice_state_enum_closure_single_entry() {
    let mut lightning = file("lightning.proto", "lnrpc");
    lightning.messages =
        vec![message("Invoice", vec![field("state", "lnrpc.Invoice.InvoiceState")])];
    let mut invoices = file("invoice.proto", "lnrpc");
    invoices.enums = vec![enumeration("Invoice.InvoiceState", &["OPEN", "SETTLED", "CANCELED"])];
    let daemon = Daemon::new("lnd", descriptor(vec![lightning, invoices]));

    let state = daemon.enumeration("lnrpc.Invoice.InvoiceState").expect("enum should resolve");
    assert_eq!(state.values.len(), 3);

    let enums = daemon.closure_enums_of("lnrpc.Invoice").expect("closure should succeed");
    assert_eq!(enums.len(), 1);
    assert!(std::ptr::eq(enums["lnrpc.Invoice.InvoiceState"], state));
}

#[test]
fn test_resolution_errors() {
    let daemon = lnd();

    assert_eq!(
        daemon.resolve_message("chainrpc.BlockEpoch", Lookup::Required),
        Err(ResolveError::UnknownNamespace {
            namespace: "chainrpc".to_string(),
            full_type: "chainrpc.BlockEpoch".to_string(),
        })
    );
    assert_eq!(
        daemon.resolve_message("lnrpc.Missing", Lookup::Required),
        Err(ResolveError::UnknownMessage {
            namespace: "lnrpc".to_string(),
            name: "Missing".to_string(),
            full_type: "lnrpc.Missing".to_string(),
        })
    );
    assert!(matches!(
        daemon.resolve_enum("lnrpc.Invoice", Lookup::Required),
        Err(ResolveError::UnknownEnum { .. })
    ));

    // Soft failures never abort
    assert_eq!(daemon.resolve_message("chainrpc.BlockEpoch", Lookup::Optional), Ok(None));
    assert_eq!(daemon.resolve_message("lnrpc.Missing", Lookup::Optional), Ok(None));
    assert_eq!(daemon.resolve_enum("lnrpc.Invoice", Lookup::Optional), Ok(None));
    assert!(daemon.find_enum("uint64").is_none());

    let err = daemon.message("lnrpc.Missing").expect_err("missing message should fail");
    assert_eq!(err.to_string(), "Cannot find message Missing for lnrpc.Missing in the lnrpc package");
}

#[test]
fn test_registered_namespaces_never_unknown() {
    let daemon = lnd();

    for pkg in daemon.packages() {
        for msg in pkg.messages() {
            for reference in msg.references() {
                let (namespace, _) = ir::split_full_type(reference);
                if daemon.package(namespace).is_none() {
                    continue;
                }
                let result = daemon.resolve_message(reference, Lookup::Required);
                assert!(
                    !matches!(result, Err(ResolveError::UnknownNamespace { .. })),
                    "{} reported an unknown namespace",
                    reference
                );
            }
        }
    }
}

#[test]
fn test_soft_resolution_is_reference_identical() {
    let daemon = lnd();

    let first = daemon.find_message("lnrpc.RouteHint").expect("RouteHint should resolve");
    let second = daemon.find_message("lnrpc.RouteHint").expect("RouteHint should resolve");
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(
        first,
        daemon.package("lnrpc").and_then(|p| p.message("RouteHint")).expect("in package")
    ));
}

#[test]
fn test_closure_messages() {
    let daemon = lnd();
    let invoice = daemon.message("lnrpc.Invoice").expect("Invoice should resolve");

    let messages = daemon.closure_messages(invoice).expect("closure should succeed");
    let keys: Vec<_> = messages.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["lnrpc.HopHint", "lnrpc.InvoiceHTLC", "lnrpc.RouteHint"]);
    assert!(!messages.contains_key("lnrpc.Invoice"));

    // Running again with a fresh accumulator gives the same key set
    let again = daemon.closure_messages(invoice).expect("closure should succeed");
    assert_eq!(
        messages.keys().collect::<Vec<_>>(),
        again.keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_closure_crosses_namespaces() {
    let daemon = lnd();

    let messages = daemon
        .closure_messages_of("walletrpc.ListUnspentResponse")
        .expect("closure should succeed");
    // lnrpc.Utxo is not declared anywhere and is skipped
    let keys: Vec<_> = messages.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["lnrpc.HopHint"]);

    let request = daemon
        .closure_messages_of("routerrpc.SendPaymentRequest")
        .expect("closure should succeed");
    assert_eq!(request.len(), 2);
    assert!(request.contains_key("lnrpc.RouteHint"));
    assert!(request.contains_key("lnrpc.HopHint"));

    assert!(matches!(
        daemon.closure_messages_of("lnrpc.Nope"),
        Err(ResolveError::UnknownMessage { .. })
    ));
}

#[test]
fn test_closure_terminates_on_cycles() {
    let mut f = file("cycle.proto", "cyc");
    f.messages = vec![
        message("A", vec![field("b", "cyc.B"), field("kind", "cyc.Kind")]),
        message("B", vec![field("a", "cyc.A"), field("self_ref", "cyc.B")]),
        message("Lonely", vec![field("me", "cyc.Lonely")]),
    ];
    f.enums = vec![enumeration("Kind", &["ONE", "TWO"])];
    let daemon = Daemon::new("cyclic", descriptor(vec![f]));

    let a = daemon.message("cyc.A").expect("A should resolve");
    let messages = daemon.closure_messages(a).expect("closure should terminate");
    let keys: Vec<_> = messages.keys().map(String::as_str).collect();
    // A is reachable from its own fields through B
    assert_eq!(keys, vec!["cyc.A", "cyc.B"]);

    let b = daemon.message("cyc.B").expect("B should resolve");
    let enums = daemon.closure_enums(b).expect("closure should terminate");
    assert_eq!(enums.keys().map(String::as_str).collect::<Vec<_>>(), vec!["cyc.Kind"]);

    let lonely = daemon.closure_messages_of("cyc.Lonely").expect("closure should terminate");
    assert_eq!(lonely.keys().map(String::as_str).collect::<Vec<_>>(), vec!["cyc.Lonely"]);
}

#[test]
fn test_closure_depth_limit() {
    let mut f = file("chain.proto", "chain");
    f.messages = vec![
        message("L0", vec![field("next", "chain.L1")]),
        message("L1", vec![field("next", "chain.L2")]),
        message("L2", vec![field("next", "chain.L3")]),
        message("L3", vec![field("value", "uint32")]),
    ];

    let shallow = Daemon::new("chain", descriptor(vec![f.clone()])).with_max_closure_depth(2);
    assert_eq!(
        shallow.closure_messages_of("chain.L0"),
        Err(ResolveError::ClosureDepthExceeded { message: "chain.L3".to_string(), limit: 2 })
    );
    assert!(matches!(
        shallow.closure_enums_of("chain.L0"),
        Err(ResolveError::ClosureDepthExceeded { limit: 2, .. })
    ));

    let deep = Daemon::new("chain", descriptor(vec![f])).with_max_closure_depth(3);
    assert_eq!(deep.closure_messages_of("chain.L0").map(|m| m.len()), Ok(3));
}

#[test]
fn test_rest_endpoints() {
    let daemon = lnd();
    let endpoints = daemon.rest_endpoints();

    let paths: Vec<_> = endpoints.iter().map(|e| e.rest_path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["/v1/getinfo", "/v2/router/send", "/v2/router/track/{payment_hash}", "/v2/wallet/utxos"]
    );

    let get_info = &endpoints[0];
    assert_eq!(get_info.rest_method, "GET");
    assert_eq!(get_info.link_url, "lightning/get_info");
    assert_eq!(get_info.method_name, "lnrpc.GetInfo");

    assert_eq!(endpoints[1].link_url, "router/send_payment_v2");
    assert_eq!(endpoints[3].link_url, "wallet_kit/list_unspent");

    // SendPayment has no HTTP binding
    assert!(endpoints.iter().all(|e| e.method_name != "lnrpc.SendPayment"));

    let mapped = daemon
        .all_services()
        .flat_map(|s| s.methods.iter())
        .filter(|m| m.rest_mapping.is_some())
        .count();
    assert_eq!(endpoints.len(), mapped);
}

#[test]
fn test_rest_endpoints_single_lightning_entry() {
    let mut lightning = file("lightning.proto", "lnrpc");
    lightning.services = vec![service(
        "Lightning",
        vec![
            method("SendPayment", "lnrpc.SendRequest", "lnrpc.SendResponse", None),
            method(
                "GetInfo",
                "lnrpc.GetInfoRequest",
                "lnrpc.GetInfoResponse",
                Some(("GET", "/v1/getinfo")),
            ),
        ],
    )];
    let daemon = Daemon::new("lnd", descriptor(vec![lightning]));

    let endpoints = daemon.rest_endpoints();
    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].method_name, "lnrpc.GetInfo");
    assert_eq!(endpoints[0].rest_path, "/v1/getinfo");
}

#[test]
fn test_rest_endpoints_path_parameters_sort_first() {
    let mut lightning = file("lightning.proto", "lnrpc");
    lightning.services = vec![service(
        "Lightning",
        vec![
            method(
                "ExportAllChannelBackups",
                "lnrpc.ChanBackupExportRequest",
                "lnrpc.ChanBackupSnapshot",
                Some(("GET", "/v1/channels/backup")),
            ),
            method(
                "CloseChannel",
                "lnrpc.CloseChannelRequest",
                "lnrpc.CloseStatusUpdate",
                Some((
                    "DELETE",
                    "/v1/channels/{channel_point.funding_txid_str}/{channel_point.output_index}",
                )),
            ),
            method(
                "PendingChannels",
                "lnrpc.PendingChannelsRequest",
                "lnrpc.PendingChannelsResponse",
                Some(("GET", "/v1/channels/pending")),
            ),
        ],
    )];

    let daemon = Daemon::new("lnd", descriptor(vec![lightning]));
    let paths: Vec<_> = daemon.rest_endpoints().into_iter().map(|e| e.rest_path).collect();
    assert_eq!(
        paths,
        vec![
            "/v1/channels/{channel_point.funding_txid_str}/{channel_point.output_index}",
            "/v1/channels/backup",
            "/v1/channels/pending",
        ]
    );
}

#[test]
fn test_experimental_services() {
    let daemon = lnd();
    let services = daemon.experimental_services();

    assert_eq!(services.len(), 1);
    assert_eq!(services[0].name, "Router");
    assert_eq!(services[0].lower_name, "router");
    assert_eq!(services[0].file, "router.proto");

    for pkg in daemon.packages() {
        for s in pkg.services() {
            let listed = services.iter().any(|e| e.name == s.name);
            let configured = daemon.experimental_packages().iter().any(|p| p == pkg.name());
            assert_eq!(listed, configured, "service {}", s.name);
        }
    }
}

#[test]
fn test_experimental_services_sorted() {
    let mut a = file("zeta.proto", "zrpc");
    a.services = vec![service("Zeta", vec![]), service("alpha", vec![])];
    let mut b = file("beta.proto", "brpc");
    b.services = vec![service("Beta", vec![])];
    let mut desc = descriptor(vec![a, b]);
    desc.experimental_packages = vec!["zrpc".to_string(), "brpc".to_string()];

    let daemon = Daemon::new("lnd", desc);
    let names: Vec<_> =
        daemon.experimental_services().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["alpha", "Beta", "Zeta"]);
}

#[test]
fn test_repository_links() {
    let daemon = lnd();
    let links = daemon.repository_links();

    let names: Vec<_> = links.iter().map(|l| l.base_name.as_str()).collect();
    assert_eq!(names, vec!["invoice", "lightning", "router", "walletkit"]);
    assert_eq!(
        links[1].grpc_url,
        "https://github.com/lightningnetwork/lnd/blob/abc123/lnrpc/lightning.proto"
    );
    assert_eq!(
        links[1].rest_url,
        "https://github.com/lightningnetwork/lnd/blob/abc123/lnrpc/lightning.swagger.json"
    );
}

#[test]
fn test_repository_links_underscore_before_digit() {
    let daemon = Daemon::new(
        "lnd",
        descriptor(vec![file("a1.proto", "arpc"), file("a_b.proto", "arpc")]),
    );
    let names: Vec<_> = daemon.repository_links().iter().map(|l| l.base_name.as_str()).collect();
    assert_eq!(names, vec!["a_b", "a1"]);
}

#[test]
fn test_rest_message_view() {
    let daemon = lnd();

    let view = daemon
        .resolve_rest_message("lnrpc.HopHint", Lookup::Required)
        .expect("resolution should succeed")
        .expect("required lookup never yields None");
    assert_eq!(view.field("chan_id").map(|f| f.full_type.as_str()), Some("string"));
    assert_eq!(view.field("node_id").map(|f| f.full_type.as_str()), Some("string"));

    // Fetching again yields the same view and the registry is unchanged
    let again = daemon
        .resolve_rest_message("lnrpc.HopHint", Lookup::Required)
        .expect("resolution should succeed");
    assert_eq!(Some(&view), again.as_ref());
    let hop_hint = daemon.message("lnrpc.HopHint").expect("HopHint should resolve");
    assert_eq!(hop_hint.field("chan_id").map(|f| f.full_type.as_str()), Some("uint64"));
    assert!(std::ptr::eq(view.message(), hop_hint));

    assert_eq!(daemon.resolve_rest_message("lnrpc.Nope", Lookup::Optional), Ok(None));
}

#[test]
fn test_endpoint_serialization() {
    let daemon = lnd();
    let json = serde_json::to_value(&daemon.rest_endpoints()[0]).expect("serializable");
    assert_eq!(json["restPath"], "/v1/getinfo");
    assert_eq!(json["linkUrl"], "lightning/get_info");
}
