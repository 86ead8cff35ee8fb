mod common;

use common::{test_client, RecordingTransport};
use futures::future::join_all;
use std::collections::HashSet;
use std::time::Duration;
use vipayment::prelude::*;

#[tokio::test]
async fn test_dispatch_returns_before_completion() {
    let transport = RecordingTransport::new();
    transport.reply_after("prepaid", r#"{"result":true}"#, Duration::from_millis(200));
    let (client, mut events) = test_client(transport);

    let pending = client.prepaid.get_services(RequestOptions::new("svc"));
    assert!(events.try_recv().is_err());

    pending.await.unwrap();
    assert!(events.recv().await.is_some());
}

#[tokio::test]
async fn test_completion_order_follows_responses() {
    let transport = RecordingTransport::new();
    transport.reply_after("prepaid", r#"{"from":"prepaid"}"#, Duration::from_millis(300));
    transport.reply_after("profile", r#"{"from":"profile"}"#, Duration::from_millis(10));
    let (client, mut events) = test_client(transport);

    let slow = client.prepaid.get_services(RequestOptions::new("slow"));
    let fast = client.profile.get_profile(RequestOptions::new("fast"));

    let first = events.recv().await.unwrap();
    let second = events.recv().await.unwrap();
    let commands: Vec<_> = [first, second]
        .into_iter()
        .map(|event| match event {
            HostEvent::Command { command, .. } => command,
            HostEvent::Raised { command, .. } => command,
        })
        .collect();

    assert_eq!(
        commands,
        vec![
            "VIPaymentLibsonResponse fast".to_string(),
            "VIPaymentLibsonResponse slow".to_string(),
        ]
    );
    assert!(slow.await.is_ok());
    assert!(fast.await.is_ok());
}

#[tokio::test]
async fn test_every_call_delivered_exactly_once() {
    let transport = RecordingTransport::new();
    transport.fail("social-media", "reset by peer");
    let (client, mut events) = test_client(transport.clone());

    let mut calls = Vec::new();
    for i in 0..20 {
        let options = RequestOptions::new(format!("call-{}", i));
        calls.push(if i % 4 == 0 {
            client.social_media.get_status(options)
        } else {
            client.prepaid.get_status(options)
        });
    }

    let ids: HashSet<_> = calls.iter().map(|call| call.call_id()).collect();
    assert_eq!(ids.len(), 20);

    let results = join_all(calls).await;
    assert_eq!(results.iter().filter(|r| r.is_err()).count(), 5);
    assert_eq!(transport.requests().len(), 20);

    let mut delivered = 0;
    while let Ok(event) = events.try_recv() {
        delivered += 1;
        if let HostEvent::Command { command, .. } = event {
            assert!(command.starts_with("VIPaymentLibsonResponse call-"));
        }
    }
    assert_eq!(delivered, 20);
}

#[tokio::test]
async fn test_dropped_handle_still_reaches_host() {
    let transport = RecordingTransport::new();
    let (client, mut events) = test_client(transport);

    drop(client.prepaid.get_services(RequestOptions::new("fire-and-forget")));

    match events.recv().await {
        Some(HostEvent::Command { command, .. }) => {
            assert_eq!(command, "VIPaymentLibsonResponse fire-and-forget");
        }
        other => panic!("expected delivery, got {other:?}"),
    }
}

#[tokio::test]
async fn test_bounded_in_flight_limits_concurrency() {
    let transport = RecordingTransport::new();
    transport.reply_after("prepaid", r#"{"ok":1}"#, Duration::from_millis(20));
    let (host, _events) = ChannelHost::new();
    let client = VipaymentBuilder::new()
        .with_base_url(common::BASE_URL.to_string())
        .with_max_in_flight(2)
        .with_transport(transport.clone())
        .with_host(std::sync::Arc::new(host))
        .build()
        .unwrap();

    let calls: Vec<_> = (0..6)
        .map(|i| client.prepaid.get_status(RequestOptions::new(format!("b{}", i))))
        .collect();

    let results = join_all(calls).await;
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(transport.requests().len(), 6);
    assert_eq!(transport.peak_in_flight(), 2);
}

#[tokio::test]
async fn test_unbounded_calls_overlap() {
    let transport = RecordingTransport::new();
    transport.reply_after("prepaid", r#"{"ok":1}"#, Duration::from_millis(50));
    let (client, _events) = test_client(transport.clone());

    let calls: Vec<_> = (0..4)
        .map(|i| client.prepaid.get_status(RequestOptions::new(format!("u{}", i))))
        .collect();

    join_all(calls).await;
    assert_eq!(transport.peak_in_flight(), 4);
}
