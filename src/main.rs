use tracing_subscriber::EnvFilter;
use vipayment::core::config::ClientConfig;
use vipayment::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Reads VIPAYMENT_API_ID / VIPAYMENT_API_KEY from .env or the environment
    #[cfg(feature = "env-file")]
    let config = ClientConfig::from_env_auto("vipayment")?;
    #[cfg(not(feature = "env-file"))]
    let config = ClientConfig::from_env("vipayment")?;
    if !config.has_credentials() {
        println!("VIPAYMENT_API_ID / VIPAYMENT_API_KEY not set, requests will be rejected");
    }

    let (host, mut events) = ChannelHost::new();
    let client = VipaymentBuilder::from_config(config)
        .with_host(std::sync::Arc::new(host))
        .build()?;

    println!("Fetching profile...");
    let profile = client.profile.get_profile(RequestOptions::new("profile"));

    println!("Fetching prepaid services...");
    let services = client
        .prepaid
        .get_services(RequestOptions::new("services").with_field("filter_type", "type"));

    match profile.await {
        Ok(payload) => println!("Profile: {}", payload),
        Err(e) => println!("Error fetching profile: {}", e),
    }

    match services.await {
        Ok(payload) => {
            let count = payload["data"].as_array().map_or(0, Vec::len);
            println!("Found {} prepaid services", count);
        }
        Err(e) => println!("Error fetching services: {}", e),
    }

    // Both outcomes were also routed to the host, in completion order
    drop(client);
    while let Some(event) = events.recv().await {
        match event {
            HostEvent::Command { command, .. } => println!("host ran `{}`", command),
            HostEvent::Raised { command, message } => println!("host raised `{}`: {}", command, message),
        }
    }

    Ok(())
}
