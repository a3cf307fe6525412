use std::time::Duration;

/// Outbound client shared by one provider or lookup service.
/// Without `timeout_secs` requests wait as long as the peer does.
pub fn client(timeout_secs: Option<u64>) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
