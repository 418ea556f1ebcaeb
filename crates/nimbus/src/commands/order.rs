use colored::Colorize;
use nimbus_cloud::{CreateNodeRequest, GuestSpec, NodeDriver};
use nimbus_cloud_softlayer::{SoftLayerNodeDriver, catalog};

fn build_request(template: Option<String>, guests: &[String]) -> anyhow::Result<CreateNodeRequest> {
    let mut request = CreateNodeRequest {
        template,
        guests: None,
    };

    for fqdn in guests {
        let guest = GuestSpec::from_fqdn(fqdn)
            .ok_or_else(|| anyhow::anyhow!("ゲスト名はFQDNで指定してください: {}", fqdn))?;
        request = request.guest(guest);
    }

    Ok(request)
}

pub async fn handle_create(
    driver: &SoftLayerNodeDriver,
    template: Option<String>,
    guests: &[String],
) -> anyhow::Result<()> {
    let request = build_request(template, guests)?;

    let outcome = driver.create_node(&request).await?;
    super::finish(outcome, "注文しました")?;

    println!(
        "{}",
        "ノードの作成には数分かかります。`nimbus nodes` で確認してください".dimmed()
    );
    Ok(())
}

pub async fn handle_verify(
    driver: &SoftLayerNodeDriver,
    template: Option<String>,
    guests: &[String],
) -> anyhow::Result<()> {
    let request = build_request(template, guests)?;

    if let Some(blueprint) = request.template.as_deref().and_then(catalog::order_template) {
        println!(
            "{}",
            format!(
                "テンプレート: {} ({})",
                request.template.as_deref().unwrap_or_default(),
                blueprint.billing_mode()
            )
            .dimmed()
        );
    }

    let outcome = driver.verify_order(&request).await?;
    let receipt = super::finish(outcome, "注文内容は有効です")?;

    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request() {
        let request = build_request(
            Some("example".to_string()),
            &["web1.example.org".to_string(), "web2.example.org".to_string()],
        )
        .unwrap();

        assert_eq!(request.template.as_deref(), Some("example"));
        let guests = request.guests.unwrap();
        assert_eq!(guests.len(), 2);
        assert_eq!(guests[1], GuestSpec::new("web2", "example.org"));
    }

    #[test]
    fn test_build_request_without_guests_keeps_template_default() {
        let request = build_request(Some("example".to_string()), &[]).unwrap();
        assert!(request.guests.is_none());
    }

    #[test]
    fn test_build_request_rejects_bare_hostname() {
        assert!(build_request(Some("example".to_string()), &["web1".to_string()]).is_err());
    }
}
