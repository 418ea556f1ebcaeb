use colored::Colorize;
use nimbus_cloud::NodeDriver;
use nimbus_cloud_softlayer::SoftLayerNodeDriver;

pub async fn handle(driver: &SoftLayerNodeDriver) -> anyhow::Result<()> {
    println!("{}", "ノード一覧を取得中...".blue());

    let nodes = driver.list_nodes().await?;

    println!();
    if nodes.is_empty() {
        println!("{}", "ノードはありません".dimmed());
        return Ok(());
    }

    println!(
        "{:<12} {:<24} {:<14} {:<6} {:<16} {:<16}",
        "ID".bold(),
        "NAME".bold(),
        "KIND".bold(),
        "STATE".bold(),
        "PUBLIC IP".bold(),
        "PRIVATE IP".bold()
    );

    for node in &nodes {
        let kind = node
            .extra
            .kind
            .map(|k| k.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        // アドレスは作成直後の数分間は未割り当て
        let public_ip = node.public_ip.as_deref().unwrap_or("-");
        let private_ip = node.private_ip.as_deref().unwrap_or("-");

        println!(
            "{:<12} {:<24} {:<14} {:<6} {:<16} {:<16}",
            node.id,
            node.name.cyan(),
            kind,
            node.state,
            public_ip,
            private_ip
        );
    }

    let pending = nodes.iter().filter(|n| !n.has_public_ip()).count();
    if pending > 0 {
        println!();
        println!(
            "{}",
            format!("{} 台のノードはパブリックIPが未割り当てです", pending).dimmed()
        );
    }

    Ok(())
}
