use colored::Colorize;
use nimbus_cloud::{NodeDriver, NodeLocation};
use nimbus_cloud_softlayer::SoftLayerNodeDriver;

pub async fn handle_sizes(
    driver: &SoftLayerNodeDriver,
    location: Option<&str>,
) -> anyhow::Result<()> {
    let location = match location {
        Some(id) => Some(
            driver
                .list_locations()
                .await?
                .into_iter()
                .find(|l| l.id == id || l.name == id)
                .ok_or_else(|| anyhow::anyhow!("ロケーション '{}' が見つかりません", id))?,
        ),
        None => None,
    };

    let sizes = driver.list_sizes(location.as_ref()).await?;

    println!(
        "{:<12} {:<44} {:>8} {:>8}",
        "ID".bold(),
        "NAME".bold(),
        "RAM(MB)".bold(),
        "DISK(GB)".bold()
    );
    for size in &sizes {
        println!(
            "{:<12} {:<44} {:>8} {:>8}",
            size.id.cyan(),
            size.name,
            size.ram,
            size.disk
        );
    }

    Ok(())
}

pub async fn handle_locations(driver: &SoftLayerNodeDriver) -> anyhow::Result<()> {
    println!("{}", "データセンター一覧を取得中...".blue());

    let locations: Vec<NodeLocation> = driver.list_locations().await?;

    println!();
    if locations.is_empty() {
        println!("{}", "利用可能なデータセンターはありません".dimmed());
        return Ok(());
    }

    for location in &locations {
        println!(
            "  {} {} ({})",
            location.name.cyan(),
            location.id.dimmed(),
            location.country
        );
    }

    Ok(())
}
