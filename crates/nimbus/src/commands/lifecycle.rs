use colored::Colorize;
use nimbus_cloud::NodeDriver;
use nimbus_cloud_softlayer::SoftLayerNodeDriver;

pub async fn handle_destroy(driver: &SoftLayerNodeDriver, id: &str) -> anyhow::Result<()> {
    let node = super::find_node(driver, id).await?;
    println!("ノード {} を削除中...", node.name.cyan());

    let outcome = driver.destroy_node(&node).await?;
    super::finish(outcome, &format!("ノード {} のキャンセルを受け付けました", node.name))
}

pub async fn handle_reboot(
    driver: &SoftLayerNodeDriver,
    id: &str,
    mode: Option<&str>,
) -> anyhow::Result<()> {
    let node = super::find_node(driver, id).await?;
    println!(
        "ノード {} を再起動中 ({})...",
        node.name.cyan(),
        mode.unwrap_or("default").yellow()
    );

    let outcome = driver.reboot_node(&node, mode).await?;
    super::finish(outcome, &format!("ノード {} を再起動しました", node.name))?;
    Ok(())
}
