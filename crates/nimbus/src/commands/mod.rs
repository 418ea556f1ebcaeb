pub mod catalog;
pub mod lifecycle;
pub mod nodes;
pub mod order;

use colored::Colorize;
use nimbus_cloud::{NodeDriver, Outcome, Refusal};
use nimbus_cloud_softlayer::{SoftLayerNode, SoftLayerNodeDriver, catalog as sl_catalog};

/// IDでノードを探す（種別を知るために一覧を取得する）
pub async fn find_node(driver: &SoftLayerNodeDriver, id: &str) -> anyhow::Result<SoftLayerNode> {
    driver
        .list_nodes()
        .await?
        .into_iter()
        .find(|n| n.id == id)
        .ok_or_else(|| anyhow::anyhow!("ノード '{}' が見つかりません", id))
}

/// 実行されなかった操作をエラーとして返す
pub fn refused(reason: &Refusal) -> anyhow::Error {
    match reason {
        Refusal::MissingTemplate | Refusal::UnknownTemplate(_) => anyhow::anyhow!(
            "操作は実行されませんでした: {}\n利用可能なテンプレート: {}",
            reason,
            sl_catalog::template_names().join(", ")
        ),
        _ => anyhow::anyhow!("操作は実行されませんでした: {}", reason),
    }
}

/// Outcome を表示し、拒否された場合はエラーにする
pub fn finish<T>(outcome: Outcome<T>, message: &str) -> anyhow::Result<T> {
    match outcome {
        Outcome::Completed(value) => {
            println!("{}", format!("✓ {}", message).green());
            Ok(value)
        }
        Outcome::Refused(reason) => Err(refused(&reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refused_lists_templates() {
        let err = refused(&Refusal::UnknownTemplate("enormous".to_string()));
        let msg = err.to_string();
        assert!(msg.contains("unknown order template: enormous"));
        assert!(msg.contains("example"));

        let err = refused(&Refusal::NoBillingItem);
        assert!(!err.to_string().contains("テンプレート"));
    }
}
