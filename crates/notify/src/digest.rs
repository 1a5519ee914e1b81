//! Batch digest grouping.
//!
//! When the batching queue flushes, the drained items are partitioned by
//! category. A partition of one delivers as a standalone notification,
//! identical in shape to the immediate path; a larger partition collapses
//! into a single summary notification carrying the member ids.

use pulse_core::{Category, DeliveredNotification};

use crate::queue::QueuedNotification;

/// Collapse a flushed batch into the deliveries the sink should render.
///
/// Partitions keep first-seen category order, and items inside a partition
/// keep their enqueue order, so output is deterministic for a given batch.
pub fn group_into_deliveries(items: Vec<QueuedNotification>) -> Vec<DeliveredNotification> {
    let mut partitions: Vec<(Category, Vec<QueuedNotification>)> = Vec::new();

    for item in items {
        match partitions.iter_mut().find(|(cat, _)| *cat == item.category) {
            Some((_, members)) => members.push(item),
            None => partitions.push((item.category, vec![item])),
        }
    }

    partitions
        .into_iter()
        .map(|(category, members)| {
            if members.len() == 1 {
                let item = members.into_iter().next().expect("partition has one item");
                DeliveredNotification::single(
                    category,
                    item.title,
                    item.body,
                    item.recipient.as_ref(),
                    item.payload,
                )
            } else {
                let ids = members.iter().map(|m| m.id).collect();
                DeliveredNotification::summary(category, ids)
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn item(category: Category, title: &str) -> QueuedNotification {
        QueuedNotification {
            id: Uuid::now_v7(),
            category,
            title: title.to_string(),
            body: "b".to_string(),
            recipient: Some("u1".to_string()),
            payload: serde_json::json!({"chatId": "c1"}),
            enqueued_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn empty_batch_produces_nothing() {
        assert!(group_into_deliveries(Vec::new()).is_empty());
    }

    #[test]
    fn singleton_partition_delivers_standalone() {
        let deliveries = group_into_deliveries(vec![item(Category::Message, "hello")]);

        assert_eq!(deliveries.len(), 1);
        let n = &deliveries[0];
        assert_eq!(n.title, "hello");
        assert_eq!(n.tag, "message_u1");
        assert_eq!(n.payload["chatId"], "c1");
        assert!(!n.renotify);
    }

    #[test]
    fn large_partition_collapses_to_summary() {
        let batch: Vec<_> = (0..10).map(|i| item(Category::Message, &format!("m{i}"))).collect();
        let deliveries = group_into_deliveries(batch);

        assert_eq!(deliveries.len(), 1);
        let n = &deliveries[0];
        assert_eq!(n.title, "New Messages");
        assert_eq!(n.body, "10 new message notifications");
        assert_eq!(n.tag, "message_summary");
        assert_eq!(n.payload["itemIds"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn mixed_categories_split_into_standalone_and_summary() {
        let deliveries = group_into_deliveries(vec![
            item(Category::Message, "m1"),
            item(Category::FileShare, "f1"),
            item(Category::Message, "m2"),
        ]);

        assert_eq!(deliveries.len(), 2);
        // First-seen order: message partition first.
        assert_eq!(deliveries[0].tag, "message_summary");
        assert_eq!(deliveries[0].body, "2 new message notifications");
        assert_eq!(deliveries[1].title, "f1");
        assert_eq!(deliveries[1].tag, "file_share_u1");
    }

    #[test]
    fn standalone_security_from_batch_renotifies() {
        let deliveries = group_into_deliveries(vec![item(Category::Security, "alert")]);
        assert!(deliveries[0].renotify);
    }
}
