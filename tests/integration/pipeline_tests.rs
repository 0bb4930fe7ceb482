//! Fetch and batch write phases over HTTP and a real store

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{
        EXTRACT_FIELD, IMAGE_FIELD, KEY_FIELD, TABLE, numbered_titles, summary_json, targets,
        titled_base,
    };
    use crate::common::{FlakyStore, SummaryServer};
    use crate::{assert_err, assert_ok};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use wiki_enrich::{
        BatchWriter, CellValue, EnrichError, EnrichmentFetcher, PendingUpdate, RecordId,
        RecordStore, RequestThrottle,
    };

    fn encoded(title: &str) -> String {
        title.replace(' ', "%20")
    }

    async fn stub_all(server: &SummaryServer, titles: &[String]) {
        for title in titles {
            server
                .stub(
                    &encoded(title),
                    200,
                    summary_json(title, &format!("About {}", title), None),
                )
                .await;
        }
    }

    fn updates(n: usize) -> Vec<PendingUpdate> {
        (0..n)
            .map(|i| PendingUpdate {
                id: RecordId::new(format!("rec{}", i)),
                extract: Some(format!("About Page {}", i)),
                image: None,
            })
            .collect()
    }

    // ==================== Fetch Phase ====================

    #[tokio::test]
    async fn test_fetch_yields_one_update_per_row_in_order() {
        let server = SummaryServer::start().await;
        let titles = numbered_titles(5);
        stub_all(&server, &titles).await;

        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let store = FlakyStore::new(titled_base(&refs));
        let records = assert_ok!(store.select_records(TABLE, &[KEY_FIELD]).await);

        let fetcher = EnrichmentFetcher::new(Arc::new(server.client()), RequestThrottle::disabled());
        let updates = assert_ok!(fetcher.fetch_updates(&records, KEY_FIELD).await);

        assert_eq!(updates.len(), 5);
        for (i, update) in updates.iter().enumerate() {
            assert_eq!(update.id.as_str(), format!("rec{}", i));
            assert_eq!(update.extract, Some(format!("About Page {}", i)));
        }

        let paths = server.requested_paths().await;
        let expected: Vec<String> = titles.iter().map(|t| encoded(t)).collect();
        for (path, segment) in paths.iter().zip(&expected) {
            assert!(path.ends_with(segment.as_str()), "{} vs {}", path, segment);
        }
    }

    #[tokio::test]
    async fn test_fetch_waits_between_requests() {
        let server = SummaryServer::start().await;
        let titles = numbered_titles(3);
        stub_all(&server, &titles).await;

        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let store = FlakyStore::new(titled_base(&refs));
        let records = assert_ok!(store.select_records(TABLE, &[KEY_FIELD]).await);

        let throttle = RequestThrottle::new(Duration::from_millis(60));
        let fetcher = EnrichmentFetcher::new(Arc::new(server.client()), throttle);

        let start = Instant::now();
        assert_ok!(fetcher.fetch_updates(&records, KEY_FIELD).await);
        assert!(start.elapsed() >= Duration::from_millis(180));
    }

    #[tokio::test]
    async fn test_fetch_delay_comes_on_top_of_response_latency() {
        let server = SummaryServer::start().await;
        let titles = numbered_titles(3);
        for title in &titles {
            server
                .stub_delayed(
                    &encoded(title),
                    200,
                    summary_json(title, "Slow.", None),
                    Duration::from_millis(100),
                )
                .await;
        }

        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let store = FlakyStore::new(titled_base(&refs));
        let records = assert_ok!(store.select_records(TABLE, &[KEY_FIELD]).await);

        let throttle = RequestThrottle::new(Duration::from_millis(50));
        let fetcher = EnrichmentFetcher::new(Arc::new(server.client()), throttle);

        let start = Instant::now();
        assert_ok!(fetcher.fetch_updates(&records, KEY_FIELD).await);
        assert!(start.elapsed() >= Duration::from_millis(3 * 150));
        assert_eq!(server.requested_paths().await.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_keeps_going_through_unknown_titles() {
        let server = SummaryServer::start().await;
        server
            .stub("Cat", 200, summary_json("Cat", "A cat.", Some("https://img/Cat.jpg")))
            .await;
        server
            .stub("Qwxzzy", 404, crate::common::fixtures::not_found_json("Qwxzzy"))
            .await;

        let store = FlakyStore::new(titled_base(&["Qwxzzy", "Cat"]));
        let records = assert_ok!(store.select_records(TABLE, &[KEY_FIELD]).await);
        let fetcher = EnrichmentFetcher::new(Arc::new(server.client()), RequestThrottle::disabled());

        let updates = assert_ok!(fetcher.fetch_updates(&records, KEY_FIELD).await);
        assert_eq!(updates[0].extract, None);
        assert_eq!(updates[0].image, None);
        assert_eq!(updates[1].extract.as_deref(), Some("A cat."));
    }

    // ==================== Write Phase ====================

    #[tokio::test]
    async fn test_writes_are_chunked_and_sequential() {
        let titles = numbered_titles(120);
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let store = Arc::new(
            FlakyStore::new(titled_base(&refs)).with_write_delay(Duration::from_millis(5)),
        );
        let writer = BatchWriter::new(store.clone(), 50);

        let progress = assert_ok!(
            writer
                .update_records_in_batches(TABLE, &targets(), &updates(120))
                .await
        );

        assert_eq!(progress.batches_written, 3);
        assert_eq!(progress.records_written, 120);
        assert_eq!(store.call_sizes(), vec![50, 50, 20]);
        assert_eq!(store.max_in_flight(), 1);

        let ids: Vec<String> = store
            .calls()
            .iter()
            .flatten()
            .map(|u| u.id.to_string())
            .collect();
        let expected: Vec<String> = (0..120).map(|i| format!("rec{}", i)).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_absent_values_leave_cells_untouched() {
        let store = Arc::new(FlakyStore::new(titled_base(&["Cat"])));
        let writer = BatchWriter::new(store.clone(), 50);

        let update = PendingUpdate {
            id: RecordId::new("rec0"),
            extract: None,
            image: None,
        };
        assert_ok!(
            writer
                .update_records_in_batches(TABLE, &targets(), &[update])
                .await
        );

        let calls = store.calls();
        assert!(calls[0][0].fields.is_empty());
        let base = store.snapshot();
        let record = &base.table(TABLE).unwrap().records[0];
        assert!(!record.fields.contains_key(EXTRACT_FIELD));
        assert!(!record.fields.contains_key(IMAGE_FIELD));
    }

    #[tokio::test]
    async fn test_failed_batch_keeps_earlier_batches() {
        let titles = numbered_titles(120);
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let store = Arc::new(FlakyStore::new(titled_base(&refs)).failing_on(2));
        let writer = BatchWriter::new(store.clone(), 50);

        let err = assert_err!(
            writer
                .update_records_in_batches(TABLE, &targets(), &updates(120))
                .await
        );
        match err {
            EnrichError::BatchWrite {
                batch,
                applied_batches,
                applied_records,
                ..
            } => {
                assert_eq!(batch, 2);
                assert_eq!(applied_batches, 1);
                assert_eq!(applied_records, 50);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.call_sizes(), vec![50, 50]);

        let base = store.snapshot();
        let records = &base.table(TABLE).unwrap().records;
        assert_eq!(
            records[49].fields.get(EXTRACT_FIELD),
            Some(&CellValue::Text("About Page 49".to_string()))
        );
        assert!(!records[50].fields.contains_key(EXTRACT_FIELD));
    }
}
