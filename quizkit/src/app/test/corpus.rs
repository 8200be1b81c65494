#[suitest::suite(corpus_integration)]
mod corpus_service_tests {
    use crate::app::test::{TestState, FAIL_MARKER};
    use crate::error::QuizkitErr;
    use suitest::{after_all, before_all, cleanup};

    const TEST_DIR: &str = "__corpus_service_tests__";

    const VOLCANO_TEXT: &str =
        "Volcanoes form where magma rises through the crust. When pressure builds, \
         an eruption ejects lava, ash and gases. Repeated lava flows cool and \
         harden, building the volcano's cone over time.";

    const MARKET_TEXT: &str =
        "Stock markets let participants buy and sell shares. Prices move with \
         supply and demand, and trading volume often spikes around earnings \
         announcements and macroeconomic news.";

    #[before_all]
    async fn setup() -> TestState {
        let test_state = TestState::init(TEST_DIR).await;
        test_state
    }

    #[cleanup]
    async fn cleanup() {
        let _ = tokio::fs::remove_dir_all(TEST_DIR).await;
    }

    #[after_all]
    async fn teardown() {
        let _ = tokio::fs::remove_dir_all(TEST_DIR).await;
    }

    #[test]
    async fn relevant_chunk_outranks_unrelated(state: TestState) {
        let service = state.corpus_service("relevance");

        let volcano = service.ingest(VOLCANO_TEXT).await.unwrap();
        let market = service.ingest(MARKET_TEXT).await.unwrap();

        assert_eq!(volcano.ids.len(), 1);
        assert_eq!(market.ids.len(), 1);

        let report = service.search("magma eruption", 1).await.unwrap();
        assert_eq!(report.hits.len(), 1);
        assert_eq!(report.hits[0].id, volcano.ids[0]);

        let report = service.search("magma eruption", 10).await.unwrap();
        assert_eq!(report.hits.len(), 2);
        assert_eq!(report.hits[0].id, volcano.ids[0]);
        assert!(report.hits[0].score > report.hits[1].score);
    }

    #[test]
    async fn reset_then_search_is_empty(state: TestState) {
        let service = state.corpus_service("reset");

        service.ingest(VOLCANO_TEXT).await.unwrap();
        service.reset().await.unwrap();

        let report = service.search("anything", 5).await.unwrap();
        assert!(report.hits.is_empty());

        // Resetting an absent corpus is fine.
        service.reset().await.unwrap();
    }

    #[test]
    async fn double_ingest_appends_without_dedup(state: TestState) {
        let service = state.corpus_service("dedup");

        let first = service.ingest(VOLCANO_TEXT).await.unwrap();
        let second = service.ingest(VOLCANO_TEXT).await.unwrap();

        assert_eq!(first.ids.len(), 1);
        assert_eq!(second.ids.len(), 1);
        assert_ne!(first.ids[0], second.ids[0]);

        let report = service.search("lava", 10).await.unwrap();
        assert_eq!(report.hits.len(), 2);
        assert_eq!(report.hits[0].text, report.hits[1].text);
    }

    #[test]
    async fn limit_exceeding_corpus_returns_only_real_entries(state: TestState) {
        let service = state.corpus_service("limit");

        let volcano = service.ingest(VOLCANO_TEXT).await.unwrap();
        let market = service.ingest(MARKET_TEXT).await.unwrap();

        let report = service.search("magma", 10).await.unwrap();

        assert_eq!(report.hits.len(), 2);
        for hit in &report.hits {
            assert!(hit.id == volcano.ids[0] || hit.id == market.ids[0]);
        }
    }

    #[test]
    async fn rankings_survive_reload(state: TestState) {
        let service = state.corpus_service("reload");

        service.ingest(VOLCANO_TEXT).await.unwrap();
        service.ingest(MARKET_TEXT).await.unwrap();

        let before = service.search("magma eruption", 5).await.unwrap();

        // A fresh service over the same directory loads the persisted
        // artifacts from scratch.
        let reloaded = state.corpus_service("reload");
        let after = reloaded.search("magma eruption", 5).await.unwrap();

        assert_eq!(before.hits.len(), after.hits.len());
        for (b, a) in before.hits.iter().zip(after.hits.iter()) {
            assert_eq!(b.id, a.id);
            assert!((b.score - a.score).abs() < 1e-6);
        }
    }

    #[test]
    async fn empty_text_is_a_noop(state: TestState) {
        let service = state.corpus_service("noop");

        let report = service.ingest("   \n\t ").await.unwrap();
        assert!(report.ids.is_empty());

        // Nothing was persisted, so the corpus is still absent.
        let report = service.search("anything", 5).await.unwrap();
        assert!(report.hits.is_empty());
    }

    #[test]
    async fn degraded_chunks_are_reported(state: TestState) {
        let service = state.corpus_service("degraded");

        let ok = service.ingest(VOLCANO_TEXT).await.unwrap();
        assert_eq!(ok.degraded, 0);

        let degraded = service
            .ingest(&format!("{FAIL_MARKER} words that never embed"))
            .await
            .unwrap();
        assert_eq!(degraded.ids.len(), 1);
        assert_eq!(degraded.degraded, 1);

        // The degraded chunk is stored with a zero vector and scores 0.
        let report = service.search("volcano", 10).await.unwrap();
        assert_eq!(report.hits.len(), 2);
        assert_eq!(report.hits[1].id, degraded.ids[0]);
        assert!(report.hits[1].score.abs() < 1e-6);
    }

    #[test]
    async fn fully_failed_batch_on_fresh_corpus_is_an_error(state: TestState) {
        let service = state.corpus_service("all_failed");

        let err = service.ingest(FAIL_MARKER).await.unwrap_err();
        assert!(matches!(err.error, QuizkitErr::EmbeddingFailed(_)));
    }

    #[test]
    async fn degraded_query_still_searches(state: TestState) {
        let service = state.corpus_service("degraded_query");

        service.ingest(VOLCANO_TEXT).await.unwrap();

        let report = service
            .search(&format!("{FAIL_MARKER} query"), 5)
            .await
            .unwrap();

        assert_eq!(report.degraded, 1);
        assert_eq!(report.hits.len(), 1);
        assert!(report.hits[0].score.abs() < 1e-6);
    }

    #[test]
    async fn corrupt_store_requires_reset(state: TestState) {
        let service = state.corpus_service("corrupt");

        service.ingest(VOLCANO_TEXT).await.unwrap();

        let paths = state.paths("corrupt");
        tokio::fs::write(&paths.store, b"{ not valid json")
            .await
            .unwrap();

        let err = service.search("volcano", 5).await.unwrap_err();
        assert!(matches!(err.error, QuizkitErr::CorruptCorpus(_)));

        let err = service.ingest(MARKET_TEXT).await.unwrap_err();
        assert!(matches!(err.error, QuizkitErr::CorruptCorpus(_)));

        service.reset().await.unwrap();

        let report = service.search("volcano", 5).await.unwrap();
        assert!(report.hits.is_empty());
    }
}
