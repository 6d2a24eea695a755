//! Curator integration tests.

#[cfg(test)]
mod tests {
    use filmlists_model::error::FilmListsErrorCode;
    use serde_json::json;

    use crate::TestService;

    #[tokio::test]
    async fn test_should_create_curator_with_empty_collection() {
        let service = TestService::new();
        let created = service
            .ok(json!({"handler": "create_curator", "curator": "  Kinologue "}))
            .await;
        assert_eq!(created["curator"], "kinologue");
        assert_eq!(
            created["output_uri"],
            "s3://filmfynder/london/filmLists/kinologue/filmLists.json"
        );

        let lists = service
            .ok(json!({"handler": "get_custom_lists", "curator": "kinologue"}))
            .await;
        assert_eq!(lists["lists_count"], 0);
        assert_eq!(lists["film_lists"], json!([]));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_curator() {
        let service = TestService::new();
        service
            .ok(json!({"handler": "create_curator", "curator": "kinologue"}))
            .await;
        let err = service
            .err(json!({"handler": "create_curator", "curator": "KINOLOGUE"}))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn test_should_not_overwrite_existing_lists_on_duplicate_create() {
        let service = TestService::new();
        service.seed_list("kinologue", "Noir").await;
        let before = service.raw_document("kinologue").unwrap();

        service
            .err(json!({"handler": "create_curator", "curator": "kinologue"}))
            .await;
        assert_eq!(service.raw_document("kinologue").unwrap(), before);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_curator_names() {
        let service = TestService::new();
        for curator in ["x", "no spaces", "semi;colon", "../escape"] {
            let err = service
                .err(json!({"handler": "create_curator", "curator": curator}))
                .await;
            assert_eq!(err.code, FilmListsErrorCode::InvalidInput, "{curator}");
        }
        assert!(service.store.is_empty());
    }

    #[tokio::test]
    async fn test_should_require_curator_field() {
        let service = TestService::new();
        let err = service.err(json!({"handler": "create_curator"})).await;
        assert_eq!(err.code, FilmListsErrorCode::InvalidInput);
        assert_eq!(err.message, "Missing required fields: curator");
    }

    #[tokio::test]
    async fn test_should_list_curators_sorted() {
        let service = TestService::new();
        assert_eq!(
            service.ok(json!({"handler": "get_curators"})).await["curators"],
            json!([])
        );

        service
            .ok(json!({"handler": "create_curator", "curator": "zeta"}))
            .await;
        service
            .ok(json!({"handler": "create_curator", "curator": "alpha"}))
            .await;
        service.seed_list("mid_way", "Noir").await;

        let listed = service.ok(json!({"handler": "get_curators"})).await;
        assert_eq!(listed["curators"], json!(["alpha", "mid_way", "zeta"]));
    }

    #[tokio::test]
    async fn test_should_read_missing_curator_as_empty_without_writing() {
        let service = TestService::new();
        let lists = service
            .ok(json!({"handler": "get_custom_lists", "curator": "nobody"}))
            .await;
        assert_eq!(lists["curator"], "nobody");
        assert_eq!(lists["lists_count"], 0);
        assert!(service.curator_document("nobody").is_none());
    }

    #[tokio::test]
    async fn test_should_normalize_curator_on_every_operation() {
        let service = TestService::new();
        service.seed_list("Kinologue", "Noir").await;
        assert!(service.curator_document("kinologue").is_some());

        let lists = service
            .ok(json!({"handler": "get_custom_lists", "curator": " KINOLOGUE"}))
            .await;
        assert_eq!(lists["lists_count"], 1);
        assert_eq!(lists["film_lists"][0]["list_curator"], "kinologue");
    }
}
