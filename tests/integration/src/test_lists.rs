//! Custom list integration tests.

#[cfg(test)]
mod tests {
    use filmlists_core::storage::DocumentStore;
    use filmlists_model::error::FilmListsErrorCode;
    use serde_json::{Value, json};

    use crate::TestService;

    #[tokio::test]
    async fn test_should_create_custom_list() {
        let service = TestService::new();
        let created = service
            .ok(json!({
                "handler": "create_custom_list",
                "curator": "kinologue",
                "list_name": "March Picks",
                "list_caption": "Our favourites",
                "start_date": "2025-03-01",
                "end_date": "2025-03-31"
            }))
            .await;
        assert_eq!(created["list_name"], "March Picks");
        assert_eq!(created["lists_total"], 1);
        assert_eq!(
            created["output_uri"],
            "s3://filmfynder/london/filmLists/kinologue/filmLists.json"
        );

        let stored = service.curator_document("kinologue").unwrap();
        assert_eq!(
            stored,
            json!([{
                "list_curator": "kinologue",
                "list_name": "March Picks",
                "list_caption": "Our favourites",
                "start_date": "2025-03-01",
                "end_date": "2025-03-31",
                "list_films": []
            }])
        );
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_list_name_without_change() {
        let service = TestService::new();
        service.seed_list("kinologue", "Noir").await;
        let before = service.raw_document("kinologue").unwrap();

        let err = service
            .err(json!({
                "handler": "create_custom_list",
                "curator": "kinologue",
                "list_name": "Noir",
                "list_caption": "again",
                "start_date": "2025-05-01",
                "end_date": "2025-05-31"
            }))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::AlreadyExists);
        assert_eq!(service.raw_document("kinologue").unwrap(), before);
        assert_eq!(
            service.curator_document("kinologue").unwrap().as_array().unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_should_allow_end_date_before_start_date() {
        let service = TestService::new();
        let created = service
            .ok(json!({
                "handler": "create_custom_list",
                "curator": "kinologue",
                "list_name": "Backwards",
                "list_caption": "x",
                "start_date": "2025-03-31",
                "end_date": "2025-03-01"
            }))
            .await;
        assert_eq!(created["lists_total"], 1);
    }

    #[tokio::test]
    async fn test_should_reject_malformed_dates_on_create() {
        let service = TestService::new();
        let err = service
            .err(json!({
                "handler": "create_custom_list",
                "curator": "kinologue",
                "list_name": "Noir",
                "list_caption": "x",
                "start_date": "2025-03-01",
                "end_date": "31/03/2025"
            }))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::InvalidInput);
        assert!(err.message.contains("end_date"));
        assert!(service.curator_document("kinologue").is_none());
    }

    #[tokio::test]
    async fn test_should_name_every_missing_field_on_create() {
        let service = TestService::new();
        let err = service
            .err(json!({
                "handler": "create_custom_list",
                "curator": "kinologue",
                "list_caption": ""
            }))
            .await;
        assert_eq!(
            err.message,
            "Missing required fields: list_name, list_caption, start_date, end_date"
        );
    }

    #[tokio::test]
    async fn test_should_update_fields_and_rename() {
        let service = TestService::new();
        service.seed_list("kinologue", "Noir").await;

        let updated = service
            .ok(json!({
                "handler": "update_list",
                "curator": "kinologue",
                "list_name": "Noir",
                "updates": {
                    "list_caption": "Shadows and rain",
                    "list_name": "Neo-Noir",
                    "start_date": "2025-04-01"
                }
            }))
            .await;
        assert_eq!(updated["list_name"], "Neo-Noir");
        assert_eq!(
            updated["updated_fields"],
            json!(["list_caption", "list_name", "start_date"])
        );

        let stored = service.curator_document("kinologue").unwrap();
        assert_eq!(stored[0]["list_name"], "Neo-Noir");
        assert_eq!(stored[0]["list_caption"], "Shadows and rain");
        assert_eq!(stored[0]["start_date"], "2025-04-01");
        assert_eq!(stored[0]["end_date"], "2025-03-31");
    }

    #[tokio::test]
    async fn test_should_reject_disallowed_update_keys_without_change() {
        let service = TestService::new();
        service.seed_list("kinologue", "Noir").await;
        let before = service.raw_document("kinologue").unwrap();

        let err = service
            .err(json!({
                "handler": "update_list",
                "curator": "kinologue",
                "list_name": "Noir",
                "updates": {"list_caption": "ok", "list_films": [], "list_curator": "other"}
            }))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::InvalidInput);
        assert!(err.message.contains("list_films, list_curator"));
        assert_eq!(service.raw_document("kinologue").unwrap(), before);
    }

    #[tokio::test]
    async fn test_should_reject_malformed_update_date_without_change() {
        let service = TestService::new();
        service.seed_list("kinologue", "Noir").await;
        let before = service.raw_document("kinologue").unwrap();

        let err = service
            .err(json!({
                "handler": "update_list",
                "curator": "kinologue",
                "list_name": "Noir",
                "updates": {"list_caption": "fine", "end_date": "soon"}
            }))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::InvalidInput);
        assert!(err.message.contains("end_date"));
        assert_eq!(service.raw_document("kinologue").unwrap(), before);
    }

    #[tokio::test]
    async fn test_should_reject_empty_and_non_string_updates() {
        let service = TestService::new();
        service.seed_list("kinologue", "Noir").await;

        let err = service
            .err(json!({"handler": "update_list", "curator": "kinologue", "list_name": "Noir"}))
            .await;
        assert_eq!(err.message, "No updates provided");

        let err = service
            .err(json!({
                "handler": "update_list",
                "curator": "kinologue",
                "list_name": "Noir",
                "updates": {"list_caption": 7}
            }))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::InvalidInput);
        assert!(err.message.contains("list_caption"));

        let err = service
            .err(json!({
                "handler": "update_list",
                "curator": "kinologue",
                "list_name": "Noir",
                "updates": {"list_name": ""}
            }))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_should_reject_rename_onto_other_list() {
        let service = TestService::new();
        service.seed_list("kinologue", "Noir").await;
        service.seed_list("kinologue", "Westerns").await;

        let err = service
            .err(json!({
                "handler": "update_list",
                "curator": "kinologue",
                "list_name": "Noir",
                "updates": {"list_name": "Westerns"}
            }))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::AlreadyExists);

        let same = service
            .ok(json!({
                "handler": "update_list",
                "curator": "kinologue",
                "list_name": "Noir",
                "updates": {"list_name": "Noir"}
            }))
            .await;
        assert_eq!(same["list_name"], "Noir");
    }

    #[tokio::test]
    async fn test_should_require_existing_document_and_list_for_update() {
        let service = TestService::new();
        let event = json!({
            "handler": "update_list",
            "curator": "kinologue",
            "list_name": "Noir",
            "updates": {"list_caption": "x"}
        });
        let err = service.err(event.clone()).await;
        assert_eq!(err.code, FilmListsErrorCode::NotFound);
        assert!(service.curator_document("kinologue").is_none());

        service.seed_list("kinologue", "Westerns").await;
        let err = service.err(event).await;
        assert_eq!(err.code, FilmListsErrorCode::NotFound);
        assert_eq!(err.message, "List 'Noir' not found for curator 'kinologue'");
    }

    #[tokio::test]
    async fn test_should_delete_list_once() {
        let service = TestService::new();
        service.seed_list("kinologue", "Noir").await;
        service.seed_list("kinologue", "Westerns").await;

        let event = json!({"handler": "delete_list", "curator": "kinologue", "list_name": "Noir"});
        let deleted = service.ok(event.clone()).await;
        assert_eq!(deleted["deleted_list"], "Noir");
        assert_eq!(deleted["remaining_lists"], 1);

        let err = service.err(event).await;
        assert_eq!(err.code, FilmListsErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_should_match_list_names_exactly() {
        let service = TestService::new();
        service.seed_list("kinologue", "Noir").await;
        let err = service
            .err(json!({"handler": "delete_list", "curator": "kinologue", "list_name": "noir"}))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_should_treat_empty_object_document_as_empty_collection() {
        let service = TestService::new();
        let key = service.curator_key("kinologue");
        service.store.store(&key, &json!({})).unwrap();

        let lists = service
            .ok(json!({"handler": "get_custom_lists", "curator": "kinologue"}))
            .await;
        assert_eq!(lists["lists_count"], 0);

        service.seed_list("kinologue", "Noir").await;
        assert!(service.curator_document("kinologue").unwrap().is_array());
    }

    #[tokio::test]
    async fn test_should_report_corrupt_documents() {
        let service = TestService::new();
        let key = service.curator_key("kinologue");
        service
            .store
            .store(&key, &json!([{"list_name": "Broken", "list_films": []}]))
            .unwrap();

        let err = service
            .err(json!({"handler": "get_custom_lists", "curator": "kinologue"}))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::CorruptData);
        assert!(err.message.contains("'Broken'"));
        assert!(err.message.contains("list_caption"));

        service.store.put_raw(key, "not json at all");
        let err = service
            .err(json!({"handler": "get_custom_lists", "curator": "kinologue"}))
            .await;
        assert_eq!(err.code, FilmListsErrorCode::StoreError);
    }

    #[tokio::test]
    async fn test_should_preserve_unknown_content_across_rewrites() {
        let service = TestService::new();
        let key = service.curator_key("kinologue");
        let untouched = json!({
            "list_curator": "kinologue",
            "list_name": "Archive",
            "list_caption": "Älter",
            "start_date": "2024-01-01",
            "end_date": "2024-12-31",
            "list_films": [{
                "db_id": 42,
                "cinema_listings": {"rio": {"when": [], "screen": null}},
                "list_film_caption": "keep me",
                "pinned": true
            }],
            "theme": {"colour": "#123456"}
        });
        service.store.store(&key, &json!([untouched.clone()])).unwrap();

        service.seed_list("kinologue", "Noir").await;

        let stored = service.curator_document("kinologue").unwrap();
        assert_eq!(stored[0], untouched);
        assert_eq!(stored[1]["list_name"], "Noir");
    }

    #[tokio::test]
    async fn test_should_return_loosely_typed_lists_as_stored() {
        let service = TestService::with_sample_catalog();
        let key = service.curator_key("kinologue");
        let stored = json!({
            "list_curator": "kinologue",
            "list_name": "Loose",
            "list_caption": null,
            "start_date": "2025-03-01",
            "end_date": "2025-03-31",
            "list_films": [
                {"db_id": 7, "cinema_listings": {}},
                {"db_id": "8"}
            ]
        });
        service.store.store(&key, &json!([stored.clone()])).unwrap();

        let lists = service
            .ok(json!({"handler": "get_custom_lists", "curator": "kinologue"}))
            .await;
        assert_eq!(lists["film_lists"], json!([stored.clone()]));

        service
            .ok(json!({
                "handler": "assign_films_to_list",
                "curator": "kinologue",
                "list_name": "Loose",
                "db_ids": [100]
            }))
            .await;
        let after = service.curator_document("kinologue").unwrap();
        assert_eq!(after[0]["list_caption"], Value::Null);
        assert_eq!(after[0]["list_films"][0], stored["list_films"][0]);
        assert_eq!(after[0]["list_films"][1], stored["list_films"][1]);
        assert_eq!(after[0]["list_films"][2]["db_id"], 100);
    }
}
