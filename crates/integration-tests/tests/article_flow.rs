use domains::{ArticleDraft, ArticlePage, ArticleRecord, TransportError};
use integration_tests::{stores, RecordingNotifier, ScriptedTransport};
use serde_json::json;
use services::article::{ArticleListState, PageQuery};

fn unpublished(id: &str) -> ArticleRecord {
    ArticleRecord {
        id: id.into(),
        title: "Hello".into(),
        markdown: "# Hello".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn empty_page_envelope_is_returned_as_is() {
    let transport = ScriptedTransport::new();
    transport.reply(
        "getArticlesByPage",
        json!({ "docs": [], "totalDocs": 0, "hasNextPage": false }),
    );
    let notifier = RecordingNotifier::new();
    let stores = stores(transport.clone(), notifier.clone());
    let before = stores.articles.snapshot();

    let page = stores
        .articles
        .get_articles_by_page(&PageQuery::new(1, 10))
        .await
        .unwrap();

    assert_eq!(
        page,
        ArticlePage {
            docs: vec![],
            total_docs: 0,
            has_next_page: false,
            ..Default::default()
        }
    );
    assert_eq!(
        transport.requests()[0].variables,
        json!({ "page": 1, "limit": 10, "where": {}, "sort": {} })
    );
    assert_eq!(stores.articles.snapshot(), before);
    assert_eq!(before, ArticleListState::default());
    assert!(notifier.titles().is_empty());
}

#[tokio::test]
async fn toggling_publish_sends_inverse_and_applies_confirmation() {
    let transport = ScriptedTransport::new();
    transport.reply(
        "updatePublishStatus",
        json!({ "_id": "1", "isPublished": true }),
    );
    let stores = stores(transport.clone(), RecordingNotifier::new());
    let mut record = unpublished("1");

    assert!(stores.articles.toggle_publish_status(&mut record).await);

    assert!(record.is_published);
    assert!(!stores.articles.operation_is_applying());
    assert_eq!(
        transport.requests()[0].variables,
        json!({ "id": "1", "newStatus": true })
    );
}

#[tokio::test]
async fn overlay_clears_when_toggle_fails() {
    let transport = ScriptedTransport::new();
    transport.fail(
        "updatePublishStatus",
        TransportError::Status {
            status: 502,
            message: "bad gateway".into(),
        },
    );
    transport.fail(
        "updateDeleteStatus",
        TransportError::Request("timed out".into()),
    );
    let stores = stores(transport, RecordingNotifier::new());
    let mut record = unpublished("1");

    assert!(!stores.articles.toggle_publish_status(&mut record).await);
    assert!(!stores.articles.operation_is_applying());
    assert!(!stores.articles.toggle_delete_status(&mut record).await);
    assert!(!stores.articles.operation_is_applying());
    assert_eq!(record, unpublished("1"));
}

#[tokio::test]
async fn overlay_is_raised_while_toggle_is_pending() {
    let transport = ScriptedTransport::gated();
    transport.reply("updateDeleteStatus", json!({ "_id": "1", "isDeleted": true }));
    let stores = stores(transport.clone(), RecordingNotifier::new());
    let mut record = unpublished("1");
    let mut duplicate = unpublished("1");

    let (done, (applying, refused)) = tokio::join!(
        stores.articles.toggle_delete_status(&mut record),
        async {
            transport.wait_for_requests(1).await;
            let applying = stores.articles.operation_is_applying();
            let refused = !stores.articles.toggle_delete_status(&mut duplicate).await;
            transport.release();
            (applying, refused)
        }
    );

    assert!(done);
    assert!(applying);
    assert!(refused);
    assert!(record.is_deleted);
    assert!(!duplicate.is_deleted);
    assert_eq!(transport.requests_for("updateDeleteStatus").len(), 1);
    assert!(!stores.articles.operation_is_applying());
}

#[tokio::test]
async fn add_never_sends_an_identifier() {
    let transport = ScriptedTransport::new();
    transport.reply("addArticle", json!({ "_id": "new" }));
    let stores = stores(transport.clone(), RecordingNotifier::new());

    let draft = ArticleDraft {
        id: Some("stale".into()),
        title: "T".into(),
        tags: vec!["rust".into()],
        markdown: "M".into(),
        ..Default::default()
    };
    assert!(stores.articles.add_article(draft).await);

    let variables = &transport.requests_for("addArticle")[0].variables;
    assert_eq!(
        *variables,
        json!({
            "data": {
                "title": "T",
                "tags": ["rust"],
                "markdown": "M",
                "isPublished": false,
                "isDeleted": false
            }
        })
    );
}

#[tokio::test]
async fn update_sends_identifier_beside_data() {
    let transport = ScriptedTransport::new();
    transport.reply("updateArticle", json!({ "_id": "1" }));
    let stores = stores(transport.clone(), RecordingNotifier::new());

    let mut draft = ArticleDraft::from(&unpublished("1"));
    draft.title = "Renamed".into();
    assert!(stores.articles.update_article(draft).await);

    let variables = &transport.requests_for("updateArticle")[0].variables;
    assert_eq!(variables["id"], "1");
    assert_eq!(variables["data"]["title"], "Renamed");
    assert!(variables["data"].get("_id").is_none());
    assert!(variables["data"].get("id").is_none());
}

#[tokio::test]
async fn single_article_is_decoded() {
    let transport = ScriptedTransport::new();
    transport.reply(
        "getArticleById",
        json!({
            "_id": "1",
            "title": "Hello",
            "tags": ["a"],
            "markdown": "body",
            "isPublished": true,
            "isDeleted": false
        }),
    );
    let stores = stores(transport, RecordingNotifier::new());

    let record = stores.articles.get_article_by_id("1").await.unwrap();
    assert_eq!(record.title, "Hello");
    assert!(record.is_published);
    assert_eq!(record.post_at, None);
}
