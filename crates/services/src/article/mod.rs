//! # Article Store
//!
//! Article list query parameters, CRUD calls against the gateway, and the
//! nested edit session for the add/update editor.
//!
//! Every remote operation resolves to `bool` or `Option<T>`; the gateway has
//! already notified the user of the failure by then.

mod edit;

pub use edit::{EditMode, EditSession, Validity};

use domains::{
    parse_tags, ArticleDraft, ArticleFilter, ArticlePage, ArticleRecord, DeleteStatus, DomainError,
    Notification, Notifier, PublishStatus, SortDirection, SortField, SortPreference, SortSpec,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::gateway::Gateway;
use crate::in_flight::InFlight;
use crate::observable::{Observable, Subscription};
use crate::operations::{self, Operation, UPDATE_DELETE_STATUS, UPDATE_PUBLISH_STATUS};
use edit::ValidityEdge;

pub const VALIDATION_NOTICE_TITLE: &str = "Invalid Content";
pub const VALIDATION_NOTICE_DESCRIPTION: &str = "Fields marked with an asterisk (*) are required";

/// List-page state shared by the table, the toolbar and the overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListState {
    pub sort: SortPreference,
    pub has_fixed_search_area: bool,
    /// Set after a successful editor submit; the list should reload.
    pub needs_refetch: bool,
    pending_operations: u32,
}

impl ArticleListState {
    /// True while any status toggle is in flight (blocking overlay).
    pub fn operation_is_applying(&self) -> bool {
        self.pending_operations > 0
    }
}

/// Variables for `getArticlesByPage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "where")]
    pub filter: ArticleFilter,
    pub sort: SortSpec,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            filter: ArticleFilter::default(),
            sort: SortSpec::new(),
        }
    }

    pub fn with_filter(mut self, filter: ArticleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }
}

/// Counts a status toggle as pending until dropped.
struct PendingOperation<'a> {
    list: &'a Observable<ArticleListState>,
}

impl<'a> PendingOperation<'a> {
    fn begin(list: &'a Observable<ArticleListState>) -> Self {
        list.update(|s| s.pending_operations += 1);
        Self { list }
    }
}

impl Drop for PendingOperation<'_> {
    fn drop(&mut self) {
        self.list
            .update(|s| s.pending_operations = s.pending_operations.saturating_sub(1));
    }
}

/// Clears `is_applying` on the edit session it was taken for.
struct ApplyingEdit<'a> {
    edit: &'a Observable<EditSession>,
    generation: u64,
}

impl Drop for ApplyingEdit<'_> {
    fn drop(&mut self) {
        let generation = self.generation;
        self.edit.update_if(|s| {
            if s.generation != generation || !s.is_applying {
                return false;
            }
            s.is_applying = false;
            true
        });
    }
}

pub struct ArticleStore {
    gateway: Arc<Gateway>,
    list: Observable<ArticleListState>,
    edit: Observable<EditSession>,
    in_flight: InFlight,
}

impl ArticleStore {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            gateway,
            list: Observable::default(),
            edit: Observable::default(),
            in_flight: InFlight::new(),
        }
    }

    fn notifier(&self) -> &Arc<dyn Notifier> {
        self.gateway.notifier()
    }

    // ── Remote operations ──────────────────────────────────────────────────

    pub async fn get_article_by_id(&self, id: &str) -> Option<ArticleRecord> {
        self.gateway
            .query::<ArticleRecord>(&operations::GET_ARTICLE_BY_ID, json!({ "id": id }))
            .await
            .inspect_err(|err| warn!(%id, error = %err, "failed to fetch article"))
            .ok()
    }

    pub async fn get_articles_by_page(&self, query: &PageQuery) -> Option<ArticlePage> {
        let variables = match serde_json::to_value(query) {
            Ok(variables) => variables,
            Err(err) => {
                warn!(error = %err, "could not encode page query");
                return None;
            }
        };

        debug!(page = query.page, limit = query.limit, "fetching article page");
        self.gateway
            .query::<ArticlePage>(&operations::GET_ARTICLES_BY_PAGE, variables)
            .await
            .inspect_err(|err| warn!(page = query.page, error = %err, "failed to fetch article page"))
            .ok()
    }

    /// Creates an article. Any identifier on the draft is discarded.
    pub async fn add_article(&self, draft: ArticleDraft) -> bool {
        let Some(_ticket) = self.in_flight.try_begin(operations::ADD_ARTICLE.name) else {
            return false;
        };

        let (_, data) = draft.into_parts();
        let result = self
            .gateway
            .mutate::<Value>(&operations::ADD_ARTICLE, json!({ "data": data }))
            .await;

        match result {
            Ok(_) => {
                info!(title = %data.title, "article added");
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to add article");
                false
            }
        }
    }

    /// Updates an article. The identifier travels as `id`, never inside
    /// `data`; a draft without one fails locally.
    pub async fn update_article(&self, draft: ArticleDraft) -> bool {
        let (id, data) = draft.into_parts();
        let Some(id) = id else {
            warn!(error = %DomainError::MissingIdentifier, "refusing to update article");
            return false;
        };
        let Some(_ticket) = self
            .in_flight
            .try_begin(format!("{}:{id}", operations::UPDATE_ARTICLE.name))
        else {
            return false;
        };

        let result = self
            .gateway
            .mutate::<Value>(&operations::UPDATE_ARTICLE, json!({ "id": id, "data": data }))
            .await;

        match result {
            Ok(_) => {
                info!(%id, "article updated");
                true
            }
            Err(err) => {
                warn!(%id, error = %err, "failed to update article");
                false
            }
        }
    }

    /// Flips `is_published` on the server and copies the confirmed value back
    /// into `record`.
    pub async fn toggle_publish_status(&self, record: &mut ArticleRecord) -> bool {
        let new_status = !record.is_published;
        match self
            .send_status::<PublishStatus>(&UPDATE_PUBLISH_STATUS, &record.id, new_status)
            .await
        {
            Some(confirmed) => {
                record.is_published = confirmed.is_published;
                info!(id = %record.id, is_published = record.is_published, "publish status changed");
                true
            }
            None => false,
        }
    }

    /// Flips the soft-delete flag on the server and copies the confirmed
    /// value back into `record`.
    pub async fn toggle_delete_status(&self, record: &mut ArticleRecord) -> bool {
        let new_status = !record.is_deleted;
        match self
            .send_status::<DeleteStatus>(&UPDATE_DELETE_STATUS, &record.id, new_status)
            .await
        {
            Some(confirmed) => {
                record.is_deleted = confirmed.is_deleted;
                info!(id = %record.id, is_deleted = record.is_deleted, "delete status changed");
                true
            }
            None => false,
        }
    }

    async fn send_status<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        id: &str,
        new_status: bool,
    ) -> Option<T> {
        let _ticket = self.in_flight.try_begin(format!("{}:{id}", operation.name))?;
        let _pending = PendingOperation::begin(&self.list);

        self.gateway
            .mutate::<T>(operation, json!({ "id": id, "newStatus": new_status }))
            .await
            .inspect_err(|err| warn!(%id, operation = operation.name, error = %err, "status change failed"))
            .ok()
    }

    // ── List state ─────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> ArticleListState {
        self.list.snapshot()
    }

    pub fn subscribe(&self) -> Subscription<ArticleListState> {
        self.list.subscribe()
    }

    pub fn operation_is_applying(&self) -> bool {
        self.list.read(ArticleListState::operation_is_applying)
    }

    pub fn toggle_sort(&self, field: SortField) {
        self.list.update(|s| {
            s.sort.toggle(field);
        });
    }

    pub fn toggle_sort_by_post_at(&self) {
        self.toggle_sort(SortField::PostAt);
    }

    pub fn toggle_sort_by_update_at(&self) {
        self.toggle_sort(SortField::UpdateAt);
    }

    pub fn set_sort_direction(&self, field: SortField, direction: SortDirection) {
        self.list.update(|s| s.sort.set_direction(field, direction));
    }

    /// The `sort` variable for the next page query.
    pub fn enabled_sort(&self) -> SortSpec {
        self.list.read(|s| s.sort.enabled())
    }

    pub fn set_has_fixed_search_area(&self, fixed: bool) {
        self.list.update(|s| s.has_fixed_search_area = fixed);
    }

    /// Returns whether the list should reload, and clears the request.
    pub fn take_needs_refetch(&self) -> bool {
        let mut needed = false;
        self.list.update_if(|s| {
            needed = std::mem::take(&mut s.needs_refetch);
            needed
        });
        needed
    }

    // ── Edit session ───────────────────────────────────────────────────────

    pub fn edit_session(&self) -> EditSession {
        self.edit.snapshot()
    }

    pub fn subscribe_edit_session(&self) -> Subscription<EditSession> {
        self.edit.subscribe()
    }

    /// Opens the editor, replacing any session that is already open.
    pub fn show_add_or_update_page(&self, mode: EditMode, index: Option<usize>) {
        let mut stale = None;
        self.edit.update(|session| {
            stale = session.notice.take();
            *session = EditSession::open(mode, index, session.generation + 1);
        });
        if let Some(id) = stale {
            self.notifier().dismiss(id);
        }
        debug!(generation = self.edit.read(|s| s.generation), "edit session opened");
    }

    /// Fills the draft of an update session from the server. Add sessions
    /// only leave the loading state.
    pub async fn load_edit_session(&self) -> bool {
        let (generation, visible, target) = self
            .edit
            .read(|s| (s.generation, s.is_visible, s.target_id().map(str::to_owned)));
        if !visible {
            return false;
        }

        let Some(id) = target else {
            self.edit.update(|s| s.is_loading = false);
            return true;
        };

        let record = self.get_article_by_id(&id).await;
        let loaded = record.is_some();

        self.edit.update_if(|s| {
            if s.generation != generation {
                return false;
            }
            s.is_loading = false;
            if let Some(record) = &record {
                s.draft = ArticleDraft::from(record);
                s.validity = if s.draft.is_submittable() {
                    Validity::Valid
                } else {
                    Validity::Pristine
                };
            }
            true
        });
        loaded
    }

    pub fn edit_set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.edit_and_validate(|draft| draft.title = title);
    }

    pub fn edit_set_markdown(&self, markdown: impl Into<String>) {
        let markdown = markdown.into();
        self.edit_and_validate(|draft| draft.markdown = markdown);
    }

    /// Merges a `;`-separated tag list into the draft.
    pub fn edit_merge_tags(&self, input: &str) {
        let tags = parse_tags(input);
        if tags.is_empty() {
            return;
        }
        self.edit.update_if(|s| {
            if !s.is_editable() {
                return false;
            }
            s.draft.merge_tags(tags);
            true
        });
    }

    pub fn edit_remove_tag(&self, index: usize) -> Option<String> {
        let mut removed = None;
        self.edit.update_if(|s| {
            if !s.is_editable() {
                return false;
            }
            removed = s.draft.remove_tag(index);
            removed.is_some()
        });
        removed
    }

    pub fn edit_set_published(&self, published: bool) {
        self.edit.update_if(|s| {
            if !s.is_editable() {
                return false;
            }
            s.draft.is_published = published;
            true
        });
    }

    pub fn edit_set_deleted(&self, deleted: bool) {
        self.edit.update_if(|s| {
            if !s.is_editable() {
                return false;
            }
            s.draft.is_deleted = deleted;
            true
        });
    }

    /// Sends the draft when the session is valid and idle. On success the
    /// session closes and the list is flagged for reload.
    pub async fn submit_edit_session(&self) -> bool {
        let mut claimed = None;
        self.edit.update_if(|s| {
            if !s.can_submit() {
                return false;
            }
            s.is_applying = true;
            claimed = Some((s.generation, s.draft.clone(), s.is_update()));
            true
        });

        let Some((generation, draft, is_update)) = claimed else {
            debug!("edit session is not submittable");
            return false;
        };

        let applying = ApplyingEdit {
            edit: &self.edit,
            generation,
        };
        let ok = if is_update {
            self.update_article(draft).await
        } else {
            self.add_article(draft).await
        };
        drop(applying);

        if ok {
            let mut stale = None;
            self.edit.update_if(|s| {
                if s.generation != generation {
                    return false;
                }
                stale = s.notice.take();
                *s = EditSession::closed(generation + 1);
                true
            });
            if let Some(id) = stale {
                self.notifier().dismiss(id);
            }
            self.list.update(|s| s.needs_refetch = true);
        }
        ok
    }

    /// Closes the editor and dismisses an outstanding validation notice.
    pub fn close_edit_session(&self) {
        let mut stale = None;
        self.edit.update(|s| {
            stale = s.notice.take();
            *s = EditSession::closed(s.generation + 1);
        });
        if let Some(id) = stale {
            self.notifier().dismiss(id);
        }
    }

    /// Applies `change` to the open draft and raises or dismisses the
    /// validation notice on the edges of the validity state.
    fn edit_and_validate(&self, change: impl FnOnce(&mut ArticleDraft)) {
        let mut edge = ValidityEdge::Unchanged;
        let mut stale = None;

        self.edit.update_if(|s| {
            if !s.is_editable() {
                return false;
            }
            change(&mut s.draft);
            edge = s.revalidate();
            if edge == ValidityEdge::BecameValid {
                stale = s.notice.take();
            }
            true
        });

        match edge {
            ValidityEdge::BecameInvalid => {
                let id = self.notifier().notify(
                    Notification::error(VALIDATION_NOTICE_TITLE, VALIDATION_NOTICE_DESCRIPTION)
                        .persistent(),
                );
                self.edit.update(|s| s.notice = Some(id));
            }
            ValidityEdge::BecameValid => {
                if let Some(id) = stale {
                    self.notifier().dismiss(id);
                }
            }
            ValidityEdge::Unchanged => {}
        }
    }
}
