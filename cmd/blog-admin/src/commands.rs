//! One function per subcommand. Each runs against the shared stores and
//! prints its result to stdout.

use anyhow::{bail, Context, Result};
use domains::{ArticleFilter, ArticleRecord, Credentials, SearchForm, SortDirection, SortField};
use services::article::{EditMode, PageQuery};
use services::guard::post_login_destination;
use services::AppStores;
use std::fs;
use tracing::info;

use crate::cli::{AddArgs, ContentArgs, ListArgs, UpdateArgs};

pub async fn login(stores: &AppStores, user: String, password: String) -> Result<()> {
    if !stores.auth.authenticate(&Credentials::new(user, password)).await {
        bail!("sign-in failed");
    }
    let identity = stores.user.current_user();
    println!("signed in as {}", identity.display_name());
    info!(destination = post_login_destination(None), "sign-in complete");
    Ok(())
}

pub fn logout(stores: &AppStores) {
    stores.auth.logout();
    println!("signed out");
}

pub fn whoami(stores: &AppStores) {
    let identity = stores.user.current_user();
    match &identity.nick_name {
        Some(nick) => println!("{} ({nick})", identity.name),
        None => println!("{}", identity.name),
    }
}

pub async fn list(stores: &AppStores, args: ListArgs) -> Result<()> {
    let articles = &stores.articles;

    if args.no_sort_post_at {
        articles.toggle_sort_by_post_at();
    }
    if args.sort_update_at {
        articles.toggle_sort_by_update_at();
    }
    if args.ascend {
        for field in [SortField::PostAt, SortField::UpdateAt] {
            articles.set_sort_direction(field, SortDirection::Ascend);
        }
    }

    let filter = ArticleFilter::from_search_form(SearchForm {
        title: args.title,
        tags: args.tags,
        is_published: args.published,
        is_deleted: args.deleted,
        post_at: args.post_at.and_then(pair),
        update_at: args.update_at.and_then(pair),
    })?;

    let query = PageQuery::new(args.page, args.limit)
        .with_filter(filter)
        .with_sort(articles.enabled_sort());

    let Some(page) = articles.get_articles_by_page(&query).await else {
        bail!("could not load articles");
    };

    for record in &page.docs {
        println!("{}", summary_line(record));
    }
    println!(
        "page {} · {} of {} article(s){}",
        page.page.unwrap_or(query.page),
        page.docs.len(),
        page.total_docs,
        if page.has_next_page { " · more available" } else { "" }
    );
    Ok(())
}

pub async fn show(stores: &AppStores, id: &str) -> Result<()> {
    let Some(record) = stores.articles.get_article_by_id(id).await else {
        bail!("could not load article {id}");
    };
    println!("{}", summary_line(&record));
    println!();
    println!("{}", record.markdown);
    Ok(())
}

pub async fn toggle_publish(stores: &AppStores, id: &str) -> Result<()> {
    let mut record = fetch(stores, id).await?;
    if !stores.articles.toggle_publish_status(&mut record).await {
        bail!("could not change publish status of {id}");
    }
    println!(
        "{id} is now {}",
        if record.is_published { "published" } else { "unpublished" }
    );
    Ok(())
}

pub async fn toggle_delete(stores: &AppStores, id: &str) -> Result<()> {
    let mut record = fetch(stores, id).await?;
    if !stores.articles.toggle_delete_status(&mut record).await {
        bail!("could not change delete status of {id}");
    }
    println!(
        "{id} is now {}",
        if record.is_deleted { "deleted" } else { "restored" }
    );
    Ok(())
}

pub async fn add(stores: &AppStores, args: AddArgs) -> Result<()> {
    let articles = &stores.articles;
    let markdown = read_markdown(&args.content)?.unwrap_or_default();

    articles.show_add_or_update_page(EditMode::Add, None);
    articles.load_edit_session().await;
    articles.edit_set_title(args.title);
    articles.edit_set_markdown(markdown);
    if let Some(tags) = &args.content.tags {
        articles.edit_merge_tags(tags);
    }
    articles.edit_set_published(args.publish);

    submit(stores).await?;
    println!("article added");
    Ok(())
}

pub async fn update(stores: &AppStores, args: UpdateArgs) -> Result<()> {
    let articles = &stores.articles;
    let markdown = read_markdown(&args.content)?;

    articles.show_add_or_update_page(EditMode::Update { id: args.id.clone() }, None);
    if !articles.load_edit_session().await {
        articles.close_edit_session();
        bail!("could not load article {}", args.id);
    }

    if let Some(title) = args.title {
        articles.edit_set_title(title);
    }
    if let Some(markdown) = markdown {
        articles.edit_set_markdown(markdown);
    }
    if let Some(tags) = &args.content.tags {
        articles.edit_merge_tags(tags);
    }
    if let Some(published) = args.published {
        articles.edit_set_published(published);
    }
    if let Some(deleted) = args.deleted {
        articles.edit_set_deleted(deleted);
    }

    submit(stores).await?;
    println!("article {} updated", args.id);
    Ok(())
}

async fn submit(stores: &AppStores) -> Result<()> {
    let articles = &stores.articles;
    if !articles.edit_session().is_valid() {
        articles.close_edit_session();
        bail!("title and markdown are required");
    }
    if !articles.submit_edit_session().await {
        articles.close_edit_session();
        bail!("the article was not saved");
    }
    Ok(())
}

async fn fetch(stores: &AppStores, id: &str) -> Result<ArticleRecord> {
    match stores.articles.get_article_by_id(id).await {
        Some(record) => Ok(record),
        None => bail!("could not load article {id}"),
    }
}

fn read_markdown(content: &ContentArgs) -> Result<Option<String>> {
    match (&content.file, &content.markdown) {
        (Some(path), _) => fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("reading {}", path.display())),
        (None, markdown) => Ok(markdown.clone()),
    }
}

fn pair(values: Vec<String>) -> Option<(String, String)> {
    let mut values = values.into_iter();
    Some((values.next()?, values.next()?))
}

fn summary_line(record: &ArticleRecord) -> String {
    let posted = record
        .post_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into());
    let flags = format!(
        "{}{}",
        if record.is_published { "P" } else { "-" },
        if record.is_deleted { "D" } else { "-" }
    );
    let tags = if record.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", record.tags.join(", "))
    };
    format!("{}  {flags}  {posted}  {}{tags}", record.id, record.title)
}
