use std::io::Write;

use postboard::application::error::AppError;
use postboard::application::store::Pagination;
use postboard::config::{
    Command, CreateArgs, ListArgs, PageArgs, PostIdArgs, SearchArgs, UpdateArgs,
};
use postboard::domain::posts::{NewPost, Post, PostPatch};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::context::Ctx;
use crate::print::print_json;

#[derive(Debug, Serialize)]
struct PageOutput {
    pagination: Pagination,
    page_count: u64,
    posts: Vec<Post>,
}

pub async fn handle<W: Write>(ctx: &Ctx, command: Command, out: &mut W) -> Result<(), AppError> {
    match command {
        Command::List(args) => list(ctx, args, out).await,
        Command::Page(args) => page(ctx, args, out).await,
        Command::Get(PostIdArgs { id }) => {
            let post = ctx.store.get(id).await?;
            print_json(out, &post)
        }
        Command::Comments(PostIdArgs { id }) => {
            let comments = ctx.comments.load(id).await?;
            print_json(out, &comments)
        }
        Command::Create(args) => create(ctx, args, out).await,
        Command::Update(args) => update(ctx, args, out).await,
        Command::Delete(PostIdArgs { id }) => {
            let deleted = ctx.store.remove(id).await?;
            print_json(out, &json!({ "deleted": deleted }))
        }
        Command::Search(SearchArgs { query }) => {
            let posts = ctx.search.search(&query).await?;
            print_json(out, &posts)
        }
    }
}

async fn list<W: Write>(ctx: &Ctx, args: ListArgs, out: &mut W) -> Result<(), AppError> {
    let store = &ctx.store;
    store.fetch_all().await?;

    if let Some(filter) = args.filter {
        store.set_filter(filter);
    }
    if let Some(field) = args.sort_by {
        store.set_sort_by(field.into());
    }
    if let Some(order) = args.order {
        store.set_sort_order(order.into());
    }
    for id in args.favorites {
        if !store.is_favorite(id) {
            store.toggle_favorite(id);
        }
    }

    let mut posts = store.visible_posts();
    if args.favorites_only {
        posts.retain(|post| store.is_favorite(post.id));
    }
    info!(shown = posts.len(), total = store.snapshot().items.len(), "listing posts");
    print_json(out, &posts)
}

async fn page<W: Write>(ctx: &Ctx, args: PageArgs, out: &mut W) -> Result<(), AppError> {
    let store = &ctx.store;
    let limit = args.limit.unwrap_or(ctx.items_per_page);
    if args.page == 0 || limit == 0 {
        return Err(AppError::validation("--page and --limit must be at least 1"));
    }

    store.set_items_per_page(limit);
    store.set_page(args.page);
    let window = store.fetch_paginated(args.page, limit).await?;

    let pagination = store.pagination();
    print_json(
        out,
        &PageOutput {
            page_count: pagination.page_count(),
            pagination,
            posts: window.posts,
        },
    )
}

async fn create<W: Write>(ctx: &Ctx, args: CreateArgs, out: &mut W) -> Result<(), AppError> {
    let CreateArgs {
        title,
        body,
        user_id,
    } = args;
    let created = ctx
        .store
        .create(NewPost {
            title,
            body,
            user_id,
        })
        .await?;
    print_json(out, &created)
}

async fn update<W: Write>(ctx: &Ctx, args: UpdateArgs, out: &mut W) -> Result<(), AppError> {
    let patch = PostPatch {
        title: args.title,
        body: args.body,
        user_id: args.user_id,
    };
    if patch.is_empty() {
        return Err(AppError::validation(
            "nothing to update: pass --title, --body or --user-id",
        ));
    }
    let updated = ctx.store.update(args.id, patch).await?;
    print_json(out, &updated)
}
