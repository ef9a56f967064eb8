//! Quire - operator CLI for a blog content store.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use quire::{
    Blog,
    cli::{Cli, Commands, NewPostArgs},
    config::BlogConfig,
    data::{Caller, Post},
    log,
    utils::date::{format_document_date, parse_document_date},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BlogConfig::load(&cli)?;
    log!("config"; "{}", config.config_path.display());

    let blog = Blog::open(&config)?;
    let caller = cli.caller();

    match cli.command {
        Commands::List {
            count,
            skip,
            category,
            tag,
        } => {
            let count = count.unwrap_or(config.blog.posts_per_page);
            let posts = match (category, tag) {
                (Some(category), _) => window(blog.posts().get_posts_by_category(&category, caller), count, skip),
                (None, Some(tag)) => window(blog.posts().get_posts_by_tag(&tag, caller), count, skip),
                (None, None) => blog.posts().get_posts(count, skip, caller),
            };
            posts.iter().for_each(|post| print_summary(post));
        }
        Commands::Show { slug } => {
            let post = blog
                .posts()
                .get_post_by_slug(&slug, caller)
                .or_else(|| blog.posts().get_post_by_id(&slug, caller));
            match post {
                Some(post) => print_post(&blog, &post),
                None => bail!("post `{slug}` not found"),
            }
        }
        Commands::Categories => blog.posts().get_categories(caller).iter().for_each(|c| println!("{c}")),
        Commands::Tags { prefix } => {
            let tags = match prefix {
                Some(prefix) => blog.posts().suggest_tags(&prefix, caller),
                None => blog.posts().get_tags(caller),
            };
            tags.iter().for_each(|t| println!("{t}"));
        }
        Commands::New { args } => {
            let post = blog.posts().save_post(new_post(args)?)?;
            println!("{} {}", post.id, post.link());
        }
        Commands::Delete { id } => match blog.posts().get_post_by_id(&id, Caller::Admin) {
            Some(post) => blog.posts().delete_post(&post)?,
            None => log!("store"; "no post with id `{id}`"),
        },
        Commands::Upload { path, suffix } => {
            let url = upload(&blog, &path, suffix.as_deref())?;
            println!("{url}");
        }
        Commands::Check => {
            let skipped = blog.posts().skipped();
            println!("{} posts, {} unreadable", blog.posts().len(), skipped.len());
            if !skipped.is_empty() {
                bail!("{} post files could not be loaded", skipped.len());
            }
        }
    }

    Ok(())
}

fn window(posts: Vec<Arc<Post>>, count: usize, skip: usize) -> Vec<Arc<Post>> {
    posts.into_iter().skip(skip).take(count).collect()
}

/// Build an unsaved post from `new` arguments
fn new_post(args: NewPostArgs) -> Result<Post> {
    let mut post = Post::new(args.title);
    post.slug = args.slug.unwrap_or_default();
    post.excerpt = args.excerpt.unwrap_or_default();
    post.is_published = !args.draft;
    post.categories = args.categories;
    post.tags = args.tags;

    if let Some(path) = args.content {
        post.content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
    }
    if let Some(date) = args.pub_date {
        post.pub_date = parse_document_date(&date)
            .with_context(|| format!("invalid publish date `{date}`"))?;
    }
    Ok(post)
}

fn upload(blog: &Blog, path: &Path, suffix: Option<&str>) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("`{}` has no file name", path.display()))?;
    Ok(blog.assets().save_file(&bytes, &name, suffix)?)
}

fn print_summary(post: &Post) {
    println!(
        "{}  {:<9}  {}  {}",
        format_document_date(&post.pub_date),
        post.state(Utc::now()).name(),
        post.slug,
        post.title
    );
}

fn print_post(blog: &Blog, post: &Post) {
    println!("id:         {}", post.id);
    println!("title:      {}", post.title);
    println!("link:       {}", post.link());
    println!("state:      {}", post.state(Utc::now()).name());
    println!("published:  {}", format_document_date(&post.pub_date));
    println!("modified:   {}", format_document_date(&post.last_modified));
    println!("categories: {}", post.categories.join(", "));
    println!("tags:       {}", post.tags.join(", "));
    println!(
        "comments:   {} ({})",
        post.comments.len(),
        if blog.are_comments_open(post) { "open" } else { "closed" }
    );
    if !post.excerpt.is_empty() {
        println!("\n{}", post.excerpt);
    }
    if !post.content.is_empty() {
        println!("\n{}", post.content);
    }
}
