//! Demo data (`blog-server seed`)
//!
//! Safe to run repeatedly: existing organization and users are reused and
//! sample content is only written into an organization without posts.

use shared::error::AppError;
use shared::models::{Comment, Organization, Post, Reaction, User};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::db::{PostScope, comments, organizations, posts, reactions, tags, users};
use crate::error::ServiceResult;

pub const ORGANIZATION: &str = "Internal Company";
pub const DEFAULT_PASSWORD: &str = "password123";

const WELCOME_CONTENT: &str = "# Hello team!\n\n\
This is our new internal blog system. It supports **markdown** formatting, so you can create rich posts with:\n\n\
- Bullet points\n\
- *Italic text*\n\
- [Links](https://example.com)\n\
- And more...\n\n\
Let me know what you think!";

const GUIDE_CONTENT: &str = "## Markdown Guide\n\n\
Markdown makes it easy to format your posts. Here's a quick guide:\n\n\
```\n# Heading 1\n## Heading 2\n**Bold text**\n*Italic text*\n[Link](https://example.com)\n```\n\n\
You can also add code blocks with syntax highlighting:\n\n\
```javascript\nfunction greet() {\n  console.log('Hello world!');\n}\n```";

/// What a seed run wrote
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users_created: usize,
    pub posts_created: usize,
}

pub async fn run(pool: &SqlitePool) -> ServiceResult<SeedReport> {
    let mut report = SeedReport::default();
    let now = now_millis();

    let org = match organizations::find_by_name(pool, ORGANIZATION).await? {
        Some(org) => org,
        None => organizations::create(pool, ORGANIZATION, now).await?,
    };
    tracing::info!(organization_id = org.id, "Organization: {}", org.name);

    let admin = ensure_user(pool, &org, "admin@example.com", "admin", "Admin User", &mut report).await?;
    let member = ensure_user(pool, &org, "user@example.com", "user", "Regular User", &mut report).await?;

    let feed = PostScope::Feed {
        organization_id: org.id,
    };
    if !posts::list_rows(pool, feed).await?.is_empty() {
        tracing::info!("Organization already has posts, skipping sample content");
        return Ok(report);
    }

    let welcome = create_post(
        pool,
        &org,
        &admin,
        "Welcome to the Internal Blog System",
        WELCOME_CONTENT,
        &["announcement", "welcome"],
    )
    .await?;
    let guide = create_post(
        pool,
        &org,
        &admin,
        "Using Markdown in Your Posts",
        GUIDE_CONTENT,
        &["guide"],
    )
    .await?;
    report.posts_created = 2;

    comments::insert(
        pool,
        &Comment {
            id: snowflake_id(),
            content: "This looks great! I'm excited to start using it.".into(),
            post_id: welcome.id,
            author_id: member.id,
            parent_id: None,
            created_at: now_millis(),
            updated_at: now_millis(),
        },
    )
    .await?;

    let mut conn = pool.acquire().await?;
    for (post, user, emoji) in [
        (&welcome, &admin, "👍"),
        (&welcome, &member, "❤️"),
        (&guide, &member, "👍"),
    ] {
        reactions::insert(
            &mut *conn,
            &Reaction {
                id: snowflake_id(),
                emoji: emoji.into(),
                post_id: post.id,
                user_id: user.id,
                created_at: now_millis(),
            },
        )
        .await?;
    }

    tracing::info!(?report, "Seed complete");
    Ok(report)
}

async fn ensure_user(
    pool: &SqlitePool,
    org: &Organization,
    email: &str,
    username: &str,
    name: &str,
    report: &mut SeedReport,
) -> ServiceResult<User> {
    if let Some(user) = users::find_by_email(pool, email).await? {
        return Ok(user);
    }
    let hash = hash_password(DEFAULT_PASSWORD)
        .map_err(|e| AppError::internal("Failed to hash password").with_cause(e))?;
    let user = users::create(
        pool,
        users::NewUser {
            email,
            username,
            name: Some(name),
            password_hash: Some(&hash),
            organization_id: org.id,
        },
        now_millis(),
    )
    .await?;
    report.users_created += 1;
    tracing::info!(user_id = user.id, "Created user: {}", user.email);
    Ok(user)
}

async fn create_post(
    pool: &SqlitePool,
    org: &Organization,
    author: &User,
    title: &str,
    content: &str,
    tag_names: &[&str],
) -> ServiceResult<Post> {
    let now = now_millis();
    let post = Post {
        id: snowflake_id(),
        title: title.into(),
        content: content.into(),
        published: true,
        author_id: author.id,
        organization_id: org.id,
        created_at: now,
        updated_at: now,
    };
    let mut tx = pool.begin().await?;
    posts::insert(&mut *tx, &post).await?;
    for name in tag_names {
        tags::insert_for_post(&mut *tx, post.id, name).await?;
    }
    tx.commit().await?;
    tracing::info!(post_id = post.id, "Created post: {}", post.title);
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::authenticate;
    use crate::db::DbService;
    use crate::services::{OrgScope, list_posts};

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = DbService::in_memory().await.unwrap().pool;

        let first = run(&pool).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                users_created: 2,
                posts_created: 2
            }
        );
        let second = run(&pool).await.unwrap();
        assert_eq!(second, SeedReport::default());

        let admin = authenticate(&pool, "admin@example.com", DEFAULT_PASSWORD)
            .await
            .unwrap();
        let feed = list_posts(&pool, OrgScope::new(admin.organization_id))
            .await
            .unwrap();
        assert_eq!(feed.len(), 2);

        let welcome = feed
            .iter()
            .find(|p| p.post.title.starts_with("Welcome"))
            .unwrap();
        let tag_names: Vec<_> = welcome.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tag_names, vec!["announcement", "welcome"]);
        assert_eq!(welcome.comments.len(), 1);
        assert_eq!(welcome.reactions.len(), 2);
    }
}
