use crate::domain::access::require_admin;
use crate::domain::repository::TagRepository;
use crate::domain::types::{Actor, NewTag, Tag, validate_color, validate_name, validate_slug};
use crate::error::RecipesServiceError;

// ── ListTags ─────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        self.repo.list().await
    }
}

// ── GetTag ───────────────────────────────────────────────────────────────────

pub struct GetTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> GetTagUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Tag, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::TagNotFound)
    }
}

// ── CreateTag ────────────────────────────────────────────────────────────────

pub struct CreateTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> CreateTagUseCase<R> {
    /// An empty colour is stored as `None`.
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        input: NewTag,
    ) -> Result<Tag, RecipesServiceError> {
        require_admin(actor)?;
        let name = input.name.trim();
        let slug = input.slug.trim();
        let color = input
            .color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        if !validate_name(name) || !validate_slug(slug) {
            return Err(RecipesServiceError::MissingData);
        }
        if color.is_some_and(|c| !validate_color(c)) {
            return Err(RecipesServiceError::MissingData);
        }
        let tag = self
            .repo
            .create(&NewTag {
                name: name.to_owned(),
                color: color.map(str::to_uppercase),
                slug: slug.to_owned(),
            })
            .await?;
        tracing::info!(tag_id = tag.id, slug = %tag.slug, "tag created");
        Ok(tag)
    }
}
