use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    // recipe validation
    #[error("recipe name must not be empty")]
    EmptyName,
    #[error("recipe name must be at most 200 characters")]
    NameTooLong,
    #[error("you already have a recipe with this name")]
    DuplicateName,
    #[error("cooking time must be at least one minute")]
    InvalidCookingTime,
    #[error("add at least one ingredient")]
    NoIngredients,
    #[error("the same ingredient cannot be added twice")]
    DuplicateIngredient,
    #[error("unknown ingredient")]
    UnknownIngredient,
    #[error("ingredient amount must be at least one")]
    InvalidAmount,
    #[error("choose at least one tag")]
    NoTags,
    #[error("unknown tag")]
    UnknownTag,

    // favorites, shopping cart, subscriptions
    #[error("recipe is already in the list")]
    AlreadyExists,
    #[error("recipe is not in the list")]
    NotFound,
    #[error("you cannot subscribe to yourself")]
    SelfFollow,
    #[error("already subscribed to this author")]
    AlreadyFollowing,
    #[error("shopping cart is empty")]
    EmptyCart,

    // lookups
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("tag already exists")]
    TagAlreadyExists,

    // request shape
    #[error("invalid query")]
    InvalidQuery,
    #[error("missing data")]
    MissingData,

    // access control
    #[error("authentication required")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_NAME",
            Self::NameTooLong => "NAME_TOO_LONG",
            Self::DuplicateName => "DUPLICATE_NAME",
            Self::InvalidCookingTime => "INVALID_COOKING_TIME",
            Self::NoIngredients => "NO_INGREDIENTS",
            Self::DuplicateIngredient => "DUPLICATE_INGREDIENT",
            Self::UnknownIngredient => "UNKNOWN_INGREDIENT",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::NoTags => "NO_TAGS",
            Self::UnknownTag => "UNKNOWN_TAG",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::NotFound => "NOT_FOUND",
            Self::SelfFollow => "SELF_FOLLOW",
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",
            Self::EmptyCart => "EMPTY_CART",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::MissingData => "MISSING_DATA",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyName
            | Self::NameTooLong
            | Self::DuplicateName
            | Self::InvalidCookingTime
            | Self::NoIngredients
            | Self::DuplicateIngredient
            | Self::UnknownIngredient
            | Self::InvalidAmount
            | Self::NoTags
            | Self::UnknownTag
            | Self::SelfFollow
            | Self::EmptyCart
            | Self::InvalidQuery
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound
            | Self::RecipeNotFound
            | Self::UserNotFound
            | Self::IngredientNotFound
            | Self::TagNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists
            | Self::AlreadyFollowing
            | Self::UserAlreadyExists
            | Self::TagAlreadyExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client outcomes; TraceLayer already records them.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
