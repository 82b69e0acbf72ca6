use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::domain::types::User;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::recipe::CreateRecipeUseCase;
use foodgram_recipes::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};
use foodgram_recipes::usecase::user::GetUserUseCase;

use crate::helpers::{MemoryStore, actor, write_model};

fn subscribe_usecase(store: &MemoryStore) -> SubscribeUseCase<MemoryStore, MemoryStore, MemoryStore> {
    SubscribeUseCase {
        users: store.clone(),
        recipes: store.clone(),
        follows: store.clone(),
    }
}

fn unsubscribe_usecase(store: &MemoryStore) -> UnsubscribeUseCase<MemoryStore, MemoryStore> {
    UnsubscribeUseCase {
        users: store.clone(),
        follows: store.clone(),
    }
}

async fn seed_recipes(store: &MemoryStore, author: &User, n: usize) {
    let flour = store.seed_ingredient("Мука", "г");
    let tag = store.seed_tag(&format!("tag-{}", author.username));
    let create = CreateRecipeUseCase {
        recipes: store.clone(),
        ingredients: store.clone(),
        tags: store.clone(),
    };
    for i in 0..n {
        create
            .execute(
                actor(author),
                write_model(&format!("Рецепт {i}"), &[(flour.id, 100)], &[tag.id]),
            )
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn should_reject_self_follow_regardless_of_state() {
    let store = MemoryStore::new();
    let user = store.seed_user("narcissus");
    let other = store.seed_user("echo");
    let usecase = subscribe_usecase(&store);

    let first = usecase.execute(actor(&user), user.id, None).await;
    assert!(
        matches!(first, Err(RecipesServiceError::SelfFollow)),
        "expected SelfFollow, got {first:?}"
    );

    usecase.execute(actor(&user), other.id, None).await.unwrap();
    let second = usecase.execute(actor(&user), user.id, None).await;
    assert!(matches!(second, Err(RecipesServiceError::SelfFollow)));
}

#[tokio::test]
async fn should_fail_second_subscribe_with_already_following() {
    let store = MemoryStore::new();
    let follower = store.seed_user("fan");
    let author = store.seed_user("chef");
    let usecase = subscribe_usecase(&store);

    usecase
        .execute(actor(&follower), author.id, None)
        .await
        .unwrap();
    let again = usecase.execute(actor(&follower), author.id, None).await;
    assert!(
        matches!(again, Err(RecipesServiceError::AlreadyFollowing)),
        "expected AlreadyFollowing, got {again:?}"
    );
}

#[tokio::test]
async fn should_return_author_with_limited_recipes_on_subscribe() {
    let store = MemoryStore::new();
    let follower = store.seed_user("fan");
    let author = store.seed_user("chef");
    seed_recipes(&store, &author, 3).await;

    let subscribed = subscribe_usecase(&store)
        .execute(actor(&follower), author.id, Some(2))
        .await
        .unwrap();

    assert_eq!(subscribed.profile.user.id, author.id);
    assert!(subscribed.profile.is_subscribed);
    assert_eq!(subscribed.recipes_count, 3);
    assert_eq!(subscribed.recipes.len(), 2);
    assert_eq!(subscribed.recipes[0].name, "Рецепт 2", "most recent first");
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_author() {
    let store = MemoryStore::new();
    let follower = store.seed_user("fan");

    let result = subscribe_usecase(&store)
        .execute(actor(&follower), uuid::Uuid::now_v7(), None)
        .await;
    assert!(matches!(result, Err(RecipesServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_unsubscribe_idempotently() {
    let store = MemoryStore::new();
    let follower = store.seed_user("fan");
    let author = store.seed_user("chef");

    // Never subscribed: still succeeds.
    unsubscribe_usecase(&store)
        .execute(actor(&follower), author.id)
        .await
        .unwrap();

    subscribe_usecase(&store)
        .execute(actor(&follower), author.id, None)
        .await
        .unwrap();
    unsubscribe_usecase(&store)
        .execute(actor(&follower), author.id)
        .await
        .unwrap();
    unsubscribe_usecase(&store)
        .execute(actor(&follower), author.id)
        .await
        .unwrap();

    let profile = GetUserUseCase {
        repo: store.clone(),
        follows: store.clone(),
    }
    .execute(actor(&follower), author.id)
    .await
    .unwrap();
    assert!(!profile.is_subscribed);
}

#[tokio::test]
async fn should_require_existing_author_to_unsubscribe() {
    let store = MemoryStore::new();
    let follower = store.seed_user("fan");

    let result = unsubscribe_usecase(&store)
        .execute(actor(&follower), uuid::Uuid::now_v7())
        .await;
    assert!(matches!(result, Err(RecipesServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_list_subscriptions_with_recipes_limit() {
    let store = MemoryStore::new();
    let follower = store.seed_user("fan");
    let baker = store.seed_user("baker");
    let chef = store.seed_user("chef");
    let ignored = store.seed_user("ignored");
    seed_recipes(&store, &baker, 1).await;
    seed_recipes(&store, &chef, 4).await;
    seed_recipes(&store, &ignored, 2).await;

    let subscribe = subscribe_usecase(&store);
    subscribe
        .execute(actor(&follower), chef.id, None)
        .await
        .unwrap();
    subscribe
        .execute(actor(&follower), baker.id, None)
        .await
        .unwrap();

    let list = ListSubscriptionsUseCase {
        recipes: store.clone(),
        follows: store.clone(),
    };

    let limited = list
        .execute(actor(&follower), PageRequest::default(), Some(2))
        .await
        .unwrap();
    assert_eq!(limited.count, 2);
    assert_eq!(limited.results[0].profile.user.username, "baker");
    assert_eq!(limited.results[1].profile.user.username, "chef");
    assert_eq!(limited.results[1].recipes_count, 4);
    assert_eq!(limited.results[1].recipes.len(), 2);

    let unlimited = list
        .execute(actor(&follower), PageRequest::default(), None)
        .await
        .unwrap();
    assert_eq!(unlimited.results[1].recipes.len(), 4);

    let anonymous = list.execute(None, PageRequest::default(), None).await;
    assert!(matches!(anonymous, Err(RecipesServiceError::Unauthenticated)));
}
