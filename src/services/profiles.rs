use sea_orm::DbErr;
use uuid::Uuid;

use crate::models::artists;
use crate::repository::Store;

/// Outcome of resolving an artist reference to the artist's user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistResolution {
    ResolvedUser(Uuid),
    NotFound,
}

/// Resolve an artist reference that may be either an artist-profile id or a user id.
///
/// Commission rows store the artist's **user** id, so a profile id is mapped to
/// its owner. A reference that is not a profile id must name an existing user.
pub async fn resolve_artist_reference(
    store: &dyn Store,
    reference: Uuid,
) -> Result<ArtistResolution, DbErr> {
    if let Some(artist) = store.find_artist(reference).await? {
        return Ok(ArtistResolution::ResolvedUser(artist.user_id));
    }

    match store.find_user(reference).await? {
        Some(user) => Ok(ArtistResolution::ResolvedUser(user.id)),
        None => Ok(ArtistResolution::NotFound),
    }
}

/// Does `user_id` own the artist profile behind the commission's `artist_user_id`?
pub async fn owns_artist_profile(
    store: &dyn Store,
    user_id: Uuid,
    artist_user_id: Uuid,
) -> Result<bool, DbErr> {
    let profile: Option<artists::Model> = store.find_artist_by_user(user_id).await?;
    Ok(profile.is_some_and(|a| a.user_id == artist_user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::Roles;
    use crate::repository::memory::InMemoryStore;

    #[tokio::test]
    async fn profile_id_resolves_to_owning_user() {
        let store = InMemoryStore::new();
        let user = store.add_user("ink@example.com", Roles::Artist).await;
        let profile = store.add_artist_profile(user.id, "Ink").await;

        let resolved = resolve_artist_reference(&store, profile.id).await.unwrap();
        assert_eq!(resolved, ArtistResolution::ResolvedUser(user.id));
    }

    #[tokio::test]
    async fn raw_user_id_resolves_to_itself() {
        let store = InMemoryStore::new();
        let user = store.add_user("ink@example.com", Roles::Artist).await;

        let resolved = resolve_artist_reference(&store, user.id).await.unwrap();
        assert_eq!(resolved, ArtistResolution::ResolvedUser(user.id));
    }

    #[tokio::test]
    async fn unknown_reference_is_not_found() {
        let store = InMemoryStore::new();

        let resolved = resolve_artist_reference(&store, Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(resolved, ArtistResolution::NotFound);
    }

    #[tokio::test]
    async fn ownership_requires_matching_profile() {
        let store = InMemoryStore::new();
        let artist = store.add_user("a@example.com", Roles::Artist).await;
        let other = store.add_user("b@example.com", Roles::Artist).await;
        store.add_artist_profile(artist.id, "A").await;

        assert!(owns_artist_profile(&store, artist.id, artist.id).await.unwrap());
        assert!(!owns_artist_profile(&store, other.id, artist.id).await.unwrap());
        assert!(!owns_artist_profile(&store, artist.id, other.id).await.unwrap());
    }
}
