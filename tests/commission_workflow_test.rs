//! Commission lifecycle tests against the in-memory store.
//!
//! Run with: `cargo test --test commission_workflow_test`
use std::sync::Arc;

use uuid::Uuid;

use artlink_backend::models::commissions::{AddProgressUpdate, CreateCommission, Status};
use artlink_backend::models::users::Roles;
use artlink_backend::repository::memory::InMemoryStore;
use artlink_backend::services::{CommissionError, CommissionService};

/// An artist with a profile, a client with a profile, and a bystander with neither.
struct Fixture {
    service: CommissionService,
    store: Arc<InMemoryStore>,
    artist: Uuid,
    artist_profile: Uuid,
    client: Uuid,
    bystander: Uuid,
}

async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());

    let artist = store.add_user("ada@example.com", Roles::Artist).await;
    let profile = store.add_artist_profile(artist.id, "Ada").await;
    let client = store.add_user("cy@example.com", Roles::Client).await;
    store.add_client_profile(client.id).await;
    let bystander = store.add_user("bo@example.com", Roles::Client).await;

    Fixture {
        service: CommissionService::new(store.clone()),
        store,
        artist: artist.id,
        artist_profile: profile.id,
        client: client.id,
        bystander: bystander.id,
    }
}

fn request(artist_id: Uuid, price: f64) -> CreateCommission {
    CreateCommission {
        artist_id,
        description: "A portrait of my cat in watercolour".to_string(),
        price,
    }
}

fn progress(message: &str) -> AddProgressUpdate {
    AddProgressUpdate {
        message: message.to_string(),
        image_url: None,
    }
}

#[tokio::test]
async fn full_lifecycle_enforces_roles() {
    let f = fixture().await;

    let created = f
        .service
        .create(f.client, request(f.artist_profile, 100.0))
        .await
        .unwrap();
    assert_eq!(created.status, Status::Pending);
    assert_eq!(created.artist_id, f.artist);
    assert_eq!(created.client_id, f.client);
    assert_eq!(created.price, 100.0);
    assert_eq!(created.artist.as_ref().unwrap().id, f.artist);
    assert_eq!(created.client.as_ref().unwrap().id, f.client);

    let accepted = f
        .service
        .update_status(created.id, Status::Accepted, f.artist)
        .await
        .unwrap();
    assert_eq!(accepted.status, Status::Accepted);
    assert!(accepted.updated_at.is_some());

    let err = f
        .service
        .update_status(created.id, Status::Completed, f.bystander)
        .await
        .unwrap_err();
    assert!(matches!(err, CommissionError::Forbidden(_)));

    let completed = f
        .service
        .update_status(created.id, Status::Completed, f.client)
        .await
        .unwrap();
    assert_eq!(completed.status, Status::Completed);
}

#[tokio::test]
async fn pending_target_has_no_role_rule() {
    let f = fixture().await;
    let c = f
        .service
        .create(f.client, request(f.artist_profile, 60.0))
        .await
        .unwrap();

    f.service
        .update_status(c.id, Status::Accepted, f.artist)
        .await
        .unwrap();
    f.service
        .update_status(c.id, Status::Completed, f.client)
        .await
        .unwrap();

    // Anyone may move a commission back to pending, even from completed.
    let reopened = f
        .service
        .update_status(c.id, Status::Pending, f.bystander)
        .await
        .unwrap();
    assert_eq!(reopened.status, Status::Pending);

    let fetched = f.service.get(c.id, f.client).await.unwrap();
    assert_eq!(fetched.status, Status::Pending);
}

#[tokio::test]
async fn raw_user_id_is_accepted_as_artist_reference() {
    let f = fixture().await;

    let created = f
        .service
        .create(f.client, request(f.artist, 40.0))
        .await
        .unwrap();
    assert_eq!(created.artist_id, f.artist);
}

#[tokio::test]
async fn caller_without_client_profile_cannot_create() {
    let f = fixture().await;

    let err = f
        .service
        .create(f.bystander, request(f.artist_profile, 10.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CommissionError::Forbidden("Only clients can create commission requests")
    ));
}

#[tokio::test]
async fn unknown_artist_reference_is_not_found() {
    let f = fixture().await;

    let err = f
        .service
        .create(f.client, request(Uuid::new_v4(), 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, CommissionError::NotFound("Artist not found")));
}

#[tokio::test]
async fn invalid_input_is_rejected_before_any_lookup() {
    let f = fixture().await;

    let mut blank = request(f.artist_profile, 10.0);
    blank.description = "   ".to_string();
    let err = f.service.create(f.client, blank).await.unwrap_err();
    assert!(matches!(err, CommissionError::Validation(_)));

    let err = f
        .service
        .create(f.client, request(f.artist_profile, -5.0))
        .await
        .unwrap_err();
    assert!(matches!(err, CommissionError::Validation(_)));

    let err = f
        .service
        .create(f.client, request(f.artist_profile, f64::NAN))
        .await
        .unwrap_err();
    assert!(matches!(err, CommissionError::Validation(_)));
}

#[tokio::test]
async fn only_the_artist_accepts_or_rejects() {
    let f = fixture().await;
    let c = f
        .service
        .create(f.client, request(f.artist_profile, 10.0))
        .await
        .unwrap();

    for caller in [f.client, f.bystander] {
        for target in [Status::Accepted, Status::Rejected] {
            let err = f
                .service
                .update_status(c.id, target, caller)
                .await
                .unwrap_err();
            assert!(matches!(err, CommissionError::Forbidden(_)));
        }
    }

    let rejected = f
        .service
        .update_status(c.id, Status::Rejected, f.artist)
        .await
        .unwrap();
    assert_eq!(rejected.status, Status::Rejected);
}

#[tokio::test]
async fn artist_cannot_mark_completed() {
    let f = fixture().await;
    let c = f
        .service
        .create(f.client, request(f.artist_profile, 10.0))
        .await
        .unwrap();

    let err = f
        .service
        .update_status(c.id, Status::Completed, f.artist)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CommissionError::Forbidden("Only the client can mark commissions as completed")
    ));
}

#[tokio::test]
async fn missing_commission_is_not_found() {
    let f = fixture().await;
    let missing = Uuid::new_v4();

    assert!(matches!(
        f.service.get(missing, f.client).await.unwrap_err(),
        CommissionError::NotFound(_)
    ));
    assert!(matches!(
        f.service
            .update_status(missing, Status::Accepted, f.artist)
            .await
            .unwrap_err(),
        CommissionError::NotFound(_)
    ));
    assert!(matches!(
        f.service
            .add_progress_update(missing, progress("sketch"), f.artist)
            .await
            .unwrap_err(),
        CommissionError::NotFound(_)
    ));
}

#[tokio::test]
async fn get_is_limited_to_the_two_parties() {
    let f = fixture().await;
    let c = f
        .service
        .create(f.client, request(f.artist_profile, 10.0))
        .await
        .unwrap();

    assert_eq!(f.service.get(c.id, f.client).await.unwrap().id, c.id);
    assert_eq!(f.service.get(c.id, f.artist).await.unwrap().id, c.id);

    let err = f.service.get(c.id, f.bystander).await.unwrap_err();
    assert!(matches!(err, CommissionError::Forbidden("Access denied")));
}

#[tokio::test]
async fn lists_never_leak_other_parties_commissions() {
    let f = fixture().await;

    let other_artist = f.store.add_user("zed@example.com", Roles::Artist).await;
    let other_profile = f.store.add_artist_profile(other_artist.id, "Zed").await;
    let other_client = f.store.add_user("yu@example.com", Roles::Client).await;
    f.store.add_client_profile(other_client.id).await;

    let mine = f
        .service
        .create(f.client, request(f.artist_profile, 10.0))
        .await
        .unwrap();
    let theirs = f
        .service
        .create(other_client.id, request(other_profile.id, 20.0))
        .await
        .unwrap();

    let for_artist = f.service.list_by_artist(f.artist, None).await.unwrap();
    assert_eq!(for_artist.len(), 1);
    assert_eq!(for_artist[0].id, mine.id);

    let for_client = f.service.list_by_client(f.client).await.unwrap();
    assert_eq!(for_client.len(), 1);
    assert_eq!(for_client[0].id, mine.id);

    // Explicit reference, by profile id or by user id.
    let by_profile = f
        .service
        .list_by_artist(f.client, Some(other_profile.id))
        .await
        .unwrap();
    assert_eq!(by_profile.len(), 1);
    assert_eq!(by_profile[0].id, theirs.id);

    let by_user = f
        .service
        .list_by_artist(f.client, Some(other_artist.id))
        .await
        .unwrap();
    assert_eq!(by_user.len(), 1);
    assert_eq!(by_user[0].id, theirs.id);

    let err = f
        .service
        .list_by_artist(f.client, Some(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, CommissionError::NotFound(_)));

    let everything = f.service.list_all().await.unwrap();
    assert_eq!(everything.len(), 2);
}

#[tokio::test]
async fn lists_are_newest_first() {
    let f = fixture().await;

    let first = f
        .service
        .create(f.client, request(f.artist_profile, 1.0))
        .await
        .unwrap();
    let second = f
        .service
        .create(f.client, request(f.artist_profile, 2.0))
        .await
        .unwrap();

    let listed = f.service.list_by_client(f.client).await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn progress_updates_append_in_call_order() {
    let f = fixture().await;
    let c = f
        .service
        .create(f.client, request(f.artist_profile, 10.0))
        .await
        .unwrap();

    for (i, message) in ["sketch", "line art", "colours"].into_iter().enumerate() {
        let update = f
            .service
            .add_progress_update(c.id, progress(message), f.artist)
            .await
            .unwrap();
        assert_eq!(update.seq, i as i32 + 1);
        assert_eq!(update.commission_id, c.id);
    }

    let fetched = f.service.get(c.id, f.client).await.unwrap();
    let messages: Vec<&str> = fetched
        .progress_updates
        .iter()
        .map(|u| u.message.as_str())
        .collect();
    assert_eq!(messages, vec!["sketch", "line art", "colours"]);
}

#[tokio::test]
async fn only_the_artist_posts_progress() {
    let f = fixture().await;
    let c = f
        .service
        .create(f.client, request(f.artist_profile, 10.0))
        .await
        .unwrap();

    let err = f
        .service
        .add_progress_update(c.id, progress("looks great"), f.client)
        .await
        .unwrap_err();
    assert!(matches!(err, CommissionError::Forbidden(_)));

    let err = f
        .service
        .add_progress_update(c.id, progress("  "), f.artist)
        .await
        .unwrap_err();
    assert!(matches!(err, CommissionError::Validation(_)));

    let fetched = f.service.get(c.id, f.client).await.unwrap();
    assert!(fetched.progress_updates.is_empty());
}
