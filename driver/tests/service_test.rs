//! Service-level tests running against the in-memory store, which shares
//! its conditional-update semantics with the MongoDB driver.

use std::sync::Arc;

use application::service::{EventService, MatchingService, RegistrationService, UserService};
use application::transfer::{
    CreateEventDto, CreateUserDto, GetEventDto, GetUserDto, RegistrationDto, UserFilterDto,
};
use driver::database::InMemoryDatabase;
use error_stack::Report;
use kernel::KernelError;

fn beach_cleanup(event_id: i64, capacity: i32, filters: Vec<&str>) -> CreateEventDto {
    CreateEventDto {
        event_id,
        name: "Beach Cleanup".to_string(),
        capacity,
        info: "Help clean the beach".to_string(),
        filters: filters.into_iter().map(String::from).collect(),
        location: "Beach".to_string(),
        date: "2024-06-01".to_string(),
        duration: "3 hours".to_string(),
    }
}

#[tokio::test]
async fn user_filter_lifecycle() -> Result<(), Report<KernelError>> {
    let db = InMemoryDatabase::new();

    assert!(
        db.add_user(CreateUserDto {
            id: 1,
            name: "Alice".to_string(),
            filters: vec!["music".to_string(), "sports".to_string()],
        })
        .await?
    );

    assert!(
        db.add_filter(UserFilterDto {
            id: 1,
            filter: "volunteer".to_string(),
        })
        .await?
    );
    let filters = db.get_filters(GetUserDto { id: 1 }).await?;
    assert_eq!(filters, vec!["music", "sports", "volunteer"]);

    assert!(
        db.remove_filter(UserFilterDto {
            id: 1,
            filter: "sports".to_string(),
        })
        .await?
    );
    let filters = db.get_filters(GetUserDto { id: 1 }).await?;
    assert_eq!(filters, vec!["music", "volunteer"]);

    // Duplicate filter declines, missing user fails.
    assert!(
        !db.add_filter(UserFilterDto {
            id: 1,
            filter: "music".to_string(),
        })
        .await?
    );
    let missing = db
        .add_filter(UserFilterDto {
            id: 99,
            filter: "music".to_string(),
        })
        .await;
    assert!(missing.is_err());

    Ok(())
}

#[tokio::test]
async fn filters_of_absent_user_are_empty() -> Result<(), Report<KernelError>> {
    let db = InMemoryDatabase::new();
    assert!(db.get_filters(GetUserDto { id: 42 }).await?.is_empty());
    assert_eq!(db.get_user(GetUserDto { id: 42 }).await?, None);
    Ok(())
}

#[tokio::test]
async fn event_round_trip() -> Result<(), Report<KernelError>> {
    let db = InMemoryDatabase::new();
    assert!(db.add_event(beach_cleanup(10, 3, vec!["volunteer"])).await?);
    assert!(!db.add_event(beach_cleanup(10, 3, vec!["volunteer"])).await?);

    let event = db
        .get_event(GetEventDto { event_id: 10 })
        .await?
        .expect("event must exist");
    assert_eq!(event.event_id, 10);
    assert_eq!(event.name, "Beach Cleanup");
    assert_eq!(event.capacity, 3);
    assert_eq!(event.info, "Help clean the beach");
    assert_eq!(event.filters, vec!["volunteer"]);
    assert_eq!(event.location, "Beach");
    assert_eq!(event.date, "2024-06-01");
    assert_eq!(event.duration, "3 hours");
    assert_eq!(event.current_capacity, 0);
    assert!(event.people.is_empty());

    assert_eq!(db.get_all_events().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn matching_ranks_by_overlap() -> Result<(), Report<KernelError>> {
    let db = InMemoryDatabase::new();
    assert!(db.add_event(beach_cleanup(1, 3, vec!["volunteer"])).await?);
    assert!(db.add_event(beach_cleanup(2, 3, vec!["fun"])).await?);
    assert!(
        db.add_event(beach_cleanup(3, 3, vec!["volunteer", "outdoors"]))
            .await?
    );

    // Only the overlapping events come back, best overlap first.
    let matched = db
        .match_events(vec!["volunteer".to_string(), "outdoors".to_string()])
        .await?;
    let ids: Vec<i64> = matched.iter().map(|event| event.event_id).collect();
    assert_eq!(ids, vec![3, 1]);

    let matched = db.match_events(vec!["volunteer".to_string()]).await?;
    let ids: Vec<i64> = matched.iter().map(|event| event.event_id).collect();
    assert_eq!(ids, vec![1, 3]);

    Ok(())
}

#[tokio::test]
async fn matching_with_no_filters_is_empty() -> Result<(), Report<KernelError>> {
    let db = InMemoryDatabase::new();
    assert!(db.add_event(beach_cleanup(1, 3, vec!["volunteer"])).await?);
    assert!(db.match_events(Vec::new()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn equal_overlap_orders_by_event_id() -> Result<(), Report<KernelError>> {
    let db = InMemoryDatabase::new();
    assert!(db.add_event(beach_cleanup(7, 3, vec!["volunteer"])).await?);
    assert!(db.add_event(beach_cleanup(2, 3, vec!["volunteer"])).await?);
    assert!(db.add_event(beach_cleanup(5, 3, vec!["volunteer"])).await?);

    let matched = db.match_events(vec!["volunteer".to_string()]).await?;
    let ids: Vec<i64> = matched.iter().map(|event| event.event_id).collect();
    assert_eq!(ids, vec![2, 5, 7]);
    Ok(())
}

#[tokio::test]
async fn capacity_one_event_admits_one_user() -> Result<(), Report<KernelError>> {
    let db = InMemoryDatabase::new();
    assert!(db.add_event(beach_cleanup(10, 1, vec!["volunteer"])).await?);

    assert!(
        db.sign_up(RegistrationDto {
            user_id: 5,
            event_id: 10,
        })
        .await?
    );
    assert!(
        !db.sign_up(RegistrationDto {
            user_id: 6,
            event_id: 10,
        })
        .await?
    );

    let event = db
        .get_event(GetEventDto { event_id: 10 })
        .await?
        .expect("event must exist");
    assert_eq!(event.current_capacity, 1);
    assert_eq!(event.people, vec![5]);
    Ok(())
}

#[tokio::test]
async fn repeated_sign_up_declines_without_side_effects() -> Result<(), Report<KernelError>> {
    let db = InMemoryDatabase::new();
    assert!(db.add_event(beach_cleanup(10, 3, vec!["volunteer"])).await?);

    let dto = || RegistrationDto {
        user_id: 5,
        event_id: 10,
    };
    assert!(db.sign_up(dto()).await?);
    for _ in 0..4 {
        assert!(!db.sign_up(dto()).await?);
    }

    let event = db
        .get_event(GetEventDto { event_id: 10 })
        .await?
        .expect("event must exist");
    assert_eq!(event.current_capacity, 1);
    assert_eq!(event.people, vec![5]);
    Ok(())
}

#[tokio::test]
async fn withdraw_declines_when_not_registered() -> Result<(), Report<KernelError>> {
    let db = InMemoryDatabase::new();
    assert!(db.add_event(beach_cleanup(10, 3, vec!["volunteer"])).await?);

    assert!(
        !db.withdraw(RegistrationDto {
            user_id: 5,
            event_id: 10,
        })
        .await?
    );
    // Missing event also declines on withdrawal.
    assert!(
        !db.withdraw(RegistrationDto {
            user_id: 5,
            event_id: 404,
        })
        .await?
    );
    Ok(())
}

/// Creation is insert-if-absent in one store operation, so concurrent
/// creations of the same id admit exactly one and never overwrite.
#[tokio::test]
async fn concurrent_creates_admit_exactly_one() -> Result<(), Report<KernelError>> {
    let contenders = 16;

    let db = Arc::new(InMemoryDatabase::new());
    let mut handles = Vec::new();
    for attempt in 0..contenders {
        let db = Arc::clone(&db);
        handles.push(tokio::spawn(async move {
            db.add_user(CreateUserDto {
                id: 1,
                name: format!("Alice #{attempt}"),
                filters: vec!["music".to_string()],
            })
            .await
        }));
    }

    let mut admitted = 0;
    for handle in handles {
        if handle.await.expect("creation task must not panic")? {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 1);

    let user = db
        .get_user(GetUserDto { id: 1 })
        .await?
        .expect("user must exist");
    assert!(user.name.starts_with("Alice #"));
    Ok(())
}

/// Capacity N with M > N concurrent sign-ups: exactly N must succeed.
#[tokio::test]
async fn concurrent_sign_ups_never_exceed_capacity() -> Result<(), Report<KernelError>> {
    let capacity = 3;
    let contenders = 16;

    let db = Arc::new(InMemoryDatabase::new());
    assert!(
        db.add_event(beach_cleanup(10, capacity, vec!["volunteer"]))
            .await?
    );

    let mut handles = Vec::new();
    for user_id in 0..contenders {
        let db = Arc::clone(&db);
        handles.push(tokio::spawn(async move {
            db.sign_up(RegistrationDto {
                user_id,
                event_id: 10,
            })
            .await
        }));
    }

    let mut admitted = 0;
    let mut declined = 0;
    for handle in handles {
        match handle.await.expect("sign-up task must not panic")? {
            true => admitted += 1,
            false => declined += 1,
        }
    }
    assert_eq!(admitted, capacity as i64);
    assert_eq!(declined, contenders - capacity as i64);

    let event = db
        .get_event(GetEventDto { event_id: 10 })
        .await?
        .expect("event must exist");
    assert_eq!(event.current_capacity, capacity);
    assert_eq!(event.people.len(), capacity as usize);
    let mut unique = event.people.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), capacity as usize);
    Ok(())
}
