//! Store-level behaviour over generated data

use std::sync::Arc;

use chrono::NaiveDate;
use crm_models::{
    Candidate, CandidateStatus, ModulePatch, Notification, NotificationKind, QuotationModule, Role,
    User,
};
use crm_store::{AppStore, FileStorage, KeyValueStore, MemoryStorage, Snapshot, MODULES_KEY};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;

fn phone() -> String {
    (6_000_000_000u64..9_999_999_999).fake::<u64>().to_string()
}

fn fake_user(id: usize) -> User {
    User::new(
        format!("u-{id}"),
        Name().fake::<String>(),
        SafeEmail().fake::<String>(),
        phone(),
        Role::Bda,
    )
}

fn fake_candidate(id: usize) -> Candidate {
    Candidate::new(
        format!("cand-{id}"),
        Name().fake::<String>(),
        SafeEmail().fake::<String>(),
        phone(),
    )
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn memory_store(snapshot: Snapshot) -> AppStore {
    AppStore::new(snapshot, Arc::new(MemoryStorage::new()))
}

#[test]
fn duplicate_phone_leaves_collections_unchanged() {
    let users: Vec<User> = (0..5).map(fake_user).collect();
    let candidates: Vec<Candidate> = (0..3).map(fake_candidate).collect();
    let mut store = memory_store(
        Snapshot::builder()
            .users(users.clone())
            .candidates(candidates.clone())
            .build(),
    );

    for (i, user) in users.iter().enumerate() {
        let mut dup = fake_candidate(100 + i);
        dup.phone = user.phone.clone();
        assert!(!store.add_candidate(dup));
    }
    for (i, candidate) in candidates.iter().enumerate() {
        let mut dup = fake_candidate(200 + i);
        dup.phone = candidate.phone.clone();
        assert!(!store.add_candidate(dup));
    }

    assert_eq!(store.snapshot().users().len(), 5);
    assert_eq!(store.snapshot().candidates().len(), 3);
}

#[test]
fn scenario_duplicate_phone_against_user() {
    let user = User::new("u-1", "Sneha Verma", "sneha@agency.io", "9000000001", Role::Bda);
    let mut store = memory_store(Snapshot::builder().users(vec![user]).build());

    let applicant = Candidate::new("cand-9", "Someone Else", "else@mail.com", "9000000001");
    store.add_candidate(applicant);

    assert!(store.snapshot().candidates().is_empty());
}

#[test]
fn approving_promotes_every_candidate() {
    let candidates: Vec<Candidate> = (0..4).map(fake_candidate).collect();
    let mut store = memory_store(Snapshot::builder().candidates(candidates.clone()).build());

    for candidate in &candidates {
        let users_before = store.snapshot().users().len();
        let user = store.approve_candidate(&candidate.id).unwrap();

        assert!(store.snapshot().find_candidate(&candidate.id).is_none());
        assert_eq!(store.snapshot().users().len(), users_before + 1);
        assert_eq!(user.id, candidate.id);
        assert_eq!(user.role, Role::Bda);
        assert_eq!(user.commission_rate, Some(8.0));
        assert_eq!(user.candidate_status, Some(CandidateStatus::Approved));
        assert_eq!(store.snapshot().find_user(&candidate.id), Some(&user));
    }
}

#[test]
fn scenario_approve_mock_candidate() {
    let candidate = Candidate::new("cand-mock-1", "Aditya", "aditya@mail.com", "9000000100");
    let mut store = memory_store(
        Snapshot::builder()
            .users(vec![fake_user(1)])
            .candidates(vec![candidate])
            .build(),
    );

    store.approve_candidate("cand-mock-1");

    assert_eq!(store.snapshot().users().len(), 2);
    assert_eq!(store.snapshot().candidates().len(), 0);
}

#[test]
fn rejecting_creates_no_user() {
    let candidates: Vec<Candidate> = (0..3).map(fake_candidate).collect();
    let mut store = memory_store(
        Snapshot::builder()
            .users(vec![fake_user(1)])
            .candidates(candidates.clone())
            .build(),
    );

    for candidate in &candidates {
        store.reject_candidate(&candidate.id);
        assert!(store.snapshot().find_candidate(&candidate.id).is_none());
        assert!(store.snapshot().find_user(&candidate.id).is_none());
    }
    assert_eq!(store.snapshot().users().len(), 1);
}

#[test]
fn mark_read_touches_exactly_one_notification() {
    let notifications: Vec<Notification> = (0..6)
        .map(|i| {
            Notification::new(
                format!("n-{i}"),
                NotificationKind::Other,
                CompanyName().fake::<String>(),
                "update",
                day(1 + i as u32),
            )
        })
        .collect();
    let mut store = memory_store(Snapshot::builder().notifications(notifications).build());

    assert!(store.mark_notification_as_read("n-3"));
    let once = store.snapshot().clone();
    assert!(store.mark_notification_as_read("n-3"));
    assert_eq!(store.snapshot(), &once);

    for notification in store.snapshot().notifications() {
        assert_eq!(notification.read, notification.id == "n-3");
    }
}

#[test]
fn clear_all_empties_notifications() {
    for size in [0usize, 1, 7] {
        let notifications = (0..size).map(|i| {
            Notification::new(format!("n-{i}"), NotificationKind::Overdue, "t", "m", day(2))
        });
        let mut store = memory_store(Snapshot::builder().notifications(notifications).build());
        store.clear_all_notifications();
        assert!(store.snapshot().notifications().is_empty());
    }
}

#[test]
fn catalog_survives_reload_after_each_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStorage::open(dir.path()).unwrap());
    let mut store = AppStore::new(Snapshot::default(), storage.clone());

    let reload = |storage: &Arc<dyn KeyValueStore>| {
        AppStore::new(Snapshot::default(), storage.clone())
            .snapshot()
            .modules()
            .clone()
    };

    store
        .add_module(QuotationModule::new(
            "mod-video",
            "Explainer Video",
            "60 second animated explainer",
            35000,
        ))
        .unwrap();
    assert_eq!(&reload(&storage), store.snapshot().modules());

    store
        .update_module(
            "mod-video",
            &ModulePatch {
                name: Some("Explainer Video (HD)".into()),
                ..ModulePatch::price(42000)
            },
        )
        .unwrap();
    assert_eq!(&reload(&storage), store.snapshot().modules());
    assert_eq!(store.snapshot().find_module("mod-video").unwrap().price, 42000);

    store.delete_module("mod-web").unwrap();
    assert_eq!(&reload(&storage), store.snapshot().modules());
    assert!(storage.get(MODULES_KEY).unwrap().is_some());
}

#[test]
fn duplicate_module_id_is_rejected() {
    let mut store = memory_store(Snapshot::default());
    let err = store
        .add_module(QuotationModule::new("mod-web", "Copy", "", 1))
        .unwrap_err();
    assert_eq!(err.error_code(), "conflict");
}
