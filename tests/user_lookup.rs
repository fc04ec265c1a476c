use ascend_stats::api::{fetch_gym_users, resolve_lookup, LookupResolution, Preload, StatsApi};
use ascend_stats::cache::{GymUserCache, LookupTracker};
use ascend_stats::error::FetchError;
use ascend_stats::{GymId, UserEntry};
use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use std::cell::RefCell;
use std::collections::HashMap;

/// Serves canned user lists and records every request it sees.
#[derive(Default)]
struct FakeApi {
    users: HashMap<GymId, Result<Vec<UserEntry>, FetchError>>,
    requests: RefCell<Vec<GymId>>,
}

impl FakeApi {
    fn with(mut self, gym: GymId, users: Result<Vec<UserEntry>, FetchError>) -> Self {
        self.users.insert(gym, users);
        self
    }

    fn requests(&self) -> Vec<GymId> {
        self.requests.borrow().clone()
    }
}

impl StatsApi for FakeApi {
    fn gym_users(&self, gym: GymId) -> LocalBoxFuture<'_, Result<Vec<UserEntry>, FetchError>> {
        self.requests.borrow_mut().push(gym);
        let result = self
            .users
            .get(&gym)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)));
        Box::pin(async move { result })
    }

    fn preload<'a>(&'a self, _: &'a Preload) -> LocalBoxFuture<'a, Result<(), FetchError>> {
        Box::pin(async { Ok(()) })
    }
}

fn users(gym: GymId) -> Vec<UserEntry> {
    match gym {
        130 => vec![
            UserEntry::new("6693546282", "marco"),
            UserEntry::new("1234567890", "Anna"),
        ],
        _ => Vec::new(),
    }
}

fn lookup(
    cache: &GymUserCache,
    tracker: &LookupTracker,
    api: &FakeApi,
    gym: GymId,
) -> LookupResolution {
    let ticket = tracker.begin(gym);
    block_on(resolve_lookup(cache, tracker, api, ticket))
}

#[test]
fn second_lookup_is_served_from_cache() {
    let api = FakeApi::default().with(130, Ok(users(130)));
    let cache = GymUserCache::new();
    let tracker = LookupTracker::new();

    let first = lookup(&cache, &tracker, &api, 130);
    let second = lookup(&cache, &tracker, &api, 130);

    assert_eq!(first, second);
    assert_eq!(api.requests(), [130]);
    match first {
        LookupResolution::Users(list) => assert_eq!(list.len(), 2),
        LookupResolution::Stale => panic!("lookup should be current"),
    }
}

#[test]
fn empty_gym_is_cached_too() {
    let api = FakeApi::default().with(183, Ok(Vec::new()));
    let cache = GymUserCache::new();
    let tracker = LookupTracker::new();

    for _ in 0..3 {
        assert_eq!(
            lookup(&cache, &tracker, &api, 183),
            LookupResolution::Users(Vec::<UserEntry>::new().into())
        );
    }
    assert_eq!(api.requests(), [183]);
    assert!(cache.contains(183));
}

#[test]
fn failed_fetch_behaves_like_an_empty_gym() {
    let api = FakeApi::default().with(95, Err(FetchError::Network("offline".into())));
    let cache = GymUserCache::new();
    let tracker = LookupTracker::new();

    assert_eq!(block_on(fetch_gym_users(&api, 95)), Vec::new());
    assert_eq!(
        lookup(&cache, &tracker, &api, 95),
        LookupResolution::Users(Vec::<UserEntry>::new().into())
    );
    lookup(&cache, &tracker, &api, 95);
    assert_eq!(api.requests(), [95, 95]);
}

#[test]
fn superseded_lookup_is_discarded_but_cached() {
    let api = FakeApi::default().with(130, Ok(users(130)));
    let cache = GymUserCache::new();
    let tracker = LookupTracker::new();

    let slow = tracker.begin(130);
    let _newer = tracker.begin(183);

    assert_eq!(
        block_on(resolve_lookup(&cache, &tracker, &api, slow)),
        LookupResolution::Stale
    );
    assert_eq!(cache.get(130).map(|u| u.len()), Some(2));
}

#[test]
fn remembered_user_invalidates_pending_lookup() {
    let api = FakeApi::default().with(130, Ok(users(130)));
    let cache = GymUserCache::new();
    let tracker = LookupTracker::new();

    let pending = tracker.begin(130);
    tracker.invalidate();

    assert_eq!(
        block_on(resolve_lookup(&cache, &tracker, &api, pending)),
        LookupResolution::Stale
    );
}
