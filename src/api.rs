//! The two backend calls: the per-gym user list and the preload warm-up.

use crate::cache::{GymUserCache, LookupTicket, LookupTracker};
use crate::config::{PRELOAD_ENDPOINT, USERS_ENDPOINT};
use crate::error::FetchError;
use crate::{ClimbType, GymId, UserEntry, UserId};
use futures::future::LocalBoxFuture;
use gloo_net::http::Request;
use log::{debug, info, warn};
use serde::Serialize;
use std::rc::Rc;

/// Body of `POST /api/preload/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreloadRequest {
    pub climb_type: ClimbType,
    pub gym_ids: Vec<GymId>,
    pub fp: String,
}

/// A complete selection worth warming the server cache for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preload {
    pub uid: UserId,
    pub body: PreloadRequest,
}

pub trait StatsApi {
    fn gym_users(&self, gym: GymId) -> LocalBoxFuture<'_, Result<Vec<UserEntry>, FetchError>>;

    fn preload<'a>(&'a self, preload: &'a Preload) -> LocalBoxFuture<'a, Result<(), FetchError>>;
}

/// `StatsApi` backed by `fetch`, relative to the page origin.
#[derive(Debug, Clone, Default)]
pub struct HttpApi;

impl StatsApi for HttpApi {
    fn gym_users(&self, gym: GymId) -> LocalBoxFuture<'_, Result<Vec<UserEntry>, FetchError>> {
        Box::pin(async move {
            let url = format!("{}/{}", USERS_ENDPOINT, gym);
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            if !response.ok() {
                return Err(FetchError::Status(response.status()));
            }

            response
                .json::<Vec<UserEntry>>()
                .await
                .map_err(|e| FetchError::Decode(e.to_string()))
        })
    }

    fn preload<'a>(&'a self, preload: &'a Preload) -> LocalBoxFuture<'a, Result<(), FetchError>> {
        Box::pin(async move {
            let url = format!("{}/{}", PRELOAD_ENDPOINT, preload.uid);
            let response = Request::post(&url)
                .json(&preload.body)
                .map_err(|e| FetchError::Decode(e.to_string()))?
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            if !response.ok() {
                return Err(FetchError::Status(response.status()));
            }
            Ok(())
        })
    }
}

/// Fetch the users of a gym; any failure becomes an empty list.
pub async fn fetch_gym_users(api: &dyn StatsApi, gym: GymId) -> Vec<UserEntry> {
    match api.gym_users(gym).await {
        Ok(users) => users,
        Err(e) => {
            warn!("Fetching users for gym {} failed: {}", gym, e);
            Vec::new()
        }
    }
}

/// Outcome of a user-list lookup once it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResolution {
    /// The users for the ticket's gym, from the cache or the network.
    Users(Rc<[UserEntry]>),
    /// A newer lookup (or a remembered user) took over while this one was in
    /// flight; the result was cached but must not touch the form.
    Stale,
}

/// Resolve a lookup: serve it from the cache when possible, otherwise fetch
/// and cache the result (empty or not), then check the ticket is still
/// current.
pub async fn resolve_lookup(
    cache: &GymUserCache,
    tracker: &LookupTracker,
    api: &dyn StatsApi,
    ticket: LookupTicket,
) -> LookupResolution {
    let users = match cache.get(ticket.gym) {
        Some(users) => {
            debug!("Users for gym {} served from cache", ticket.gym);
            users
        }
        None => {
            let fetched = fetch_gym_users(api, ticket.gym).await;
            info!("Fetched {} users for gym {}", fetched.len(), ticket.gym);
            cache.insert(ticket.gym, fetched)
        }
    };

    if tracker.is_current(&ticket) {
        LookupResolution::Users(users)
    } else {
        debug!("Discarding stale user list for gym {}", ticket.gym);
        LookupResolution::Stale
    }
}

/// Fire-and-forget preload; the response and any failure are ignored.
pub fn send_preload(api: Rc<dyn StatsApi>, preload: Preload) {
    wasm_bindgen_futures::spawn_local(async move {
        debug!(
            "Preloading {} gym(s) for user {}",
            preload.body.gym_ids.len(),
            preload.uid
        );
        if let Err(e) = api.preload(&preload).await {
            debug!("Preload for user {} ignored: {}", preload.uid, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preload_body_matches_server_contract() {
        let body = PreloadRequest {
            climb_type: ClimbType::Boulder,
            gym_ids: vec![130, 183],
            fp: "a1b2c3".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"climb_type": "boulder", "gym_ids": [130, 183], "fp": "a1b2c3"})
        );

        let route = PreloadRequest {
            climb_type: ClimbType::Route,
            gym_ids: vec![95],
            fp: String::new(),
        };
        assert_eq!(serde_json::to_value(&route).unwrap()["climb_type"], "route");
    }
}
