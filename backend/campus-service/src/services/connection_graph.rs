//! Symmetric connection graph
//!
//! Both directions of an edge are written under one write guard, so readers
//! never observe a half-applied connect or disconnect.

use chrono::Utc;
use event_schema::DomainEvent;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::{RwLock, RwLockReadGuard};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::notifications::NotificationHub;

type Edges = HashMap<Uuid, BTreeSet<Uuid>>;

/// Read view of the graph; connects and disconnects wait until it is dropped
pub struct GraphReadGuard<'a>(RwLockReadGuard<'a, Edges>);

impl GraphReadGuard<'_> {
    pub fn is_connected(&self, user_id: Uuid, other_id: Uuid) -> bool {
        self.0
            .get(&user_id)
            .map(|set| set.contains(&other_id))
            .unwrap_or(false)
    }
}

pub struct ConnectionGraph {
    // user_id -> connected user ids
    edges: RwLock<Edges>,
    notifications: NotificationHub,
}

impl ConnectionGraph {
    pub fn new(notifications: NotificationHub) -> Self {
        Self {
            edges: RwLock::new(HashMap::new()),
            notifications,
        }
    }

    /// Connect two users. Returns `false` when they were already connected.
    pub async fn connect(&self, user_id: Uuid, other_id: Uuid) -> ServiceResult<bool> {
        if user_id == other_id {
            return Err(ServiceError::InvalidInput(
                "cannot connect with yourself".to_string(),
            ));
        }

        let added = {
            let mut edges = self.edges.write().await;
            let forward = edges.entry(user_id).or_default().insert(other_id);
            let backward = edges.entry(other_id).or_default().insert(user_id);
            forward || backward
        };

        if added {
            tracing::info!(user_id = %user_id, other_id = %other_id, "connection added");
            self.notifications
                .publish(DomainEvent::ConnectionAdded {
                    user_a: user_id,
                    user_b: other_id,
                    created_at: Utc::now(),
                })
                .await;
        }

        Ok(added)
    }

    /// Remove a connection. Returns `false` when there was nothing to remove.
    pub async fn disconnect(&self, user_id: Uuid, other_id: Uuid) -> bool {
        let removed = {
            let mut edges = self.edges.write().await;
            let forward = remove_edge(&mut edges, user_id, other_id);
            let backward = remove_edge(&mut edges, other_id, user_id);
            forward || backward
        };

        if removed {
            tracing::info!(user_id = %user_id, other_id = %other_id, "connection removed");
            self.notifications
                .publish(DomainEvent::ConnectionRemoved {
                    user_a: user_id,
                    user_b: other_id,
                    removed_at: Utc::now(),
                })
                .await;
        }

        removed
    }

    pub async fn is_connected(&self, user_id: Uuid, other_id: Uuid) -> bool {
        self.read().await.is_connected(user_id, other_id)
    }

    /// Hold the graph steady while acting on a connection check
    pub async fn read(&self) -> GraphReadGuard<'_> {
        GraphReadGuard(self.edges.read().await)
    }

    pub async fn connections_of(&self, user_id: Uuid) -> BTreeSet<Uuid> {
        self.edges
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}

fn remove_edge(edges: &mut Edges, from: Uuid, to: Uuid) -> bool {
    let Some(set) = edges.get_mut(&from) else {
        return false;
    };
    let removed = set.remove(&to);
    if set.is_empty() {
        edges.remove(&from);
    }
    removed
}
