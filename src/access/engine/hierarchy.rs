//! Manager-subordinate hierarchy traversal
//!
//! Nothing on the write path prevents a `manager_id` cycle, so both
//! traversals carry a visited set and treat a revisit as termination,
//! never as an error. Traversals hold plain user ids in explicit
//! worklists; no recursion, no entity references.

use super::DecisionEngine;
use crate::access::context::TenantContext;
use crate::models::UserId;
use crate::utils::error::Result;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

impl DecisionEngine {
    /// Whether `target_id` transitively reports to `manager_id`
    ///
    /// Walks the `manager_id` chain upward from the target. A user is
    /// never their own subordinate. A broken chain (missing user, null
    /// manager, foreign tenant) or a revisited node terminates with
    /// `false`.
    pub async fn is_subordinate(
        &self,
        ctx: &TenantContext,
        manager_id: &UserId,
        target_id: &UserId,
    ) -> Result<bool> {
        let tenant_id = ctx.require_tenant_id()?;

        if manager_id == target_id {
            return Ok(false);
        }

        let mut visited: HashSet<UserId> = HashSet::new();
        let mut current = target_id.clone();

        loop {
            if !visited.insert(current.clone()) {
                debug!(%manager_id, %target_id, "manager chain revisited a node, terminating");
                return Ok(false);
            }

            let user = match self.store().find_user_by_id(&current).await? {
                Some(user) if user.tenant_id == *tenant_id && !user.is_deleted => user,
                _ => return Ok(false),
            };

            match user.manager_id {
                Some(next) if next == *manager_id => return Ok(true),
                Some(next) => current = next,
                None => return Ok(false),
            }
        }
    }

    /// Transitive closure of direct reports under `manager_id`
    ///
    /// Breadth-first over `find_users_by_manager_id`, children sorted by
    /// id per level so the order is deterministic for a fixed graph.
    /// The manager itself is never part of the result.
    pub async fn all_subordinates(
        &self,
        ctx: &TenantContext,
        manager_id: &UserId,
    ) -> Result<Vec<UserId>> {
        let tenant_id = ctx.require_tenant_id()?;

        let mut visited: HashSet<UserId> = HashSet::new();
        visited.insert(manager_id.clone());

        let mut queue: VecDeque<UserId> = VecDeque::new();
        queue.push_back(manager_id.clone());

        let mut subordinates: Vec<UserId> = Vec::new();

        while let Some(current) = queue.pop_front() {
            let mut reports = self.store().find_users_by_manager_id(&current).await?;
            reports.retain(|user| user.tenant_id == *tenant_id && !user.is_deleted);
            reports.sort_by(|a, b| a.user_id.cmp(&b.user_id));

            for report in reports {
                if visited.insert(report.user_id.clone()) {
                    subordinates.push(report.user_id.clone());
                    queue.push_back(report.user_id);
                }
            }
        }

        debug!(%manager_id, count = subordinates.len(), "subordinate closure computed");
        Ok(subordinates)
    }
}
