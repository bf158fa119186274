//! Policy enforcement point.
//!
//! Every protected handler calls [`PolicyGate::authorize`] before touching
//! the record store. The gate is a pure pre-condition: it never mutates
//! state and never inspects the guarded handler's result.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crewdir_auth::Principal;
use crewdir_policy::{ActionName, PolicyClient, ResourceId};

use crate::app::errors::ApiError;

pub struct PolicyGate {
    policy: Arc<dyn PolicyClient>,
    /// Upper bound on the remote check; expiry counts as deny.
    timeout: Duration,
}

impl PolicyGate {
    pub fn new(policy: Arc<dyn PolicyClient>, timeout: Duration) -> Self {
        Self { policy, timeout }
    }

    /// Allow or abort.
    ///
    /// Authentication is checked first: an anonymous session yields
    /// `Unauthenticated` (401) without any remote call. Then the PDP is
    /// consulted; deny, transport failure, or timeout all yield
    /// `Forbidden` (403) — the gate fails closed.
    pub async fn authorize(
        &self,
        principal: Option<&Principal>,
        resource: &ResourceId,
        action: &ActionName,
        context: Option<&Value>,
    ) -> Result<(), ApiError> {
        let Some(principal) = principal else {
            return Err(ApiError::Unauthenticated);
        };

        let check = self
            .policy
            .check(principal.key.as_str(), resource, action, context);

        let allow = match tokio::time::timeout(self.timeout, check).await {
            Ok(Ok(allow)) => allow,
            Ok(Err(e)) => {
                tracing::warn!(
                    user = %principal.key,
                    resource = %resource,
                    action = %action,
                    error = %e,
                    "policy check failed; denying"
                );
                false
            }
            Err(_) => {
                tracing::warn!(
                    user = %principal.key,
                    resource = %resource,
                    action = %action,
                    "policy check timed out; denying"
                );
                false
            }
        };

        if allow {
            tracing::debug!(
                user = %principal.key,
                resource = %resource,
                action = %action,
                "policy check allowed"
            );
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crewdir_auth::UserClaims;
    use crewdir_policy::PolicyError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedPdp {
        outcome: Result<bool, ()>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PolicyClient for ScriptedPdp {
        async fn check(
            &self,
            _user: &str,
            _resource: &ResourceId,
            _action: &ActionName,
            _context: Option<&Value>,
        ) -> Result<bool, PolicyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome
                .map_err(|_| PolicyError::Unreachable("connection refused".to_string()))
        }

        async fn sync_user(&self, _key: &str, _email: &str) -> Result<(), PolicyError> {
            Ok(())
        }

        async fn assign_role(&self, _u: &str, _r: &str, _t: &str) -> Result<(), PolicyError> {
            Ok(())
        }
    }

    /// Would allow, but never answers within any reasonable deadline.
    struct StalledPdp;

    #[async_trait]
    impl PolicyClient for StalledPdp {
        async fn check(
            &self,
            _user: &str,
            _resource: &ResourceId,
            _action: &ActionName,
            _context: Option<&Value>,
        ) -> Result<bool, PolicyError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(true)
        }

        async fn sync_user(&self, _key: &str, _email: &str) -> Result<(), PolicyError> {
            Ok(())
        }

        async fn assign_role(&self, _u: &str, _r: &str, _t: &str) -> Result<(), PolicyError> {
            Ok(())
        }
    }

    fn gate_with(outcome: Result<bool, ()>) -> (PolicyGate, Arc<ScriptedPdp>) {
        let pdp = Arc::new(ScriptedPdp {
            outcome,
            calls: AtomicUsize::new(0),
        });
        (
            PolicyGate::new(pdp.clone(), Duration::from_secs(1)),
            pdp,
        )
    }

    fn principal() -> Principal {
        Principal::from_claims(UserClaims {
            email: "a@b.com".to_string(),
            sub: None,
            name: None,
        })
    }

    #[tokio::test]
    async fn anonymous_is_rejected_before_any_remote_call() {
        let (gate, pdp) = gate_with(Ok(true));
        let err = gate
            .authorize(
                None,
                &ResourceId::collection("departments"),
                &ActionName::new("create_department"),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
        assert_eq!(pdp.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn deny_maps_to_forbidden() {
        let (gate, _) = gate_with(Ok(false));
        let err = gate
            .authorize(
                Some(&principal()),
                &ResourceId::instance("departments", 42),
                &ActionName::new("view_department"),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn pdp_failure_fails_closed() {
        let (gate, pdp) = gate_with(Err(()));
        let err = gate
            .authorize(
                Some(&principal()),
                &ResourceId::collection("employees"),
                &ActionName::new("create_employee"),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
        assert_eq!(pdp.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stalled_pdp_fails_closed_at_the_deadline() {
        let gate = PolicyGate::new(Arc::new(StalledPdp), Duration::from_millis(20));
        let err = gate
            .authorize(
                Some(&principal()),
                &ResourceId::instance("departments", 42),
                &ActionName::new("delete_department"),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn allow_passes_through() {
        let (gate, _) = gate_with(Ok(true));
        gate.authorize(
            Some(&principal()),
            &ResourceId::instance("employees", 7),
            &ActionName::new("update_employee"),
            None,
        )
        .await
        .unwrap();
    }
}
