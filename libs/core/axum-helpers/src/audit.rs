//! Audit trail on the `audit` tracing target.
//!
//! ```ignore
//! AuditEvent::new(AuditAction::UserLogin, AuditOutcome::Success)
//!     .with_user(user.id)
//!     .with_client(&headers)
//!     .log();
//! ```

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
    Denied,
}

/// Actions recorded by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuditAction {
    #[serde(rename = "user.signup")]
    UserSignup,
    #[serde(rename = "user.login")]
    UserLogin,
    #[serde(rename = "user.delete")]
    UserDelete,
    #[serde(rename = "product.create")]
    ProductCreate,
}

impl AuditAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserSignup => "user.signup",
            Self::UserLogin => "user.login",
            Self::UserDelete => "user.delete",
            Self::ProductCreate => "product.create",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Acting user, absent for anonymous actions such as a failed login
    pub user_id: Option<Uuid>,
    pub action: AuditAction,
    /// e.g. `product:0190...`
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: AuditAction, outcome: AuditOutcome) -> Self {
        Self {
            user_id: None,
            action,
            resource: None,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_resource(mut self, kind: &str, id: Uuid) -> Self {
        self.resource = Some(format!("{}:{}", kind, id));
        self
    }

    /// Client IP and user agent from proxy-aware headers
    pub fn with_client(mut self, headers: &HeaderMap) -> Self {
        self.ip_address = extract_ip_from_headers(headers);
        self.user_agent = extract_user_agent(headers);
        self
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    pub fn log(self) {
        tracing::info!(
            target: "audit",
            user_id = self.user_id.map(|id| id.to_string()),
            action = self.action.as_str(),
            resource = self.resource,
            outcome = ?self.outcome,
            ip = self.ip_address,
            user_agent = self.user_agent,
            timestamp = %self.timestamp,
            details = ?self.details,
            "{}",
            serde_json::to_string(&self).unwrap_or_else(|_| "unserializable audit event".to_string())
        );
    }
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
}

pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("10.0.0.9"));
    }

    #[test]
    fn test_event_serializes_action_name() {
        let user = Uuid::now_v7();
        let event = AuditEvent::new(AuditAction::ProductCreate, AuditOutcome::Success)
            .with_user(user)
            .with_resource("product", user);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "product.create");
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["resource"], format!("product:{}", user));
    }
}
