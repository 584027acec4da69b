/*
 * Responsibility
 * - Handler から見える「認証結果」の型
 * - middleware (auth::access) が request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証やユーザー読み込みは middleware/services 側の責務
 */
use serde::Serialize;

use crate::repos::UserRecord;

/// How the access gate let this request through.
///
/// Always present on requests that reach a handler behind the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOutcome {
    /// Path is allow-listed; no credential was checked.
    AllowListed,
    /// A credential was verified and its principal resolved.
    Authenticated,
    /// No credential was sent. Whether that is acceptable is up to the handler.
    Anonymous,
}

/// The loaded record of the authenticated user.
///
/// Only attached for user principals (service principals have no record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CurrentUser(pub UserRecord);

impl CurrentUser {
    /// Documented name of this request attribute, also its JSON key.
    pub const ATTRIBUTE: &'static str = "currentUser";
}
