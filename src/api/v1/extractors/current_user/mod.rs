/*!
 * Authenticated user extractor
 *
 * Responsibility:
 * - access middleware が載せた認証結果 (AccessOutcome / CurrentUser) を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - AccessOutcome
 * - CurrentUser
 * - CurrentUserExtractor
 */

mod core;
mod types;

pub use core::CurrentUserExtractor;
pub use types::{AccessOutcome, CurrentUser};
