/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - cookie (無ければ設定値) から上流 API 用の AuthContext を 1 リクエストごとに解決する
 * - cookie の読み取りは core に閉じ込め、AuthContext 型は services::upstream 側に置く
 *
 * Public API:
 * - Auth
 */

mod core;

pub use core::Auth;
