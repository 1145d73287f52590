/*
 * Responsibility
 * - middleware の公開インターフェース
 * - http::apply (request id / body limit / timeout / trace), security_headers::apply
 */
pub mod http;
pub mod security_headers;
