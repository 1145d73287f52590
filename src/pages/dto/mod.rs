/*
 * Responsibility
 * - フォーム (application/x-www-form-urlencoded) の受け口と画面用 view model
 */
pub mod delete;
pub mod login;
pub mod prompt_configs;
pub mod users;
