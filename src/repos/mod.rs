/*
 * Responsibility
 * - 上流 API 上のリソースごとの操作 (DB の代わりに REST API を叩く repo)
 */
pub mod prompt_config_repo;
pub mod user_repo;
